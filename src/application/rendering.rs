//! Result rendering: projects an analysis response onto the result view.
//!
//! Every render clears the view first, so rendering the same payload twice
//! yields the same view and nothing from an earlier payload survives.

use crate::domain::{AnalysisResponse, ThemeColor};

/// Shown instead of an empty medicine list.
pub const NO_MEDICINES_PLACEHOLDER: &str = "No specific medications identified";

/// Medicine area of the result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MedicineDisplay {
    /// One tag per detected medicine, in response order.
    Tags(Vec<String>),
    Placeholder(&'static str),
}

impl Default for MedicineDisplay {
    fn default() -> Self {
        Self::Tags(Vec::new())
    }
}

/// Risk indicator: label plus theme color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskBadge {
    pub label: String,
    pub color: ThemeColor,
}

/// Suggested alternatives section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AlternativesSection {
    #[default]
    Hidden,
    Visible(Vec<String>),
}

/// Display elements of the result panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub medicines: MedicineDisplay,
    pub risk_badge: RiskBadge,
    pub alert_message: String,
    pub alternatives: AlternativesSection,
}

impl ResultView {
    /// Remove all rendered content.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether anything has been rendered since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Replace the contents of `view` with `response`.
pub fn render_response(view: &mut ResultView, response: &AnalysisResponse) {
    view.clear();

    view.medicines = match response.medicines_found.as_deref() {
        Some(found) if !found.is_empty() => MedicineDisplay::Tags(found.to_vec()),
        _ => MedicineDisplay::Placeholder(NO_MEDICINES_PLACEHOLDER),
    };

    view.risk_badge = RiskBadge {
        label: response.risk_label().to_string(),
        color: response.theme_color(),
    };

    view.alert_message = response.alert_text().to_string();

    view.alternatives = match response.alternatives.as_deref() {
        Some(items) if !items.is_empty() => AlternativesSection::Visible(items.to_vec()),
        _ => AlternativesSection::Hidden,
    };
}
