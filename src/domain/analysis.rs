//! Analysis response types.
//!
//! The service response is consumed as-is: every field is optional so a
//! partial payload degrades to an explicit "nothing found" display instead of
//! a parse failure.

use serde::Deserialize;

/// Risk label shown when the service omits one.
pub const UNKNOWN_RISK_LABEL: &str = "Unknown";

/// Envelope returned by `POST /api/analyze`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<AnalysisResponse>,
}

/// Risk assessment produced by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub risk_level: Option<String>,

    /// Preferred theme color, e.g. `#ef4444`.
    #[serde(default)]
    pub risk_hex: Option<String>,

    /// Fallback theme color: a hex string or one of green/yellow/orange/red.
    #[serde(default)]
    pub risk_color: Option<String>,

    #[serde(default)]
    pub medicines_found: Option<Vec<String>>,

    #[serde(default)]
    pub alert_message: Option<String>,

    #[serde(default)]
    pub alternatives: Option<Vec<String>>,

    /// Set by the service when its own pipeline failed (e.g. unreadable image).
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Label for the risk badge.
    #[must_use]
    pub fn risk_label(&self) -> &str {
        match self.risk_level.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => UNKNOWN_RISK_LABEL,
        }
    }

    /// Theme color for the risk badge and result border.
    #[must_use]
    pub fn theme_color(&self) -> ThemeColor {
        ThemeColor::resolve(self.risk_hex.as_deref(), self.risk_color.as_deref())
    }

    /// Text for the alert line; falls back to the service error when no alert is given.
    #[must_use]
    pub fn alert_text(&self) -> &str {
        self.alert_message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }
}

/// Display color resolved from the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor {
    hex: String,
    rgb: (u8, u8, u8),
}

impl ThemeColor {
    /// Neutral slate used when the response carries no usable color.
    pub const NEUTRAL_HEX: &'static str = "#64748b";

    #[must_use]
    pub fn neutral() -> Self {
        Self {
            hex: Self::NEUTRAL_HEX.to_string(),
            rgb: (100, 116, 139),
        }
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional, case-insensitive).
    #[must_use]
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };
        if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        let rgb = (channel(0)?, channel(2)?, channel(4)?);
        Some(Self {
            hex: format!("#{}", expanded.to_ascii_lowercase()),
            rgb,
        })
    }

    /// Map the color names the service uses for `risk_color`.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let hex = match name.trim().to_ascii_lowercase().as_str() {
            "green" => "#10b981",
            "yellow" => "#fbbf24",
            "orange" => "#f97316",
            "red" => "#ef4444",
            _ => return None,
        };
        Self::parse_hex(hex)
    }

    /// Pick the badge color: `risk_hex`, then `risk_color`, then neutral.
    #[must_use]
    pub fn resolve(risk_hex: Option<&str>, risk_color: Option<&str>) -> Self {
        risk_hex
            .and_then(Self::parse_hex)
            .or_else(|| risk_color.and_then(|c| Self::parse_hex(c).or_else(|| Self::named(c))))
            .unwrap_or_else(Self::neutral)
    }

    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        self.rgb
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self::neutral()
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex)
    }
}
