//! Medical-themed color palette and styles.
//!
//! Fixed palette for chrome; risk colors come from the analysis response.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::ThemeColor;

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    /// Deep teal - Primary color
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Lighter teal for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Emerald - selected files, service online
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - listening indicator
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - errors
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Blue - info notices, spinner
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    /// Near-black with blue tint
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    /// Tag background
    pub const BG_CARD: Color = Color::Rgb(51, 65, 85); // #334155

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlighted entry inside a focused list (condition cursor).
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Medicine tag chip.
    #[must_use]
    pub fn tag() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_CARD)
    }

    /// Terminal color for a response theme color.
    #[must_use]
    pub fn risk_color(color: &ThemeColor) -> Color {
        let (r, g, b) = color.rgb();
        Color::Rgb(r, g, b)
    }

    /// Risk badge: theme color background with readable text on top.
    #[must_use]
    pub fn risk_badge(color: &ThemeColor) -> Style {
        let (r, g, b) = color.rgb();
        // Rec. 601 luma
        let luma = (299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000;
        let fg = if luma > 150 {
            Self::BG_DARK
        } else {
            Self::TEXT_PRIMARY
        };
        Style::default()
            .fg(fg)
            .bg(Self::risk_color(color))
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text_contrast() {
        let yellow = ThemeColor::named("yellow").unwrap();
        assert_eq!(MedicalTheme::risk_badge(&yellow).fg, Some(MedicalTheme::BG_DARK));

        let red = ThemeColor::named("red").unwrap();
        assert_eq!(MedicalTheme::risk_badge(&red).fg, Some(MedicalTheme::TEXT_PRIMARY));
        assert_eq!(
            MedicalTheme::risk_badge(&red).bg,
            Some(Color::Rgb(0xef, 0x44, 0x44))
        );
    }
}
