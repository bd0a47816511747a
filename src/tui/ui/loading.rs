//! Loading panel shown while a submission is in flight.

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::MedicalTheme;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Spinner frame for the elapsed time (one frame per 100ms).
#[must_use]
pub fn spinner_frame(elapsed: Duration) -> &'static str {
    SPINNER[(elapsed.as_millis() / 100) as usize % SPINNER.len()]
}

/// Render the loading indicator.
pub fn render_loading(f: &mut Frame, area: Rect, elapsed: Duration) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(inner);

    let content = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(spinner_frame(elapsed), MedicalTheme::info()),
            Span::styled(" Analyzing prescription...", MedicalTheme::title()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Reading handwriting and checking for drug interactions",
            MedicalTheme::text_secondary(),
        )),
        Line::from(Span::styled(
            format!("{}s elapsed", elapsed.as_secs()),
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center);

    f.render_widget(content, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_advances_and_wraps() {
        assert_eq!(spinner_frame(Duration::ZERO), SPINNER[0]);
        assert_eq!(spinner_frame(Duration::from_millis(250)), SPINNER[2]);
        assert_eq!(spinner_frame(Duration::from_millis(800)), SPINNER[0]);
    }
}
