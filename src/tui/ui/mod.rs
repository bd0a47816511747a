//! UI module: View components for the TUI.

pub mod form;
pub mod loading;
pub mod results;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// One-line message shown at the bottom of the input panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }
}

/// Analysis service reachability, from the startup health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

pub fn render_header(f: &mut Frame, area: Rect, api_url: &str, status: ServiceStatus) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(40)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" RxGuard", MedicalTheme::title()),
        Span::styled(
            " │ Prescription Interaction Checker",
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(title, chunks[0]);

    let (label, style) = match status {
        ServiceStatus::Checking => ("checking", MedicalTheme::text_muted()),
        ServiceStatus::Online => ("online", MedicalTheme::success()),
        ServiceStatus::Offline => ("offline", MedicalTheme::danger()),
    };
    let service = Paragraph::new(Line::from(vec![
        Span::styled("● ", style),
        Span::styled(label, style),
        Span::styled(format!(" {api_url}"), MedicalTheme::text_muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(service, chunks[1]);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: Automated interaction checks can miss or misread medications. Always confirm with a pharmacist or physician.",
        MedicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
