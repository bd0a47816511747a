//! Result panel: draws the rendered `ResultView`.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{AlternativesSection, MedicineDisplay, ResultView};
use crate::tui::styles::MedicalTheme;

/// Rows taken by the risk badge line.
const BADGE_ROWS: usize = 2;
/// Rows taken by the key-hint footer.
const FOOTER_ROWS: usize = 2;
/// The alert keeps at least this many rows (title plus two lines).
const ALERT_MIN_ROWS: usize = 3;

const SUGGESTED_PREFIX: &str = " • Suggested: ";

/// Render the result panel.
pub fn render_results(
    f: &mut Frame,
    area: Rect,
    view: &ResultView,
    completed_at: Option<DateTime<Local>>,
) {
    let accent = MedicalTheme::risk_color(&view.risk_badge.color);

    let mut title = vec![Span::styled(" Analysis Result ", MedicalTheme::subtitle())];
    if let Some(at) = completed_at {
        title.push(Span::styled(
            format!("│ {} ", at.format("%H:%M:%S")),
            MedicalTheme::text_muted(),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(ratatui::style::Style::default().fg(accent));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Content area after the one-cell margin below.
    let width = usize::from(inner.width.saturating_sub(2));
    let height = usize::from(inner.height.saturating_sub(2));

    let medicine_rows_needed = match &view.medicines {
        MedicineDisplay::Tags(names) => pack_tags(names, width).len().max(1),
        MedicineDisplay::Placeholder(_) => 1,
    };
    let alternative_lines_needed = match &view.alternatives {
        AlternativesSection::Visible(items) => {
            1 + items
                .iter()
                .map(|item| alternative_lines(item, width).len())
                .sum::<usize>()
        }
        AlternativesSection::Hidden => 0,
    };

    let budget = height.saturating_sub(BADGE_ROWS + FOOTER_ROWS + ALERT_MIN_ROWS);
    let (medicine_rows, alternative_rows) =
        share_rows(budget, 1 + medicine_rows_needed, alternative_lines_needed);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(rows_u16(BADGE_ROWS)),
            Constraint::Length(rows_u16(medicine_rows)),
            Constraint::Min(rows_u16(ALERT_MIN_ROWS)),
            Constraint::Length(rows_u16(alternative_rows)),
            Constraint::Length(rows_u16(FOOTER_ROWS)),
        ])
        .margin(1)
        .split(inner);

    render_risk_badge(f, chunks[0], view);
    render_medicines(f, chunks[1], view, width, medicine_rows.saturating_sub(1));
    render_alert(f, chunks[2], view);
    if let AlternativesSection::Visible(items) = &view.alternatives {
        render_alternatives(f, chunks[3], items, width, alternative_rows.saturating_sub(1));
    }
    render_results_footer(f, chunks[4]);
}

fn rows_u16(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Split `budget` rows between the medicines and alternatives sections.
///
/// Both get what they need when it fits. Otherwise medicines keep at least
/// half the budget and alternatives get the rest.
fn share_rows(budget: usize, medicines: usize, alternatives: usize) -> (usize, usize) {
    if medicines.saturating_add(alternatives) <= budget {
        return (medicines, alternatives);
    }
    let medicine_share = medicines.min(budget.saturating_sub(alternatives).max(budget / 2));
    let alternative_share = alternatives.min(budget - medicine_share);
    (medicine_share, alternative_share)
}

fn more_label(hidden: usize) -> String {
    format!("+{hidden} more")
}

fn tag_width(name: &str) -> usize {
    Span::raw(name).width() + 2
}

fn row_width(row: &[&str]) -> usize {
    row.iter().map(|name| tag_width(name)).sum::<usize>() + row.len().saturating_sub(1)
}

/// Pack tags left to right into rows no wider than `width`.
///
/// A tag wider than the whole row gets a row to itself.
fn pack_tags(names: &[String], width: usize) -> Vec<Vec<&str>> {
    let mut rows = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut used = 0;

    for name in names {
        let w = tag_width(name);
        if current.is_empty() {
            used = w;
        } else if used + 1 + w > width {
            rows.push(std::mem::take(&mut current));
            used = w;
        } else {
            used += 1 + w;
        }
        current.push(name.as_str());
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Tag rows limited to `max_rows`, with the number of tags left out.
///
/// When tags are left out the last row is shortened until the "+N more"
/// marker fits after it.
fn layout_tags(names: &[String], width: usize, max_rows: usize) -> (Vec<Vec<&str>>, usize) {
    let mut rows = pack_tags(names, width);
    if rows.len() <= max_rows {
        return (rows, 0);
    }

    rows.truncate(max_rows);
    let mut shown: usize = rows.iter().map(Vec::len).sum();
    if let Some(last) = rows.last_mut() {
        while !last.is_empty() {
            let marker = Span::raw(more_label(names.len() - shown)).width();
            if row_width(last) + 1 + marker <= width {
                break;
            }
            last.pop();
            shown -= 1;
        }
    }
    (rows, names.len() - shown)
}

fn render_risk_badge(f: &mut Frame, area: Rect, view: &ResultView) {
    let badge = Paragraph::new(Line::from(vec![
        Span::styled("Risk Level: ", MedicalTheme::text_secondary()),
        Span::styled(
            format!(" {} ", view.risk_badge.label),
            MedicalTheme::risk_badge(&view.risk_badge.color),
        ),
    ]));
    f.render_widget(badge, area);
}

fn render_medicines(f: &mut Frame, area: Rect, view: &ResultView, width: usize, max_rows: usize) {
    let mut lines = vec![Line::from(Span::styled(
        "Medicines Detected",
        MedicalTheme::title(),
    ))];

    match &view.medicines {
        MedicineDisplay::Tags(names) => {
            let (rows, hidden) = layout_tags(names, width, max_rows);
            let last = rows.len().saturating_sub(1);
            for (i, row) in rows.iter().enumerate() {
                let mut spans = Vec::with_capacity(row.len() * 2 + 1);
                for (j, name) in row.iter().enumerate() {
                    if j > 0 {
                        spans.push(Span::raw(" "));
                    }
                    spans.push(Span::styled(format!(" {name} "), MedicalTheme::tag()));
                }
                if i == last && hidden > 0 {
                    if !row.is_empty() {
                        spans.push(Span::raw(" "));
                    }
                    spans.push(Span::styled(more_label(hidden), MedicalTheme::text_muted()));
                }
                lines.push(Line::from(spans));
            }
        }
        MedicineDisplay::Placeholder(text) => {
            lines.push(Line::from(Span::styled(*text, MedicalTheme::text_muted())));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_alert(f: &mut Frame, area: Rect, view: &ResultView) {
    let accent = MedicalTheme::risk_color(&view.risk_badge.color);
    let content = Paragraph::new(vec![
        Line::from(Span::styled(
            "Interaction Alert",
            ratatui::style::Style::default()
                .fg(accent)
                .add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.alert_message.clone(),
            MedicalTheme::text(),
        )),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(content, area);
}

/// Split `text` into lines of at most `width` columns, breaking at spaces.
///
/// Words longer than a line are split across lines.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let w = Span::raw(word).width();
        if !current.is_empty() && used + 1 + w <= width {
            current.push(' ');
            current.push_str(word);
            used += 1 + w;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if w <= width {
            current.push_str(word);
            used = w;
            continue;
        }
        for c in word.chars() {
            let cw = Span::raw(c.to_string()).width();
            if used + cw > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(c);
            used += cw;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Display lines for one alternative; continuation lines are indented
/// under the text.
fn alternative_lines(item: &str, width: usize) -> Vec<Line<'static>> {
    let indent = Span::raw(SUGGESTED_PREFIX).width();
    let wrapped = wrap_words(item, width.saturating_sub(indent));

    if wrapped.is_empty() {
        return vec![Line::from(Span::styled(SUGGESTED_PREFIX, MedicalTheme::success()))];
    }
    wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let lead = if i == 0 {
                Span::styled(SUGGESTED_PREFIX, MedicalTheme::success())
            } else {
                Span::raw(" ".repeat(indent))
            };
            Line::from(vec![lead, Span::styled(text, MedicalTheme::text())])
        })
        .collect()
}

/// Alternative lines limited to `max_lines`, keeping whole items only.
fn layout_alternatives(items: &[String], width: usize, max_lines: usize) -> Vec<Line<'static>> {
    let per_item: Vec<Vec<Line<'static>>> =
        items.iter().map(|item| alternative_lines(item, width)).collect();
    if per_item.iter().map(Vec::len).sum::<usize>() <= max_lines {
        return per_item.into_iter().flatten().collect();
    }

    let room = max_lines.saturating_sub(1);
    let mut lines = Vec::new();
    let mut shown = 0;
    for item_lines in per_item {
        if lines.len() + item_lines.len() > room {
            break;
        }
        lines.extend(item_lines);
        shown += 1;
    }
    if max_lines > 0 {
        lines.push(Line::from(Span::styled(
            format!("   {}", more_label(items.len() - shown)),
            MedicalTheme::text_muted(),
        )));
    }
    lines
}

fn render_alternatives(f: &mut Frame, area: Rect, items: &[String], width: usize, max_lines: usize) {
    let mut lines = vec![Line::from(Span::styled(
        "Safer Alternatives",
        MedicalTheme::title(),
    ))];
    lines.extend(layout_alternatives(items, width, max_lines));

    f.render_widget(Paragraph::new(lines), area);
}

fn render_results_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[N] ", MedicalTheme::key_hint()),
        Span::styled("New Analysis ", MedicalTheme::key_desc()),
        Span::styled("[E] ", MedicalTheme::key_hint()),
        Span::styled("Edit Input ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
