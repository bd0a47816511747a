//! Prescription input panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroize;

use crate::application::Submission;
use crate::domain::catalog::{self, Language, CONDITIONS, LANGUAGES};
use crate::domain::{display_name, parse_image_paths};
use crate::tui::styles::MedicalTheme;

use super::{Notice, NoticeKind};

/// Label shown when no image is selected.
pub const NO_FILES_LABEL: &str = "Select prescription image(s)";

/// Focusable areas of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Images,
    Description,
    Conditions,
    Language,
}

impl FormFocus {
    const ORDER: [FormFocus; 4] = [
        FormFocus::Images,
        FormFocus::Description,
        FormFocus::Conditions,
        FormFocus::Language,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Condition checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionToggle {
    pub label: &'static str,
    pub checked: bool,
}

/// Summary of the image selection shown under the path field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabel {
    pub text: String,
    pub selected: bool,
}

/// Input form state.
#[derive(Debug)]
pub struct FormState {
    pub image_input: String,
    pub description: String,
    pub conditions: Vec<ConditionToggle>,
    pub condition_cursor: usize,
    pub language_index: usize,
    pub focus: FormFocus,
    pub notice: Option<Notice>,
    /// A dictation session is running.
    pub listening: bool,
    default_language_index: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LANGUAGE)
    }
}

impl FormState {
    /// Empty form with `default_language` preselected (English if unknown).
    #[must_use]
    pub fn new(default_language: &str) -> Self {
        let default_language_index = catalog::language_index(default_language).unwrap_or(0);
        Self {
            image_input: String::new(),
            description: String::new(),
            conditions: CONDITIONS
                .iter()
                .map(|&label| ConditionToggle {
                    label,
                    checked: false,
                })
                .collect(),
            condition_cursor: 0,
            language_index: default_language_index,
            focus: FormFocus::Images,
            notice: None,
            listening: false,
            default_language_index,
        }
    }

    pub fn next_focus(&mut self) {
        let i = (self.focus.index() + 1) % FormFocus::ORDER.len();
        self.focus = FormFocus::ORDER[i];
    }

    pub fn prev_focus(&mut self) {
        let len = FormFocus::ORDER.len();
        let i = (self.focus.index() + len - 1) % len;
        self.focus = FormFocus::ORDER[i];
    }

    /// Type a character into the focused area.
    ///
    /// Space toggles the highlighted condition when the checkbox row is focused.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormFocus::Images => self.image_input.push(c),
            FormFocus::Description => self.description.push(c),
            FormFocus::Conditions if c == ' ' => self.toggle_condition(),
            FormFocus::Conditions | FormFocus::Language => return,
        }
        self.notice = None;
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            FormFocus::Images => {
                self.image_input.pop();
            }
            FormFocus::Description => {
                self.description.pop();
            }
            FormFocus::Conditions | FormFocus::Language => {}
        }
    }

    pub fn clear_field(&mut self) {
        match self.focus {
            FormFocus::Images => self.image_input.zeroize(),
            FormFocus::Description => self.description.zeroize(),
            FormFocus::Conditions => self.conditions.iter_mut().for_each(|c| c.checked = false),
            FormFocus::Language => self.language_index = self.default_language_index,
        }
    }

    /// Left arrow: previous condition or previous language.
    pub fn move_left(&mut self) {
        match self.focus {
            FormFocus::Conditions => {
                let len = self.conditions.len();
                self.condition_cursor = (self.condition_cursor + len - 1) % len;
            }
            FormFocus::Language => {
                self.language_index = (self.language_index + LANGUAGES.len() - 1) % LANGUAGES.len();
            }
            _ => {}
        }
    }

    /// Right arrow: next condition or next language.
    pub fn move_right(&mut self) {
        match self.focus {
            FormFocus::Conditions => {
                self.condition_cursor = (self.condition_cursor + 1) % self.conditions.len();
            }
            FormFocus::Language => {
                self.language_index = (self.language_index + 1) % LANGUAGES.len();
            }
            _ => {}
        }
    }

    pub fn toggle_condition(&mut self) {
        if let Some(c) = self.conditions.get_mut(self.condition_cursor) {
            c.checked = !c.checked;
        }
    }

    /// Checked conditions in display order.
    #[must_use]
    pub fn checked_conditions(&self) -> Vec<String> {
        self.conditions
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.label.to_string())
            .collect()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        LANGUAGES[self.language_index % LANGUAGES.len()]
    }

    #[must_use]
    pub fn file_label(&self) -> FileLabel {
        let paths = parse_image_paths(&self.image_input);
        match paths.as_slice() {
            [] => FileLabel {
                text: NO_FILES_LABEL.to_string(),
                selected: false,
            },
            [only] => FileLabel {
                text: format!("✅ {}", display_name(only)),
                selected: true,
            },
            many => FileLabel {
                text: format!("✅ {} Prescriptions Selected", many.len()),
                selected: true,
            },
        }
    }

    /// Snapshot the form for submission.
    #[must_use]
    pub fn submission(&self) -> Submission {
        Submission {
            image_paths: parse_image_paths(&self.image_input),
            description: self.description.clone(),
            conditions: self.checked_conditions(),
            language: self.language().code.to_string(),
        }
    }

    /// Append dictated text, separated from existing content by one space.
    pub fn append_transcript(&mut self, transcript: &str) {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return;
        }
        if !self.description.is_empty() && !self.description.ends_with(char::is_whitespace) {
            self.description.push(' ');
        }
        self.description.push_str(transcript);
    }

    pub fn load_sample_data(&mut self) {
        self.description.zeroize();
        self.description.push_str(catalog::SAMPLE_DESCRIPTION);
        self.notice = None;
    }

    /// Wipe every field and return to the initial selection.
    ///
    /// The dictation indicator is owned by the running session and survives.
    pub fn reset(&mut self) {
        self.image_input.zeroize();
        self.description.zeroize();
        let listening = self.listening;
        *self = Self {
            listening,
            ..Self::new(LANGUAGES[self.default_language_index].code)
        };
    }
}

/// Render the input panel.
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Image paths + file label
            Constraint::Min(5),    // Description
            Constraint::Length(3), // Conditions
            Constraint::Length(3), // Language
            Constraint::Length(2), // Footer / notice
        ])
        .margin(1)
        .split(area);

    render_images(f, chunks[0], state);
    render_description(f, chunks[1], state);
    render_conditions(f, chunks[2], state);
    render_language(f, chunks[3], state);
    render_form_footer(f, chunks[4], state);
}

fn field_block(title: Line<'static>, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        })
}

fn title_style(focused: bool) -> ratatui::style::Style {
    if focused {
        MedicalTheme::focused()
    } else {
        MedicalTheme::text_secondary()
    }
}

fn cursor(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▌", MedicalTheme::cursor())
    } else {
        Span::raw("")
    }
}

fn render_images(f: &mut Frame, area: Rect, state: &FormState) {
    let focused = state.focus == FormFocus::Images;
    let label = state.file_label();

    let block = field_block(
        Line::from(vec![
            Span::styled(" Prescription Images ", title_style(focused)),
            Span::styled("(paths, separated by ';') ", MedicalTheme::text_muted()),
        ]),
        focused,
    );

    let label_style = if label.selected {
        MedicalTheme::success()
    } else {
        MedicalTheme::text_muted()
    };

    let content = Paragraph::new(vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(state.image_input.clone(), MedicalTheme::text()),
            cursor(focused),
        ]),
        Line::from(vec![Span::raw(" "), Span::styled(label.text, label_style)]),
    ])
    .block(block);

    f.render_widget(content, area);
}

fn render_description(f: &mut Frame, area: Rect, state: &FormState) {
    let focused = state.focus == FormFocus::Description;

    let mut title = vec![Span::styled(" Medication Details ", title_style(focused))];
    if state.listening {
        title.push(Span::styled("● Listening... ", MedicalTheme::warning()));
    }

    let body = if state.description.is_empty() && !focused {
        Line::from(Span::styled(
            " e.g. Patient is currently taking Amoxicillin...",
            MedicalTheme::text_muted(),
        ))
    } else {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(state.description.clone(), MedicalTheme::text()),
            cursor(focused),
        ])
    };

    let content = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(field_block(Line::from(title), focused));

    f.render_widget(content, area);
}

fn render_conditions(f: &mut Frame, area: Rect, state: &FormState) {
    let focused = state.focus == FormFocus::Conditions;

    let mut spans = vec![Span::raw(" ")];
    for (i, condition) in state.conditions.iter().enumerate() {
        let mark = if condition.checked { "[x]" } else { "[ ]" };
        let style = if focused && i == state.condition_cursor {
            MedicalTheme::selected()
        } else if condition.checked {
            MedicalTheme::text()
        } else {
            MedicalTheme::text_secondary()
        };
        spans.push(Span::styled(format!("{mark} {}", condition.label), style));
        spans.push(Span::raw("  "));
    }

    let content = Paragraph::new(Line::from(spans)).block(field_block(
        Line::from(Span::styled(" Patient Conditions ", title_style(focused))),
        focused,
    ));

    f.render_widget(content, area);
}

fn render_language(f: &mut Frame, area: Rect, state: &FormState) {
    let focused = state.focus == FormFocus::Language;
    let language = state.language();

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("◀ ", MedicalTheme::text_muted()),
        Span::styled(language.label, MedicalTheme::text()),
        Span::styled(" ▶", MedicalTheme::text_muted()),
        Span::styled(format!("  ({})", language.code), MedicalTheme::text_muted()),
    ]))
    .block(field_block(
        Line::from(Span::styled(" Response Language ", title_style(focused))),
        focused,
    ));

    f.render_widget(content, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState) {
    let content = match &state.notice {
        Some(notice) => {
            let style = match notice.kind {
                NoticeKind::Error => MedicalTheme::danger(),
                NoticeKind::Info => MedicalTheme::info(),
            };
            Line::from(vec![
                Span::styled("! ", style),
                Span::styled(notice.text.clone(), style),
            ])
        }
        None => Line::from(vec![
            Span::styled("[Tab] ", MedicalTheme::key_hint()),
            Span::styled("Next ", MedicalTheme::key_desc()),
            Span::styled("[Space] ", MedicalTheme::key_hint()),
            Span::styled("Toggle ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Check Interactions ", MedicalTheme::key_desc()),
            Span::styled("[^D] ", MedicalTheme::key_hint()),
            Span::styled("Dictate ", MedicalTheme::key_desc()),
            Span::styled("[^L] ", MedicalTheme::key_hint()),
            Span::styled("Sample ", MedicalTheme::key_desc()),
            Span::styled("[^R] ", MedicalTheme::key_hint()),
            Span::styled("Reset ", MedicalTheme::key_desc()),
            Span::styled("[^Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_order_wraps() {
        let mut form = FormState::default();
        assert_eq!(form.focus, FormFocus::Images);
        form.prev_focus();
        assert_eq!(form.focus, FormFocus::Language);
        form.next_focus();
        form.next_focus();
        assert_eq!(form.focus, FormFocus::Description);
    }

    #[test]
    fn test_file_label() {
        let mut form = FormState::default();
        assert_eq!(form.file_label().text, NO_FILES_LABEL);
        assert!(!form.file_label().selected);

        form.image_input = "/scans/rx-front.png".into();
        assert_eq!(form.file_label().text, "✅ rx-front.png");

        form.image_input = "a.png; b.png;c.jpg".into();
        let label = form.file_label();
        assert_eq!(label.text, "✅ 3 Prescriptions Selected");
        assert!(label.selected);
    }

    #[test]
    fn test_checked_conditions_follow_display_order() {
        let mut form = FormState::default();
        form.focus = FormFocus::Conditions;

        form.condition_cursor = 6; // Heart Disease
        form.input_char(' ');
        form.move_right(); // Asthma
        form.move_right(); // wraps to Pregnancy
        form.input_char(' ');
        form.input_char('x'); // ignored on the checkbox row

        assert_eq!(form.checked_conditions(), vec!["Pregnancy", "Heart Disease"]);
        assert_eq!(form.submission().conditions, vec!["Pregnancy", "Heart Disease"]);
    }

    #[test]
    fn test_language_cycles() {
        let mut form = FormState::new("es");
        assert_eq!(form.language().code, "es");

        form.focus = FormFocus::Language;
        form.move_left();
        assert_eq!(form.language().code, "hi");
        form.clear_field();
        assert_eq!(form.language().code, "es");

        form.language_index = LANGUAGES.len() - 1;
        form.move_right();
        assert_eq!(form.language().code, "en");
    }

    #[test]
    fn test_append_transcript_spacing() {
        let mut form = FormState::default();
        form.append_transcript("Aspirin");
        assert_eq!(form.description, "Aspirin");
        form.append_transcript(" and Warfarin ");
        assert_eq!(form.description, "Aspirin and Warfarin");
        form.append_transcript("   ");
        assert_eq!(form.description, "Aspirin and Warfarin");
    }

    #[test]
    fn test_reset_clears_everything_but_listening() {
        let mut form = FormState::new("fr");
        form.image_input = "rx.png".into();
        form.description = "Metformin".into();
        form.conditions[2].checked = true;
        form.language_index = 0;
        form.focus = FormFocus::Language;
        form.notice = Some(Notice::error("boom"));
        form.listening = true;

        form.reset();

        assert!(form.image_input.is_empty());
        assert!(form.description.is_empty());
        assert!(form.checked_conditions().is_empty());
        assert_eq!(form.language().code, "fr");
        assert_eq!(form.focus, FormFocus::Images);
        assert!(form.notice.is_none());
        assert!(form.listening);
    }

    #[test]
    fn test_submission_snapshot() {
        let mut form = FormState::default();
        form.image_input = "front.png;back.png".into();
        form.description = "  Ibuprofen ".into();
        let submission = form.submission();
        assert_eq!(submission.image_paths.len(), 2);
        assert_eq!(submission.description, "  Ibuprofen ");
        assert_eq!(submission.language, "en");
        assert!(submission.conditions.is_empty());
    }
}
