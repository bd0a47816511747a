//! Main TUI application state machine.
//!
//! Handles:
//! - Panel transitions (input, loading, results)
//! - Input event handling
//! - Background analysis, dictation and health-probe workers

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::http::HttpAnalysisClient;
use crate::adapters::speech::capability_from_config;
use crate::application::{render_response, AnalysisService, ResultView};
use crate::config::ClientConfig;
use crate::ports::{AnalysisApi, ApiError, ServiceHealth, SpeechCapability, SpeechError};

use super::panel::{PanelMode, PanelState};
use super::ui::{
    form::{render_form, FormState},
    loading::render_loading,
    render_disclaimer, render_header,
    results::render_results,
    Notice, ServiceStatus,
};
use super::worker::{
    AnalysisOutcome, AnalysisWorker, DictationWorker, HealthProbe, WorkerHandle, WorkerPoll,
};

/// Shown for every network, status or parse failure.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "System Error: Unable to complete analysis. Please try again.";

/// Shown when no dictation engine is configured.
pub const VOICE_UNSUPPORTED_MESSAGE: &str = "Voice input is not supported in this environment.";

/// Main application state
pub struct App {
    config: ClientConfig,

    service: AnalysisService,

    speech: SpeechCapability,

    /// Which panel is visible
    panel: PanelState,

    form: FormState,

    /// Content of the result panel
    result_view: ResultView,

    /// When the displayed result arrived
    completed_at: Option<DateTime<Local>>,

    service_status: ServiceStatus,

    /// In-flight submission; while set, submitting is disabled
    pending_analysis: Option<WorkerHandle<AnalysisOutcome>>,

    pending_dictation: Option<WorkerHandle<Result<String, SpeechError>>>,

    pending_health: Option<WorkerHandle<Result<ServiceHealth, ApiError>>>,

    /// When the loading panel appeared (for the spinner)
    loading_started_at: Option<Instant>,

    should_quit: bool,
}

impl App {
    /// Create the application with the HTTP client and the configured
    /// dictation engine.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the dictation
    /// command line is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api = HttpAnalysisClient::from_config(&config)?;
        let speech = capability_from_config(&config)?;

        tracing::info!(
            api = api.base_url(),
            dictation = speech.is_available(),
            "Client configured"
        );

        Ok(Self::with_dependencies(config, Arc::new(api), speech))
    }

    /// Create the application with injected collaborators.
    pub fn with_dependencies(
        config: ClientConfig,
        api: Arc<dyn AnalysisApi>,
        speech: SpeechCapability,
    ) -> Self {
        let form = FormState::new(&config.default_language);
        Self {
            config,
            service: AnalysisService::new(api),
            speech,
            panel: PanelState::default(),
            form,
            result_view: ResultView::default(),
            completed_at: None,
            service_status: ServiceStatus::Checking,
            pending_analysis: None,
            pending_dictation: None,
            pending_health: None,
            loading_started_at: None,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        self.start_health_probe();

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();

            terminal.draw(|f| self.draw(f))?;

            // Short poll keeps the spinner moving and workers drained.
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(f.area());

        render_header(f, chunks[0], &self.config.api_base_url, self.service_status);

        match self.panel.mode() {
            PanelMode::Input => render_form(f, chunks[1], &self.form),
            PanelMode::Loading => {
                let elapsed = self
                    .loading_started_at
                    .map(|t| t.elapsed())
                    .unwrap_or_default();
                render_loading(f, chunks[1], elapsed);
            }
            PanelMode::Results => {
                render_results(f, chunks[1], &self.result_view, self.completed_at)
            }
        }

        render_disclaimer(f, chunks[2]);
    }

    fn start_health_probe(&mut self) {
        self.service_status = ServiceStatus::Checking;
        self.pending_health = Some(HealthProbe::spawn(self.service.clone()));
    }

    /// Drain every background worker.
    fn poll_workers(&mut self) {
        self.poll_analysis();
        self.poll_dictation();
        self.poll_health();
    }

    fn poll_analysis(&mut self) {
        let Some(worker) = self.pending_analysis.as_ref() else {
            return;
        };

        let outcome = match worker.try_recv() {
            WorkerPoll::Pending => return,
            WorkerPoll::Ready(outcome) => outcome,
            WorkerPoll::Lost => {
                tracing::error!("Analysis worker exited without a result");
                AnalysisOutcome::Failed(ApiError::Transport("analysis worker stopped".to_string()))
            }
        };
        self.pending_analysis = None;
        self.loading_started_at = None;

        match outcome {
            AnalysisOutcome::Complete {
                response,
                completed_at,
            } => {
                render_response(&mut self.result_view, &response);
                self.completed_at = Some(completed_at);
                self.panel.show_results();
            }
            AnalysisOutcome::Failed(_) => {
                // Details were logged by the service; the user sees one generic notice.
                self.result_view.clear();
                self.completed_at = None;
                self.panel.revert_to_input();
                self.form.notice = Some(Notice::error(ANALYSIS_FAILED_MESSAGE));
            }
        }
    }

    fn poll_dictation(&mut self) {
        let Some(worker) = self.pending_dictation.as_ref() else {
            return;
        };

        let result = match worker.try_recv() {
            WorkerPoll::Pending => return,
            WorkerPoll::Ready(result) => result,
            WorkerPoll::Lost => Err(SpeechError::Failed("dictation worker stopped".to_string())),
        };
        self.pending_dictation = None;
        self.form.listening = false;

        match result {
            Ok(transcript) => {
                tracing::info!(chars = transcript.chars().count(), "Dictation captured");
                self.form.append_transcript(&transcript);
            }
            Err(SpeechError::NoMatch) => {
                tracing::info!("Dictation ended without recognized speech");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dictation failed");
                self.form.notice = Some(Notice::info(format!("Voice input failed: {e}")));
            }
        }
    }

    fn poll_health(&mut self) {
        let Some(worker) = self.pending_health.as_ref() else {
            return;
        };

        self.service_status = match worker.try_recv() {
            WorkerPoll::Pending => return,
            WorkerPoll::Ready(Ok(health)) if health.is_healthy() => {
                tracing::info!(service = ?health.service, "Analysis service is healthy");
                ServiceStatus::Online
            }
            WorkerPoll::Ready(Ok(health)) => {
                tracing::warn!(status = %health.status, "Analysis service reports unhealthy");
                ServiceStatus::Offline
            }
            WorkerPoll::Ready(Err(e)) => {
                tracing::warn!(category = e.category(), error = %e, "Health probe failed");
                ServiceStatus::Offline
            }
            WorkerPoll::Lost => ServiceStatus::Offline,
        };
        self.pending_health = None;
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match self.panel.mode() {
            PanelMode::Input => self.handle_input_key(key, modifiers),
            // Nothing to do but wait.
            PanelMode::Loading => {}
            PanelMode::Results => self.handle_results_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('d') => self.start_dictation(),
                KeyCode::Char('r') => self.reset_form(),
                KeyCode::Char('l') => self.form.load_sample_data(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Enter => self.submit_analysis(),
            KeyCode::Tab | KeyCode::Down => self.form.next_focus(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_focus(),
            KeyCode::Left => self.form.move_left(),
            KeyCode::Right => self.form.move_right(),
            KeyCode::Char(c) => self.form.input_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.clear_field(),
            KeyCode::Esc => self.form.notice = None,
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => self.reset_form(),
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Esc => {
                self.panel.edit_input();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Validate the form and hand the request to a background worker.
    fn submit_analysis(&mut self) {
        if self.pending_analysis.is_some() {
            tracing::warn!("Submission ignored: an analysis is already in flight");
            return;
        }

        let request = match self.service.prepare(&self.form.submission()) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!(reason = %e, "Submission rejected by validation");
                self.form.notice = Some(Notice::error(e.user_message()));
                return;
            }
        };

        if !self.panel.begin_submission() {
            return;
        }
        self.form.notice = None;
        self.result_view.clear();
        self.completed_at = None;
        self.loading_started_at = Some(Instant::now());

        self.pending_analysis = Some(AnalysisWorker::spawn(
            self.service.clone(),
            request,
            self.config.display_delay,
        ));
    }

    fn start_dictation(&mut self) {
        let Some(recognizer) = self.speech.recognizer() else {
            self.form.notice = Some(Notice::info(VOICE_UNSUPPORTED_MESSAGE));
            return;
        };

        if self.pending_dictation.is_some() {
            tracing::debug!("Dictation already running");
            return;
        }

        tracing::info!(engine = recognizer.name(), locale = %self.config.speech_locale, "Dictation started");
        self.form.listening = true;
        self.form.notice = None;
        self.pending_dictation = Some(DictationWorker::spawn(
            recognizer,
            self.config.speech_locale.clone(),
        ));
    }

    /// Return to a blank input panel.
    fn reset_form(&mut self) {
        self.form.reset();
        self.panel.reset();
        self.result_view.clear();
        self.completed_at = None;
    }
}
