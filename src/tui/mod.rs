//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the three panels of the client:
//! - Prescription input form (images, medication text, conditions, language)
//! - Loading indicator while the analysis service works
//! - Analysis result with risk badge, medicines, alert and alternatives

mod app;
mod panel;
mod styles;
mod ui;
mod worker;

pub use app::{App, ANALYSIS_FAILED_MESSAGE, VOICE_UNSUPPORTED_MESSAGE};
pub use panel::{PanelMode, PanelState};
pub use styles::MedicalTheme;
pub use worker::{AnalysisOutcome, AnalysisWorker, DictationWorker, HealthProbe, WorkerHandle, WorkerPoll};
