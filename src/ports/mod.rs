//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundaries between the application and the
//! outside world (the analysis service, the speech engine).

mod analysis_api;
mod speech;

pub use analysis_api::{AnalysisApi, ApiError, ServiceHealth};
pub use speech::{SpeechCapability, SpeechError, SpeechRecognizer};
