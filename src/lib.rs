//! # RxGuard
//!
//! Terminal client for a prescription drug-interaction analysis service.
//!
//! This crate provides:
//! - A form for prescription images, medication text, patient conditions and language
//! - Submission of one multipart request per analysis to the remote service
//! - Rendering of the risk level, detected medicines, alert and safer alternatives
//! - Optional voice dictation through an external speech command
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Request and response types, condition and language catalogs
//! - `ports`: Trait definitions for the analysis service and the speech engine
//! - `adapters`: Concrete implementations (reqwest HTTP client, speech command, log sanitizer)
//! - `application`: Submission and result rendering use cases
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::ClientConfig;
pub use domain::{AnalysisRequest, AnalysisResponse};

/// Result type for RxGuard operations
pub type Result<T> = std::result::Result<T, RxGuardError>;

/// Main error type for RxGuard
#[derive(Debug, thiserror::Error)]
pub enum RxGuardError {
    #[error("Analysis service error: {0}")]
    Api(#[from] ports::ApiError),

    #[error("Voice input error: {0}")]
    Speech(#[from] ports::SpeechError),
}
