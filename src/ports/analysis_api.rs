//! Analysis API port: Trait for the remote prescription-analysis service.
//!
//! This trait abstracts the HTTP transport (reqwest) from the application logic.

use serde::Deserialize;

use crate::domain::{AnalysisRequest, AnalysisResponse};

/// Errors that can occur while talking to the analysis service.
///
/// The UI collapses all of these into one generic notice; the variants exist
/// for logging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("cannot connect to analysis service at {0}")]
    Connection(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("analysis service returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("malformed analysis response: {0}")]
    Malformed(String),

    #[error("HTTP client error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Short category name for structured logs.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Timeout(_) => "timeout",
            Self::Status { .. } => "status",
            Self::Malformed(_) => "malformed",
            Self::Transport(_) => "transport",
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl ServiceHealth {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Trait for the remote analysis service.
pub trait AnalysisApi: Send + Sync {
    /// Submit one request and wait for the risk assessment.
    ///
    /// # Errors
    /// Any transport failure, non-success status or unparseable body.
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ApiError>;

    /// Probe the service health endpoint.
    ///
    /// # Errors
    /// Same conditions as `analyze`.
    fn health(&self) -> Result<ServiceHealth, ApiError>;
}
