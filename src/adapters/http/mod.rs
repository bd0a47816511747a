//! HTTP adapter: reqwest client for the analysis service.
//!
//! Uses the blocking client; calls are made from worker threads, never from
//! the UI loop.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};

use crate::config::ClientConfig;
use crate::domain::{AnalysisEnvelope, AnalysisRequest, AnalysisResponse, FormPart};
use crate::ports::{AnalysisApi, ApiError, ServiceHealth};

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const HEALTH_PATH: &str = "/health";

/// Longest error body kept for logs.
const MAX_ERROR_BODY: usize = 512;

/// Analysis service client.
pub struct HttpAnalysisClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpAnalysisClient {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    /// Create a client from the loaded configuration.
    ///
    /// # Errors
    /// See [`HttpAnalysisClient::new`].
    pub fn from_config(config: &ClientConfig) -> crate::Result<Self> {
        Ok(Self::new(&config.api_base_url, config.request_timeout_secs)?)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else {
            ApiError::Transport(e.to_string())
        }
    }

    /// Read a response body, rejecting non-success statuses.
    fn read_success_body(&self, response: reqwest::blocking::Response) -> Result<String, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.text().map_err(|e| self.map_send_error(e))
    }
}

/// Convert a request into a reqwest multipart form, preserving field order.
fn build_form(request: &AnalysisRequest) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in request.parts() {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, attachment } => {
                let file = Part::bytes(attachment.bytes.clone())
                    .file_name(attachment.file_name.clone())
                    .mime_str(&attachment.mime_type)
                    .map_err(|e| ApiError::Transport(e.to_string()))?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

/// Parse the `/api/analyze` success body.
pub fn parse_analysis_body(body: &str) -> Result<AnalysisResponse, ApiError> {
    let envelope: AnalysisEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    envelope
        .data
        .ok_or_else(|| ApiError::Malformed("missing `data` object".to_string()))
}

impl AnalysisApi for HttpAnalysisClient {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ApiError> {
        let url = format!("{}{}", self.base_url, ANALYZE_PATH);
        let form = build_form(request)?;

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let body = self.read_success_body(response)?;
        parse_analysis_body(&body)
    }

    fn health(&self) -> Result<ServiceHealth, ApiError> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let body = self.read_success_body(response)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}
