//! Submission service: turns form input into an analysis request and runs it.
//!
//! This service coordinates:
//! - Client-side validation (before any file or network I/O)
//! - Loading selected prescription images
//! - The single outbound call to the analysis service
//! - Diagnostic logging of the outcome

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::{AnalysisRequest, AnalysisResponse, ImageAttachment, ValidationError};
use crate::ports::{AnalysisApi, ApiError, ServiceHealth};

/// Form values captured at the moment the user submits.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub image_paths: Vec<PathBuf>,
    pub description: String,
    /// Checked conditions in display order.
    pub conditions: Vec<String>,
    pub language: String,
}

/// Service for submitting prescriptions to the analysis API.
#[derive(Clone)]
pub struct AnalysisService {
    api: Arc<dyn AnalysisApi>,
}

impl AnalysisService {
    pub fn new(api: Arc<dyn AnalysisApi>) -> Self {
        Self { api }
    }

    /// Validate the submission and load its images.
    ///
    /// The emptiness check runs first so an empty form never touches the disk.
    ///
    /// # Errors
    /// `ValidationError::NothingToAnalyze` for an empty form, or
    /// `ValidationError::UnreadableImage` for the first file that cannot be read.
    pub fn prepare(&self, submission: &Submission) -> Result<AnalysisRequest, ValidationError> {
        if submission.image_paths.is_empty() && submission.description.trim().is_empty() {
            return Err(ValidationError::NothingToAnalyze);
        }

        let images = submission
            .image_paths
            .iter()
            .map(|p| ImageAttachment::from_path(p))
            .collect::<Result<Vec<_>, _>>()?;

        AnalysisRequest::new(
            images,
            &submission.description,
            submission.conditions.clone(),
            submission.language.clone(),
        )
    }

    /// Send one request and wait for the result.
    ///
    /// # Errors
    /// Propagates the `ApiError` after logging it with its category.
    pub fn run(&self, request: AnalysisRequest) -> Result<AnalysisResponse, ApiError> {
        let request_id = uuid::Uuid::new_v4();
        let started = Instant::now();

        tracing::info!(
            %request_id,
            images = request.images().len(),
            description_len = request.description().map_or(0, str::len),
            conditions = request.conditions().len(),
            language = request.language(),
            "Submitting prescription for analysis"
        );

        let result = self.api.analyze(&request);
        drop(request);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(response) => tracing::info!(
                %request_id,
                elapsed_ms,
                risk = response.risk_label(),
                medicines = response.medicines_found.as_ref().map_or(0, Vec::len),
                alternatives = response.alternatives.as_ref().map_or(0, Vec::len),
                "Analysis complete"
            ),
            Err(ApiError::Status { status, body }) => tracing::error!(
                %request_id,
                elapsed_ms,
                status,
                body = body.as_str(),
                "Analysis service rejected the request"
            ),
            Err(e) => tracing::error!(
                %request_id,
                elapsed_ms,
                category = e.category(),
                error = %e,
                "Analysis request failed"
            ),
        }

        result
    }

    /// Probe the service health endpoint.
    ///
    /// # Errors
    /// Propagates the `ApiError` from the port.
    pub fn health(&self) -> Result<ServiceHealth, ApiError> {
        self.api.health()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted `AnalysisApi` shared by application and TUI tests.

    use super::*;
    use std::sync::Mutex;

    /// What one recorded call carried on the wire.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        pub image_names: Vec<String>,
        pub description: Option<String>,
        pub conditions: Option<String>,
        pub language: String,
    }

    pub struct ScriptedApi {
        pub outcome: Mutex<Result<AnalysisResponse, ApiError>>,
        pub calls: Mutex<Vec<RecordedCall>>,
        pub healthy: bool,
    }

    impl ScriptedApi {
        pub fn succeeding(response: AnalysisResponse) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Ok(response)),
                calls: Mutex::new(Vec::new()),
                healthy: true,
            })
        }

        pub fn failing(error: ApiError) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Err(error)),
                calls: Mutex::new(Vec::new()),
                healthy: false,
            })
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AnalysisApi for ScriptedApi {
        fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ApiError> {
            self.calls.lock().unwrap().push(RecordedCall {
                image_names: request.images().iter().map(|i| i.file_name.clone()).collect(),
                description: request.description().map(str::to_string),
                conditions: request.joined_conditions(),
                language: request.language().to_string(),
            });
            self.outcome.lock().unwrap().clone()
        }

        fn health(&self) -> Result<ServiceHealth, ApiError> {
            if self.healthy {
                Ok(ServiceHealth {
                    status: "healthy".to_string(),
                    service: Some("Drug Interaction API".to_string()),
                })
            } else {
                Err(ApiError::Connection("http://localhost:5000".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{RecordedCall, ScriptedApi};
    use super::*;
    use std::io::Write;

    fn submission(description: &str) -> Submission {
        Submission {
            description: description.to_string(),
            language: "en".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_form_is_rejected_without_io() {
        let api = ScriptedApi::succeeding(AnalysisResponse::default());
        let service = AnalysisService::new(api.clone());

        for description in ["", "   ", "\n\t"] {
            let err = service.prepare(&submission(description)).unwrap_err();
            assert_eq!(err, ValidationError::NothingToAnalyze);
        }
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_description_only_round_trip() {
        let api = ScriptedApi::succeeding(AnalysisResponse {
            risk_level: Some("Low".into()),
            ..Default::default()
        });
        let service = AnalysisService::new(api.clone());

        let request = service.prepare(&submission("Amoxicillin 500mg")).unwrap();
        let response = service.run(request).unwrap();

        assert_eq!(response.risk_label(), "Low");
        assert_eq!(
            api.calls(),
            vec![RecordedCall {
                image_names: vec![],
                description: Some("Amoxicillin 500mg".into()),
                conditions: None,
                language: "en".into(),
            }]
        );
    }

    #[test]
    fn test_images_loaded_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prescription.jpg");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"\xff\xd8\xff fake jpeg")
            .unwrap();

        let api = ScriptedApi::succeeding(AnalysisResponse::default());
        let service = AnalysisService::new(api.clone());
        let request = service
            .prepare(&Submission {
                image_paths: vec![path],
                conditions: vec!["Diabetes".into(), "Asthma".into()],
                language: "fr".into(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(request.images()[0].mime_type, "image/jpeg");
        service.run(request).unwrap();

        let call = &api.calls()[0];
        assert_eq!(call.image_names, vec!["prescription.jpg"]);
        assert_eq!(call.description, None);
        assert_eq!(call.conditions.as_deref(), Some("Diabetes, Asthma"));
        assert_eq!(call.language, "fr");
    }

    #[test]
    fn test_unreadable_image_blocks_submission() {
        let api = ScriptedApi::succeeding(AnalysisResponse::default());
        let service = AnalysisService::new(api.clone());

        let err = service
            .prepare(&Submission {
                image_paths: vec![PathBuf::from("/no/such/rx.png")],
                description: "Ibuprofen".into(),
                language: "en".into(),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, ValidationError::UnreadableImage { .. }));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_api_errors_propagate() {
        let api = ScriptedApi::failing(ApiError::Status {
            status: 502,
            body: "bad gateway".into(),
        });
        let service = AnalysisService::new(api);

        let request = service.prepare(&submission("Warfarin")).unwrap();
        assert!(matches!(service.run(request), Err(ApiError::Status { status: 502, .. })));
        assert!(service.health().is_err());
    }
}
