//! Analysis request types.
//!
//! A request is assembled from the form on every submission attempt and
//! dropped once the worker has sent it.

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroize;

/// Multipart field carrying one prescription image (repeated per image).
pub const FIELD_IMAGE: &str = "image";
/// Multipart field carrying the free-text medication description.
pub const FIELD_DESCRIPTION: &str = "description";
/// Multipart field carrying the selected language code.
pub const FIELD_LANGUAGE: &str = "language";
/// Multipart field carrying the comma-joined patient conditions.
pub const FIELD_CONDITIONS: &str = "conditions";

/// Separator used when joining checked conditions into one field.
pub const CONDITION_SEPARATOR: &str = ", ";

/// Errors raised while assembling a request, before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no prescription image and no medication details were provided")]
    NothingToAnalyze,

    #[error("cannot read image {path}: {reason}")]
    UnreadableImage { path: String, reason: String },
}

impl ValidationError {
    /// Message shown on the input panel.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NothingToAnalyze => "Action Required: Please upload at least one prescription image OR enter medication details.".to_string(),
            Self::UnreadableImage { path, .. } => {
                format!("Cannot read image file: {path}")
            }
        }
    }
}

/// One prescription image loaded into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    /// Build an attachment from raw bytes, guessing the MIME type from the name.
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Load an attachment from disk.
    ///
    /// # Errors
    /// Returns `ValidationError::UnreadableImage` if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let bytes = std::fs::read(path).map_err(|e| ValidationError::UnreadableImage {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file_name = display_name(path);
        Ok(Self::from_bytes(file_name, bytes))
    }
}

// Image bytes stay out of debug output and logs.
impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// File name shown to the user for a selected path.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Split the image selector text into paths.
///
/// Paths are separated by `;` or newlines; blank entries are skipped.
#[must_use]
pub fn parse_image_paths(input: &str) -> Vec<PathBuf> {
    input
        .split(|c| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// One multipart field of an outbound request, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart<'a> {
    Text { name: &'static str, value: String },
    File {
        name: &'static str,
        attachment: &'a ImageAttachment,
    },
}

/// Payload sent to the analysis endpoint.
#[derive(Debug)]
pub struct AnalysisRequest {
    images: Vec<ImageAttachment>,
    description: Option<String>,
    conditions: Vec<String>,
    language: String,
}

impl AnalysisRequest {
    /// Build a request, enforcing that there is something to analyze.
    ///
    /// The description is trimmed; an all-whitespace description counts as absent.
    ///
    /// # Errors
    /// Returns `ValidationError::NothingToAnalyze` when there are no images
    /// and no description.
    pub fn new(
        images: Vec<ImageAttachment>,
        description: &str,
        conditions: Vec<String>,
        language: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let description = description.trim();
        if images.is_empty() && description.is_empty() {
            return Err(ValidationError::NothingToAnalyze);
        }

        Ok(Self {
            images,
            description: (!description.is_empty()).then(|| description.to_string()),
            conditions,
            language: language.into(),
        })
    }

    #[must_use]
    pub fn images(&self) -> &[ImageAttachment] {
        &self.images
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Conditions as sent on the wire, or `None` when nothing is checked.
    #[must_use]
    pub fn joined_conditions(&self) -> Option<String> {
        if self.conditions.is_empty() {
            None
        } else {
            Some(self.conditions.join(CONDITION_SEPARATOR))
        }
    }

    /// Multipart fields in the order they are sent.
    #[must_use]
    pub fn parts(&self) -> Vec<FormPart<'_>> {
        let mut parts: Vec<FormPart<'_>> = self
            .images
            .iter()
            .map(|attachment| FormPart::File {
                name: FIELD_IMAGE,
                attachment,
            })
            .collect();

        if let Some(description) = &self.description {
            parts.push(FormPart::Text {
                name: FIELD_DESCRIPTION,
                value: description.clone(),
            });
        }

        parts.push(FormPart::Text {
            name: FIELD_LANGUAGE,
            value: self.language.clone(),
        });

        if let Some(conditions) = self.joined_conditions() {
            parts.push(FormPart::Text {
                name: FIELD_CONDITIONS,
                value: conditions,
            });
        }

        parts
    }
}

impl Drop for AnalysisRequest {
    fn drop(&mut self) {
        if let Some(description) = self.description.as_mut() {
            description.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_names(request: &AnalysisRequest) -> Vec<&'static str> {
        request
            .parts()
            .iter()
            .map(|p| match p {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => *name,
            })
            .collect()
    }

    #[test]
    fn test_rejects_empty_submission() {
        let err = AnalysisRequest::new(vec![], "", vec![], "en").unwrap_err();
        assert_eq!(err, ValidationError::NothingToAnalyze);

        let err = AnalysisRequest::new(vec![], "   \n\t ", vec!["Pregnancy".into()], "en")
            .unwrap_err();
        assert_eq!(err, ValidationError::NothingToAnalyze);
        assert!(err.user_message().starts_with("Action Required"));
    }

    #[test]
    fn test_description_only_request() {
        let request = AnalysisRequest::new(vec![], "  Amoxicillin 500mg ", vec![], "en")
            .expect("description is enough");

        assert_eq!(request.description(), Some("Amoxicillin 500mg"));
        assert!(request.images().is_empty());
        assert_eq!(field_names(&request), vec![FIELD_DESCRIPTION, FIELD_LANGUAGE]);
    }

    #[test]
    fn test_images_repeat_field_and_skip_blank_description() {
        let images = vec![
            ImageAttachment::from_bytes("front.png", vec![1, 2, 3]),
            ImageAttachment::from_bytes("back.jpg", vec![4, 5]),
        ];
        let request = AnalysisRequest::new(images, "  ", vec![], "hi").expect("images are enough");

        assert_eq!(request.description(), None);
        assert_eq!(
            field_names(&request),
            vec![FIELD_IMAGE, FIELD_IMAGE, FIELD_LANGUAGE]
        );
        assert_eq!(request.images()[0].mime_type, "image/png");
        assert_eq!(request.images()[1].mime_type, "image/jpeg");
    }

    #[test]
    fn test_conditions_field_present_only_when_checked() {
        let without = AnalysisRequest::new(vec![], "Ibuprofen", vec![], "en").unwrap();
        assert!(!field_names(&without).contains(&FIELD_CONDITIONS));
        assert_eq!(without.joined_conditions(), None);

        let with = AnalysisRequest::new(
            vec![],
            "Ibuprofen",
            vec!["Pregnancy".into(), "Kidney Disease".into()],
            "en",
        )
        .unwrap();
        let last = with.parts().pop().expect("has parts");
        assert_eq!(
            last,
            FormPart::Text {
                name: FIELD_CONDITIONS,
                value: "Pregnancy, Kidney Disease".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_image_paths() {
        let paths = parse_image_paths(" a.png ; ;b/c.jpg\n\n d.jpeg ");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.png"),
                PathBuf::from("b/c.jpg"),
                PathBuf::from("d.jpeg")
            ]
        );
        assert!(parse_image_paths("   ").is_empty());
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let err = ImageAttachment::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
        match err {
            ValidationError::UnreadableImage { path, .. } => assert!(path.ends_with("here.png")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_image_bytes() {
        let image = ImageAttachment::from_bytes("rx.png", vec![0xde, 0xad, 0xbe, 0xef]);
        let debug = format!("{image:?}");
        assert!(debug.contains("len: 4"));
        assert!(!debug.contains("222"));
    }
}
