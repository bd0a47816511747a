//! Domain layer: request and response types for prescription analysis.
//!
//! Pure types with no I/O beyond loading selected image files.

mod analysis;
pub mod catalog;
mod request;

pub use analysis::{AnalysisEnvelope, AnalysisResponse, ThemeColor, UNKNOWN_RISK_LABEL};
pub use request::{
    display_name, parse_image_paths, AnalysisRequest, FormPart, ImageAttachment, ValidationError,
    CONDITION_SEPARATOR, FIELD_CONDITIONS, FIELD_DESCRIPTION, FIELD_IMAGE, FIELD_LANGUAGE,
};
