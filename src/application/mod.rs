//! Application layer: Use cases and services.
//!
//! This module orchestrates domain types with ports to implement the
//! submit-then-render flow of the client.

pub mod rendering;
mod submission;

pub use rendering::{render_response, AlternativesSection, MedicineDisplay, ResultView, RiskBadge};
pub use submission::{AnalysisService, Submission};

#[cfg(test)]
pub(crate) use submission::testing;
