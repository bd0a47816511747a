//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external systems:
//! - `http`: reqwest client for the analysis service
//! - `speech`: external dictation command
//! - `sanitize`: PII filtering for logs

pub mod http;
pub mod sanitize;
pub mod speech;
