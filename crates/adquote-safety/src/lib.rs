//! Brand-safety narrative adapter.
//!
//! Sends a compact channel summary plus a fixed six-category rubric to a
//! generative model and parses the structured assessment it returns. The
//! call is advisory and off the valuation's critical path: every failure
//! mode here is recoverable, and the caller renders the price estimate
//! with or without a report.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::GeminiClient;
pub use error::SafetyError;
pub use prompt::SafetyContext;
pub use types::BrandSafetyReport;
