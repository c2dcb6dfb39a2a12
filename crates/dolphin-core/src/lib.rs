//! Scoring engine for free-text personality assessment responses.
//!
//! Responses are classified against three weighted lexicons (self, concept and
//! adjusted) and normalized into per-group percentages plus a derived decision
//! approach value.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod report;
pub mod scoring;
pub mod store;
pub mod telemetry;
