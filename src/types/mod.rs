//! Core Types
//!
//! Unified error type and the typed results every pipeline stage produces.

pub mod error;
pub mod report;

pub use error::{CredError, Result};
pub use report::{
    AnalysisRequest, Finding, Issue, ScreenerVerdict, Severity, SpecialistPlan, SpecialistReport,
    SummaryReport,
};
