//! Summarizer Agent
//!
//! Final synthesis stage. Its raw output goes through strict summary
//! validation before becoming the pipeline result, since this is the
//! one payload callers actually see.

use tracing::info;

use super::{SpecialistKind, StagePrompts};
use crate::infer::{CompletionBackend, ResponseSchemas, validate_summary};
use crate::types::{AnalysisRequest, Result, ScreenerVerdict, SpecialistReport, SummaryReport};

pub struct SummarizerAgent;

impl SummarizerAgent {
    pub async fn run(
        backend: &dyn CompletionBackend,
        request: &AnalysisRequest,
        verdict: &ScreenerVerdict,
        specialist_reports: &[(SpecialistKind, SpecialistReport)],
    ) -> Result<SummaryReport> {
        info!(
            "Summarizer synthesizing {} specialist report(s)",
            specialist_reports.len()
        );

        let raw = backend
            .complete(
                StagePrompts::summarizer_system(),
                &StagePrompts::summarizer_user(request, verdict, specialist_reports),
                &ResponseSchemas::summary(),
            )
            .await?;

        let summary = validate_summary(&raw)?;
        info!("Final credibility score: {}", summary.credibility_score);
        Ok(summary)
    }
}
