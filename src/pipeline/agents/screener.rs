//! Screener Agent
//!
//! First pass over the text. Cheap relative to the specialists, so it
//! runs on everything and gates the rest of the pipeline.

use tracing::info;

use super::{StagePrompts, call_stage};
use crate::infer::{CompletionBackend, ResponseSchemas};
use crate::types::{AnalysisRequest, Result, ScreenerVerdict};

pub struct ScreenerAgent;

impl ScreenerAgent {
    pub async fn run(
        backend: &dyn CompletionBackend,
        request: &AnalysisRequest,
    ) -> Result<ScreenerVerdict> {
        info!("Screener agent analyzing text");

        let verdict: ScreenerVerdict = call_stage(
            backend,
            "screener",
            StagePrompts::screener_system(),
            &StagePrompts::screener_user(request),
            &ResponseSchemas::screener(),
        )
        .await?;

        info!(
            "Screener assessment: {}",
            if verdict.needs_deep_analysis {
                "Needs deeper analysis"
            } else {
                "No issues detected"
            }
        );

        Ok(verdict)
    }
}
