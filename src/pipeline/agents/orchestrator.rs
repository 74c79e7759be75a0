//! Orchestrator Agent
//!
//! Runs only for flagged content. Selects 1-3 specialists; the bound is
//! enforced here on the raw identifier list, before unknown identifiers
//! are filtered out at dispatch.

use tracing::info;

use super::{StagePrompts, call_stage};
use crate::constants::pipeline::{MAX_SPECIALISTS, MIN_SPECIALISTS};
use crate::infer::{CompletionBackend, ResponseSchemas};
use crate::types::{AnalysisRequest, CredError, Result, ScreenerVerdict, SpecialistPlan};

pub struct OrchestratorAgent;

impl OrchestratorAgent {
    pub async fn run(
        backend: &dyn CompletionBackend,
        request: &AnalysisRequest,
        verdict: &ScreenerVerdict,
    ) -> Result<SpecialistPlan> {
        info!("Orchestrator selecting specialists");

        let plan: SpecialistPlan = call_stage(
            backend,
            "orchestrator",
            StagePrompts::orchestrator_system(),
            &StagePrompts::orchestrator_user(request, verdict),
            &ResponseSchemas::orchestrator(),
        )
        .await?;

        let count = plan.selected_specialists.len();
        if !(MIN_SPECIALISTS..=MAX_SPECIALISTS).contains(&count) {
            return Err(CredError::malformed(format!(
                "orchestrator selected {} specialists, expected {} to {}",
                count, MIN_SPECIALISTS, MAX_SPECIALISTS
            )));
        }

        info!("Orchestrator selected: {:?}", plan.selected_specialists);
        Ok(plan)
    }
}
