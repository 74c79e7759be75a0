//! Specialist Agent
//!
//! One focused analysis dimension per `SpecialistKind`. All five kinds
//! share the same execution path; only prompts and field names differ.

use tracing::info;

use super::{SpecialistKind, StagePrompts, call_stage};
use crate::infer::{CompletionBackend, ResponseSchemas};
use crate::types::{AnalysisRequest, Result, SpecialistReport};

pub struct SpecialistAgent {
    kind: SpecialistKind,
}

impl SpecialistAgent {
    pub fn new(kind: SpecialistKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> SpecialistKind {
        self.kind
    }

    pub async fn run(
        &self,
        backend: &dyn CompletionBackend,
        request: &AnalysisRequest,
    ) -> Result<SpecialistReport> {
        info!("{} specialist analyzing text", self.kind.display_name());

        let report: SpecialistReport = call_stage(
            backend,
            self.kind.id(),
            StagePrompts::specialist_system(self.kind),
            &StagePrompts::specialist_user(self.kind, request),
            &ResponseSchemas::specialist(self.kind.issue_field(), self.kind.label_field()),
        )
        .await?;

        info!(
            "{} specialist found {} issue(s)",
            self.kind.display_name(),
            report.findings.len()
        );

        Ok(report)
    }
}
