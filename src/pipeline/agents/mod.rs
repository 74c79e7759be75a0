//! Pipeline Agents
//!
//! One module per stage:
//! - ScreenerAgent: fast triage, decides whether deep analysis is needed
//! - OrchestratorAgent: picks 1-3 specialists for flagged content
//! - SpecialistAgent: one focused analysis dimension (five kinds)
//! - SummarizerAgent: synthesizes everything into the final report
//!
//! Agents are stateless; each holds only its `SpecialistKind` where
//! applicable and borrows the backend per call.

pub mod orchestrator;
pub mod prompts;
pub mod screener;
pub mod specialist;
pub mod summarizer;

pub use orchestrator::OrchestratorAgent;
pub use prompts::StagePrompts;
pub use screener::ScreenerAgent;
pub use specialist::SpecialistAgent;
pub use summarizer::SummarizerAgent;

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::infer::CompletionBackend;
use crate::types::{CredError, Result};

// =============================================================================
// Specialist Kinds
// =============================================================================

/// The closed set of specialist analyses.
///
/// Identifiers are the wire strings used in prompts and in orchestrator
/// output; unknown identifiers from the model are skipped at dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialistKind {
    CognitiveBias,
    EmotionalManipulation,
    LogicalFallacy,
    SourceCredibility,
    TechnicalAccuracy,
}

impl SpecialistKind {
    pub const ALL: [SpecialistKind; 5] = [
        SpecialistKind::CognitiveBias,
        SpecialistKind::EmotionalManipulation,
        SpecialistKind::LogicalFallacy,
        SpecialistKind::SourceCredibility,
        SpecialistKind::TechnicalAccuracy,
    ];

    /// Wire identifier used in prompts and orchestrator output
    pub fn id(&self) -> &'static str {
        match self {
            Self::CognitiveBias => "cognitive_bias",
            Self::EmotionalManipulation => "emotional_manipulation",
            Self::LogicalFallacy => "logical_fallacy",
            Self::SourceCredibility => "source_credibility",
            Self::TechnicalAccuracy => "technical_accuracy",
        }
    }

    /// Human-readable name used in summarizer prompts and logs
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CognitiveBias => "CognitiveBias",
            Self::EmotionalManipulation => "EmotionalManipulation",
            Self::LogicalFallacy => "LogicalFallacy",
            Self::SourceCredibility => "SourceCredibility",
            Self::TechnicalAccuracy => "TechnicalAccuracy",
        }
    }

    /// Name of the issue-list field this specialist reports under
    pub fn issue_field(&self) -> &'static str {
        match self {
            Self::CognitiveBias => "biases_identified",
            Self::EmotionalManipulation => "manipulation_tactics",
            Self::LogicalFallacy => "fallacies_identified",
            Self::SourceCredibility => "credibility_issues",
            Self::TechnicalAccuracy => "accuracy_issues",
        }
    }

    /// Name of the per-issue type field this specialist reports
    pub fn label_field(&self) -> &'static str {
        match self {
            Self::CognitiveBias => "bias_type",
            Self::EmotionalManipulation => "tactic_type",
            Self::LogicalFallacy => "fallacy_type",
            Self::SourceCredibility => "issue_type",
            Self::TechnicalAccuracy => "issue_type",
        }
    }
}

impl FromStr for SpecialistKind {
    type Err = CredError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "cognitive_bias" => Ok(Self::CognitiveBias),
            "emotional_manipulation" => Ok(Self::EmotionalManipulation),
            "logical_fallacy" => Ok(Self::LogicalFallacy),
            "source_credibility" => Ok(Self::SourceCredibility),
            "technical_accuracy" => Ok(Self::TechnicalAccuracy),
            other => Err(CredError::InvalidInput(format!(
                "unknown specialist '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SpecialistKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// =============================================================================
// Shared Stage Runner
// =============================================================================

/// Run one completion and parse the result into the stage's typed output.
///
/// Parse failures map to `InferenceResponseMalformed` with the stage name
/// so the coordinator can report which stage produced garbage.
pub(crate) async fn call_stage<T: DeserializeOwned>(
    backend: &dyn CompletionBackend,
    stage: &str,
    system: &str,
    user: &str,
    schema: &Value,
) -> Result<T> {
    let raw = backend.complete(system, user, schema).await?;
    serde_json::from_value(raw).map_err(|e| {
        CredError::malformed(format!("{} output did not match expected shape: {}", stage, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in SpecialistKind::ALL {
            assert_eq!(kind.id().parse::<SpecialistKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!("sentiment_analysis".parse::<SpecialistKind>().is_err());
    }

    #[test]
    fn test_field_names_are_distinct_per_list() {
        let fields: std::collections::HashSet<_> =
            SpecialistKind::ALL.iter().map(|k| k.issue_field()).collect();
        assert_eq!(fields.len(), 5);
    }
}
