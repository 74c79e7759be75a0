//! Analysis Result Types
//!
//! Typed agent outputs for every pipeline stage. Field names follow the
//! wire contract the prompts request from the model; legacy fields the
//! screener schema still allows are kept as optional and ignored.

use serde::{Deserialize, Serialize};

use crate::constants::pipeline::{MAX_TEXT_CHARS, UNKNOWN_SOURCE};
use crate::types::error::{CredError, Result};

// =============================================================================
// Shared Pieces
// =============================================================================

/// Issue severity as reported by specialists and the summarizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Tone-only, unlikely to affect the core message
    Low,
    /// Noticeable, affects interpretation
    Medium,
    /// Fundamentally misleading
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// A single issue in the final report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue category (e.g., "fear-mongering", "analysis_error")
    #[serde(rename = "type")]
    pub issue_type: String,
    /// Detailed explanation of the issue
    pub explanation: String,
    /// Severity level
    pub severity: Severity,
}

// =============================================================================
// Analysis Request
// =============================================================================

/// Input to one pipeline run. Immutable for the duration of the run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub text: String,
    pub source: String,
}

impl AnalysisRequest {
    /// Validate and build a request. Text must be non-empty and bounded;
    /// an absent source falls back to the "N/A" sentinel.
    pub fn new(text: impl Into<String>, source: Option<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CredError::InvalidInput("text is empty".into()));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(CredError::InvalidInput(format!(
                "text exceeds {} characters",
                MAX_TEXT_CHARS
            )));
        }
        let source = match source {
            Some(s) if !s.trim().is_empty() => s,
            _ => UNKNOWN_SOURCE.to_string(),
        };
        Ok(Self { text, source })
    }
}

// =============================================================================
// Screener Output
// =============================================================================

/// Output of the first-pass screening stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerVerdict {
    /// Whether specialist analysis is warranted
    #[serde(rename = "needsDeepAnalysis")]
    pub needs_deep_analysis: bool,
    /// Reasoning behind the decision
    pub reasoning: String,
    /// Legacy field, accepted but never consulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_score: Option<f64>,
    /// Legacy field, accepted but never consulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_specialists: Option<Vec<String>>,
}

// =============================================================================
// Orchestrator Output
// =============================================================================

/// Output of the specialist-selection stage.
///
/// `selected_specialists` keeps the raw identifiers; mapping to known
/// specialists (and skipping unknown ones) happens at dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistPlan {
    pub selected_specialists: Vec<String>,
    pub reasoning: String,
}

// =============================================================================
// Specialist Output
// =============================================================================

/// One issue found by a specialist, with mandatory textual evidence.
///
/// Each specialist prompt names its own type field (`bias_type`,
/// `tactic_type`, ...); the aliases accept all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    #[serde(
        alias = "bias_type",
        alias = "tactic_type",
        alias = "fallacy_type",
        alias = "issue_type"
    )]
    pub label: String,
    pub explanation: String,
    pub severity: Severity,
    #[serde(default)]
    pub example_from_text: String,
}

/// Output of one specialist stage.
///
/// Each specialist prompt names its own issue-list field
/// (`biases_identified`, `manipulation_tactics`, ...); the aliases accept
/// all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistReport {
    #[serde(
        default,
        alias = "biases_identified",
        alias = "manipulation_tactics",
        alias = "fallacies_identified",
        alias = "credibility_issues",
        alias = "accuracy_issues"
    )]
    pub findings: Vec<Finding>,
    pub overall_assessment: String,
    pub recommendation: String,
}

// =============================================================================
// Final Summary
// =============================================================================

/// The one user-facing verdict of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Overall trustworthiness, 0 (unreliable) to 10 (reliable)
    pub credibility_score: f64,
    /// Issues ordered by severity; empty for reliable content
    #[serde(default)]
    pub potential_issues: Vec<Issue>,
    /// Primary concerns, optional in the wire contract
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_concerns: Option<Vec<String>>,
    /// Actionable guidance for the reader
    pub recommendation: String,
}

impl SummaryReport {
    /// The degraded result returned when any stage fails. The pipeline
    /// never propagates stage failures to the caller; it answers with
    /// this well-formed report instead.
    pub fn degraded(issue_type: &str, explanation: impl Into<String>) -> Self {
        Self {
            credibility_score: 0.0,
            potential_issues: vec![Issue {
                issue_type: issue_type.to_string(),
                explanation: explanation.into(),
                severity: Severity::High,
            }],
            key_concerns: Some(vec![
                "Analysis could not be completed due to an error".to_string(),
            ]),
            recommendation: "Please try again or analyze a different text.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_rejects_empty_text() {
        assert!(AnalysisRequest::new("   ", None).is_err());
    }

    #[test]
    fn test_request_defaults_source() {
        let req = AnalysisRequest::new("some text", None).unwrap();
        assert_eq!(req.source, "N/A");

        let req = AnalysisRequest::new("some text", Some("apnews.com".into())).unwrap();
        assert_eq!(req.source, "apnews.com");
    }

    #[test]
    fn test_request_rejects_oversized_text() {
        let text = "a".repeat(MAX_TEXT_CHARS + 1);
        assert!(AnalysisRequest::new(text, None).is_err());
    }

    #[test]
    fn test_screener_verdict_accepts_legacy_fields() {
        let verdict: ScreenerVerdict = serde_json::from_value(json!({
            "needsDeepAnalysis": true,
            "initial_score": 4,
            "suggested_specialists": ["logical_fallacy"],
            "reasoning": "persuasive framing"
        }))
        .unwrap();
        assert!(verdict.needs_deep_analysis);
        assert_eq!(verdict.initial_score, Some(4.0));
    }

    #[test]
    fn test_screener_verdict_minimal() {
        let verdict: ScreenerVerdict = serde_json::from_value(json!({
            "needsDeepAnalysis": false,
            "reasoning": "well-sourced report"
        }))
        .unwrap();
        assert!(!verdict.needs_deep_analysis);
        assert!(verdict.initial_score.is_none());
    }

    #[test]
    fn test_specialist_report_field_aliases() {
        let report: SpecialistReport = serde_json::from_value(json!({
            "manipulation_tactics": [{
                "tactic_type": "fear-mongering",
                "explanation": "exaggerated threat",
                "severity": "high",
                "example_from_text": "ACT NOW OR LOSE EVERYTHING"
            }],
            "overall_assessment": "heavily manipulative",
            "recommendation": "verify independently"
        }))
        .unwrap();
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].label, "fear-mongering");
        assert_eq!(report.findings[0].severity, Severity::High);
    }

    #[test]
    fn test_summary_key_concerns_optional() {
        let report: SummaryReport = serde_json::from_value(json!({
            "credibility_score": 8,
            "potential_issues": [],
            "recommendation": "content appears reliable"
        }))
        .unwrap();
        assert!(report.key_concerns.is_none());
        assert!(report.potential_issues.is_empty());

        let round_trip = serde_json::to_value(&report).unwrap();
        assert!(round_trip.get("key_concerns").is_none());
    }

    #[test]
    fn test_degraded_summary_shape() {
        let report = SummaryReport::degraded("analysis_error", "Error during analysis: boom");
        assert_eq!(report.credibility_score, 0.0);
        assert_eq!(report.potential_issues.len(), 1);
        assert_eq!(report.potential_issues[0].issue_type, "analysis_error");
        assert_eq!(report.potential_issues[0].severity, Severity::High);
        assert_eq!(
            report.key_concerns.as_deref().unwrap(),
            ["Analysis could not be completed due to an error".to_string()]
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
