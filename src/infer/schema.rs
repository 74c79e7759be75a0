//! JSON Schemas for Agent Outputs
//!
//! These schemas define the expected structure of model output for each
//! pipeline stage. They are sent to the backend as a `response_format`
//! hint; the backend may or may not enforce them, so the client always
//! re-validates locally.
//!
//! Best Practices Applied:
//! - All objects have `additionalProperties: false`
//! - Required fields explicitly listed
//! - Enums for constrained values (severity)

use serde_json::json;

/// Schema provider for the pipeline stages
pub struct ResponseSchemas;

impl ResponseSchemas {
    /// Screener: binary deep-analysis decision plus reasoning.
    /// Legacy fields are still allowed so older fine-tunes keep working.
    pub fn screener() -> serde_json::Value {
        json!({
            "type": "object",
            "description": "Quick screening verdict for one text",
            "required": ["needsDeepAnalysis", "reasoning"],
            "additionalProperties": false,
            "properties": {
                "needsDeepAnalysis": {
                    "type": "boolean",
                    "description": "Whether specialist analysis is warranted"
                },
                "reasoning": {
                    "type": "string",
                    "description": "Brief justification for the decision"
                },
                "initial_score": {
                    "type": "number",
                    "description": "Optional initial credibility score (0-10)"
                },
                "suggested_specialists": {
                    "type": "array",
                    "description": "Optional specialist suggestions",
                    "items": {"type": "string"}
                }
            }
        })
    }

    /// Orchestrator: 1-3 specialist identifiers plus reasoning
    pub fn orchestrator() -> serde_json::Value {
        json!({
            "type": "object",
            "description": "Specialist selection for deep analysis",
            "required": ["selected_specialists", "reasoning"],
            "additionalProperties": false,
            "properties": {
                "selected_specialists": {
                    "type": "array",
                    "description": "Specialists to run, most relevant first",
                    "minItems": 1,
                    "maxItems": 3,
                    "items": {
                        "type": "string",
                        "enum": [
                            "cognitive_bias",
                            "emotional_manipulation",
                            "logical_fallacy",
                            "source_credibility",
                            "technical_accuracy"
                        ]
                    }
                },
                "reasoning": {
                    "type": "string",
                    "description": "Why each selected specialist fits this content"
                }
            }
        })
    }

    /// Specialist: issue list under the stage-specific field name,
    /// plus overall assessment and recommendation
    pub fn specialist(issue_field: &str, label_field: &str) -> serde_json::Value {
        json!({
            "type": "object",
            "description": "Specialist findings with mandatory textual evidence",
            "required": [issue_field, "overall_assessment", "recommendation"],
            "additionalProperties": false,
            "properties": {
                issue_field: {
                    "type": "array",
                    "description": "Issues found, each backed by a quote from the text",
                    "items": {
                        "type": "object",
                        "required": [label_field, "explanation", "severity", "example_from_text"],
                        "additionalProperties": false,
                        "properties": {
                            label_field: {"type": "string", "description": "Issue category"},
                            "explanation": {"type": "string", "description": "Why this is an issue"},
                            "severity": {
                                "type": "string",
                                "description": "Impact on credibility",
                                "enum": ["low", "medium", "high"]
                            },
                            "example_from_text": {
                                "type": "string",
                                "description": "Direct quote evidencing the issue"
                            }
                        }
                    }
                },
                "overall_assessment": {
                    "type": "string",
                    "description": "Overall judgment for this dimension"
                },
                "recommendation": {
                    "type": "string",
                    "description": "Guidance for the reader"
                }
            }
        })
    }

    /// Summarizer: final score, issues, optional key concerns,
    /// recommendation. This is the shape surfaced to the caller.
    pub fn summary() -> serde_json::Value {
        json!({
            "type": "object",
            "description": "Final credibility verdict synthesized from all analyses",
            "required": ["credibility_score", "potential_issues", "recommendation"],
            "additionalProperties": false,
            "properties": {
                "credibility_score": {
                    "type": "number",
                    "description": "Overall trustworthiness, 0-10",
                    "minimum": 0,
                    "maximum": 10
                },
                "potential_issues": {
                    "type": "array",
                    "description": "Issues ordered by severity; empty for reliable content",
                    "items": {
                        "type": "object",
                        "required": ["type", "explanation", "severity"],
                        "additionalProperties": false,
                        "properties": {
                            "type": {"type": "string", "description": "Issue category"},
                            "explanation": {"type": "string", "description": "Why this matters"},
                            "severity": {
                                "type": "string",
                                "description": "Impact on credibility",
                                "enum": ["low", "medium", "high"]
                            }
                        }
                    }
                },
                "key_concerns": {
                    "type": "array",
                    "description": "Primary concerns, may be omitted",
                    "items": {"type": "string"}
                },
                "recommendation": {
                    "type": "string",
                    "description": "Actionable guidance for the reader"
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_are_objects_with_required() {
        for schema in [
            ResponseSchemas::screener(),
            ResponseSchemas::orchestrator(),
            ResponseSchemas::specialist("credibility_issues", "issue_type"),
            ResponseSchemas::summary(),
        ] {
            assert_eq!(schema["type"], "object");
            assert!(schema["required"].is_array());
            assert_eq!(schema["additionalProperties"], false);
        }
    }

    #[test]
    fn test_specialist_schema_uses_given_fields() {
        let schema = ResponseSchemas::specialist("fallacies_identified", "fallacy_type");
        assert!(schema["properties"]["fallacies_identified"].is_object());
        let item_required = &schema["properties"]["fallacies_identified"]["items"]["required"];
        assert!(
            item_required
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("fallacy_type"))
        );
    }

    #[test]
    fn test_orchestrator_bounds() {
        let schema = ResponseSchemas::orchestrator();
        assert_eq!(schema["properties"]["selected_specialists"]["minItems"], 1);
        assert_eq!(schema["properties"]["selected_specialists"]["maxItems"], 3);
    }
}
