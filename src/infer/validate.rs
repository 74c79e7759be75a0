//! Summary Validation
//!
//! Structural validation of the final summary before it leaves the
//! pipeline. Parsing alone is not enough: a response can be valid JSON
//! and still carry an out-of-range score or an empty recommendation.

use serde_json::Value;

use crate::types::{CredError, Result, SummaryReport};

/// Validate a raw summary value and convert it to a typed report.
///
/// All violations are collected before failing so the error names every
/// problem at once.
pub fn validate_summary(raw: &Value) -> Result<SummaryReport> {
    let mut problems = Vec::new();

    match raw.get("credibility_score").and_then(Value::as_f64) {
        Some(score) if (0.0..=10.0).contains(&score) => {}
        Some(score) => problems.push(format!("credibility_score {} outside 0-10", score)),
        None => problems.push("credibility_score missing or not a number".to_string()),
    }

    match raw.get("recommendation").and_then(Value::as_str) {
        Some(rec) if !rec.trim().is_empty() => {}
        Some(_) => problems.push("recommendation is empty".to_string()),
        None => problems.push("recommendation missing or not a string".to_string()),
    }

    match raw.get("potential_issues") {
        Some(Value::Array(issues)) => {
            for (i, issue) in issues.iter().enumerate() {
                for field in ["type", "explanation", "severity"] {
                    match issue.get(field).and_then(Value::as_str) {
                        Some(s) if !s.trim().is_empty() => {}
                        _ => problems.push(format!("potential_issues[{}].{} invalid", i, field)),
                    }
                }
                if let Some(sev) = issue.get("severity").and_then(Value::as_str) {
                    if !matches!(sev, "low" | "medium" | "high") {
                        problems.push(format!(
                            "potential_issues[{}].severity '{}' not one of low/medium/high",
                            i, sev
                        ));
                    }
                }
            }
        }
        Some(_) => problems.push("potential_issues is not an array".to_string()),
        None => problems.push("potential_issues missing".to_string()),
    }

    if !problems.is_empty() {
        return Err(CredError::malformed(format!(
            "summary failed validation: {}",
            problems.join("; ")
        )));
    }

    let report: SummaryReport = serde_json::from_value(raw.clone())?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_summary() {
        let raw = json!({
            "credibility_score": 8.5,
            "potential_issues": [],
            "recommendation": "content appears reliable"
        });
        let report = validate_summary(&raw).unwrap();
        assert_eq!(report.credibility_score, 8.5);
        assert!(report.potential_issues.is_empty());
    }

    #[test]
    fn test_valid_summary_with_issues() {
        let raw = json!({
            "credibility_score": 2,
            "potential_issues": [{
                "type": "fear-mongering",
                "explanation": "invokes catastrophic outcomes without evidence",
                "severity": "high"
            }],
            "key_concerns": ["unsupported claims"],
            "recommendation": "verify with independent sources"
        });
        let report = validate_summary(&raw).unwrap();
        assert_eq!(report.potential_issues.len(), 1);
        assert_eq!(report.key_concerns.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_score_out_of_range() {
        let raw = json!({
            "credibility_score": 11,
            "potential_issues": [],
            "recommendation": "x"
        });
        let err = validate_summary(&raw).unwrap_err();
        assert!(err.to_string().contains("outside 0-10"));
    }

    #[test]
    fn test_empty_recommendation() {
        let raw = json!({
            "credibility_score": 5,
            "potential_issues": [],
            "recommendation": "   "
        });
        assert!(validate_summary(&raw).is_err());
    }

    #[test]
    fn test_bad_severity() {
        let raw = json!({
            "credibility_score": 5,
            "potential_issues": [{
                "type": "bias",
                "explanation": "x",
                "severity": "catastrophic"
            }],
            "recommendation": "y"
        });
        let err = validate_summary(&raw).unwrap_err();
        assert!(err.to_string().contains("severity"));
    }

    #[test]
    fn test_collects_multiple_problems() {
        let raw = json!({"potential_issues": "nope"});
        let err = validate_summary(&raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("credibility_score"));
        assert!(msg.contains("recommendation"));
        assert!(msg.contains("not an array"));
    }
}
