//! JSON Extraction
//!
//! Pulls a JSON object out of raw model text. Even with a JSON response
//! format requested, local models wrap output in code fences, prepend
//! prose, or leave trailing commas; this layer tolerates those without
//! ever substituting content.

use serde_json::Value;
use tracing::debug;

use crate::types::{CredError, Result};

/// Extract and parse a JSON value from a raw completion string.
///
/// Primary entry point for parsing model output. Failure here means the
/// response is unusable and maps to `InferenceResponseMalformed`.
pub fn extract_json(raw: &str) -> Result<Value> {
    let cleaned = strip_code_fences(raw.trim());

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    debug!("direct JSON parse failed, attempting recovery");

    let repaired = fix_trailing_commas(&cleaned);
    if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
        return Ok(value);
    }

    if let Some(embedded) = extract_embedded_object(&repaired) {
        if let Ok(value) = serde_json::from_str::<Value>(embedded) {
            return Ok(value);
        }
    }

    Err(CredError::malformed(format!(
        "response is not valid JSON. Preview: {}",
        cleaned.chars().take(200).collect::<String>()
    )))
}

/// Strip a surrounding ```json ... ``` (or bare ```) fence
fn strip_code_fences(s: &str) -> String {
    let mut result = s.trim_start_matches('\u{feff}').trim().to_string();

    if result.starts_with("```") {
        if let Some(first_newline) = result.find('\n') {
            result = result[first_newline + 1..].to_string();
        }
    }
    if result.ends_with("```") {
        result = result[..result.len() - 3].trim_end().to_string();
    }

    result
}

/// Drop commas that directly precede a closing `]` or `}`
fn fix_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escape = false;

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];

        if escape {
            escape = false;
            result.push(ch);
            i += 1;
            continue;
        }

        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            ',' if !in_string => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if j < chars.len() && (chars[j] == ']' || chars[j] == '}') {
                    i += 1;
                    continue;
                }
            }
            _ => {}
        }

        result.push(ch);
        i += 1;
    }

    result
}

/// Find the first balanced top-level object in mixed content
fn extract_embedded_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in s[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let value = extract_json(r#"{"needsDeepAnalysis": false, "reasoning": "ok"}"#).unwrap();
        assert_eq!(value["needsDeepAnalysis"], false);
    }

    #[test]
    fn test_fenced_json() {
        let raw = "```json\n{\"credibility_score\": 8}\n```";
        let value = extract_json(raw).unwrap();
        assert_eq!(value["credibility_score"], 8);
    }

    #[test]
    fn test_trailing_comma() {
        let raw = r#"{"selected_specialists": ["logical_fallacy",], "reasoning": "x",}"#;
        let value = extract_json(raw).unwrap();
        assert!(value["selected_specialists"].is_array());
    }

    #[test]
    fn test_embedded_in_prose() {
        let raw = "Here is my assessment:\n{\"credibility_score\": 3, \"recommendation\": \"verify\"}\nLet me know if you need more.";
        let value = extract_json(raw).unwrap();
        assert_eq!(value["credibility_score"], 3);
    }

    #[test]
    fn test_comma_inside_string_preserved() {
        let raw = r#"{"reasoning": "first, second,]"}"#;
        let value = extract_json(raw).unwrap();
        assert_eq!(value["reasoning"], "first, second,]");
    }

    #[test]
    fn test_unrecoverable_input() {
        let err = extract_json("the model refused to answer").unwrap_err();
        assert!(matches!(err, CredError::InferenceResponseMalformed(_)));
    }
}
