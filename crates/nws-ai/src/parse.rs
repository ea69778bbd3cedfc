//! Lenient parsing of provider replies.
//!
//! Models wrap JSON in markdown fences, prepend "Here is the JSON you asked
//! for", and otherwise decorate what should be a bare payload. The helpers
//! here strip that decoration before handing the remainder to serde;
//! anything still malformed surfaces as [`AiError::InvalidResponse`].

use serde::de::DeserializeOwned;

use crate::error::{AiError, Result};

/// Strip a surrounding markdown code fence, if present.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a JSON payload out of a model reply.
///
/// Tries the fence-stripped reply as-is first; if that fails, falls back to
/// the first balanced `[...]` or `{...}` region, which handles replies that
/// lead with prose despite the prompt.
pub fn json_payload<T: DeserializeOwned>(reply: &str) -> Result<T> {
    let stripped = strip_code_fences(reply);
    match serde_json::from_str(stripped) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            if let Some(region) = json_region(stripped)
                && let Ok(value) = serde_json::from_str(region)
            {
                return Ok(value);
            }
            Err(AiError::InvalidResponse {
                reason: format!("malformed JSON payload: {first_err}"),
            })
        }
    }
}

/// Find the first balanced JSON array or object in the text.
fn json_region(text: &str) -> Option<&str> {
    let start = text.find(['[', '{'])?;
    let open = text.as_bytes()[start];
    let close = if open == b'[' { b']' } else { b'}' };
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, byte) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b if b == open => depth += 1,
            b if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=idx]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Require a non-empty reply text (free-text capabilities).
pub fn reply_text(reply: String) -> Result<String> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Err(AiError::InvalidResponse {
            reason: "empty reply".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CharacterSketch;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
    }

    #[test]
    fn test_json_payload_plain() {
        let sketches: Vec<CharacterSketch> =
            json_payload(r#"[{"name": "Mira", "role": "protagonist"}]"#).unwrap();
        assert_eq!(sketches.len(), 1);
        assert_eq!(sketches[0].name, "Mira");
    }

    #[test]
    fn test_json_payload_fenced() {
        let sketches: Vec<CharacterSketch> =
            json_payload("```json\n[{\"name\": \"Mira\"}]\n```").unwrap();
        assert_eq!(sketches[0].name, "Mira");
    }

    #[test]
    fn test_json_payload_with_leading_prose() {
        let reply = r#"Here are the characters: [{"name": "Mira"}] Hope that helps!"#;
        let sketches: Vec<CharacterSketch> = json_payload(reply).unwrap();
        assert_eq!(sketches[0].name, "Mira");
    }

    #[test]
    fn test_json_payload_handles_brackets_in_strings() {
        let reply = r#"[{"name": "Mira [the elder]", "description": "keeps a { ledger"}]"#;
        let sketches: Vec<CharacterSketch> = json_payload(reply).unwrap();
        assert_eq!(sketches[0].name, "Mira [the elder]");
    }

    #[test]
    fn test_json_payload_malformed() {
        let result: Result<Vec<CharacterSketch>> = json_payload("no json here");
        assert!(matches!(result, Err(AiError::InvalidResponse { .. })));
    }

    #[test]
    fn test_reply_text_rejects_empty() {
        assert!(reply_text("   ".to_string()).is_err());
        assert_eq!(reply_text(" done \n".to_string()).unwrap(), "done");
    }
}
