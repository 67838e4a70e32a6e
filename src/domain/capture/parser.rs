//! Reading the question list out of raw model output.

use serde_json::Value;

use super::errors::CaptureError;

/// Parses a model response into at most `limit` questions.
///
/// Accepts a bare JSON array of strings, optionally wrapped in a Markdown
/// code fence. Blank strings and exact duplicates are dropped keeping the
/// first occurrence, then the list is truncated to `limit`. An empty list is
/// an error.
pub fn parse_question_list(raw: &str, limit: usize) -> Result<Vec<String>, CaptureError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| CaptureError::malformed_response(format!("not valid JSON: {}", e), raw))?;

    let Value::Array(items) = value else {
        return Err(CaptureError::malformed_response(
            "expected a JSON array of strings",
            raw,
        ));
    };

    let mut questions: Vec<String> = Vec::with_capacity(items.len().min(limit));
    for (index, item) in items.into_iter().enumerate() {
        let Value::String(question) = item else {
            return Err(CaptureError::malformed_response(
                format!("element {} is not a string", index),
                raw,
            ));
        };
        if !question.trim().is_empty() && !questions.contains(&question) {
            questions.push(question);
        }
    }
    questions.truncate(limit);

    if questions.is_empty() {
        return Err(CaptureError::malformed_response(
            "response contained no questions",
            raw,
        ));
    }

    Ok(questions)
}

/// Strips a surrounding ```` ``` ```` / ```` ```json ```` fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}
