//! ReAct response grammar parser
//!
//! Interprets one raw model completion into exactly one of three outcomes:
//! a tool invocation, a terminal answer, or a format error the loop feeds
//! back to the model. The grammar is the classic marker-based one:
//!
//! ```text
//! Thought: <reasoning>
//! Action: <tool_name>
//! Action Input: <JSON object>
//! ```
//!
//! or, terminally:
//!
//! ```text
//! Thought: <reasoning>
//! Final Answer: <answer text>
//! ```
//!
//! Only the first occurrence of each marker is honored; a response containing
//! both an Action block and a Final Answer is treated as a Final Answer. The
//! Action Input span is located with an explicit brace-depth scan rather than
//! a greedy regex so nested objects are cut at the matching close brace, and
//! malformed JSON is reported as a parse error rather than coerced to an
//! empty argument object.

use regex::Regex;
use serde_json::{Map, Value};

const THOUGHT_MARKER: &str = "Thought:";
const ACTION_MARKER: &str = "Action:";
const ACTION_INPUT_MARKER: &str = "Action Input:";
const FINAL_ANSWER_MARKER: &str = "Final Answer:";

/// Result of interpreting one model completion. Transient; the loop converts
/// it into a step record and an observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    Action {
        thought: String,
        action: String,
        action_input: Value,
    },
    FinalAnswer {
        thought: String,
        text: String,
    },
    ParseError {
        thought: String,
        message: String,
    },
}

pub fn parse_response(response: &str) -> ParsedResponse {
    let thought = extract_thought(response);

    if let Some(pos) = response.find(FINAL_ANSWER_MARKER) {
        let text = response[pos + FINAL_ANSWER_MARKER.len()..].trim().to_string();
        return ParsedResponse::FinalAnswer { thought, text };
    }

    let action_re = Regex::new(r"Action:\s*(\w+)").expect("valid action regex");
    if let Some(caps) = action_re.captures(response) {
        let action = caps[1].to_string();
        match extract_action_input(response) {
            Ok(action_input) => ParsedResponse::Action {
                thought,
                action,
                action_input,
            },
            Err(message) => ParsedResponse::ParseError { thought, message },
        }
    } else {
        ParsedResponse::ParseError {
            thought,
            message: "Could not parse Action or Final Answer from response".to_string(),
        }
    }
}

/// Text between the first `Thought:` and the next `Action:` or
/// `Final Answer:` marker, or the end of the response. Empty if the marker is
/// absent.
fn extract_thought(response: &str) -> String {
    let start = match response.find(THOUGHT_MARKER) {
        Some(pos) => pos + THOUGHT_MARKER.len(),
        None => return String::new(),
    };
    let rest = &response[start..];
    let end = [ACTION_MARKER, FINAL_ANSWER_MARKER]
        .iter()
        .filter_map(|marker| rest.find(*marker))
        .min()
        .unwrap_or(rest.len());
    rest[..end].trim().to_string()
}

/// Locates the brace-delimited object after the first `Action Input:` marker
/// and parses it as JSON. An absent marker (or no object after it) yields an
/// empty argument object; a present but unterminated or malformed object is
/// an error.
fn extract_action_input(response: &str) -> Result<Value, String> {
    let after_marker = match response.find(ACTION_INPUT_MARKER) {
        Some(pos) => &response[pos + ACTION_INPUT_MARKER.len()..],
        None => return Ok(Value::Object(Map::new())),
    };

    let open = match after_marker.find('{') {
        Some(pos) => pos,
        None => return Ok(Value::Object(Map::new())),
    };

    let span = match matching_brace_span(&after_marker[open..]) {
        Some(len) => &after_marker[open..open + len],
        None => {
            return Err("Invalid JSON in Action Input: unterminated object".to_string());
        }
    };

    serde_json::from_str(span).map_err(|e| format!("Invalid JSON in Action Input: {}", e))
}

/// Byte length of the brace-balanced prefix of `text`, which must start at an
/// opening brace. Counts raw braces without tracking string literals; an
/// imbalance caused by braces inside string values surfaces upstream as a
/// parse error the model can correct.
fn matching_brace_span(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}
