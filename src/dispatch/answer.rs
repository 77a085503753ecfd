//! Wire format of the query endpoint.
//!
//! Request: `{"question": "..."}`. Response: `{"answer": ...}` where the
//! answer is usually a string or a list of flat objects.

use serde::Serialize;
use serde_json::Value;

use super::DispatchError;
use crate::chat::{Content, Record};

/// Placeholder for a `null` answer
const NULL_ANSWER: &str = "N/A";

/// Request body
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

/// Parse a response body into message content.
pub fn parse_reply(body: &[u8]) -> Result<Content, DispatchError> {
    let json: Value =
        serde_json::from_slice(body).map_err(|e| DispatchError::Decode(e.to_string()))?;

    let answer = match json {
        Value::Object(mut map) => map
            .remove("answer")
            .ok_or_else(|| DispatchError::Decode("missing `answer` field".to_string()))?,
        _ => {
            return Err(DispatchError::Decode(
                "response body is not an object".to_string(),
            ))
        }
    };

    Ok(content_from_answer(answer))
}

/// Decide the content shape of an answer value.
///
/// Lists made only of objects become records; any other list is shown as
/// compact JSON text. A lone object is a single record.
pub fn content_from_answer(answer: Value) -> Content {
    match answer {
        Value::String(s) => Content::Text(s),
        Value::Null => Content::Text(NULL_ANSWER.to_string()),
        Value::Object(map) => Content::Records(vec![Record::from(map)]),
        Value::Array(items) if items.iter().all(Value::is_object) => Content::Records(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(Record::from(map)),
                    _ => None,
                })
                .collect(),
        ),
        other => Content::Text(other.to_string()),
    }
}
