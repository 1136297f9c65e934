//! Decoding of response bodies into [`Lookup`] values.
//!
//! No schema is enforced. The only checks are the outer shapes: single
//! lookups must be a JSON object, radius lookups an array of objects.

use serde_json::Value;

use super::error::TransportError;
use super::types::{Lookup, PostcodeData};

/// Maximum body length kept in a [`TransportError::Json`].
const BODY_SNIPPET_LEN: usize = 500;

fn snippet(body: &str) -> Option<String> {
    Some(body.chars().take(BODY_SNIPPET_LEN).collect())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse(body: &str) -> Result<Value, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Json {
        message: e.to_string(),
        body: snippet(body),
    })
}

/// Decode a single-record body (postcode or nearest lookup).
pub(crate) fn decode_single(body: &str) -> Result<Lookup, TransportError> {
    match parse(body)? {
        Value::Object(map) => Ok(Lookup::Found(map)),
        other => Err(TransportError::Json {
            message: format!("expected a JSON object, got {}", kind(&other)),
            body: snippet(body),
        }),
    }
}

/// Decode a radius body. A `null` body means nothing is within range.
pub(crate) fn decode_list(body: &str) -> Result<Lookup, TransportError> {
    let items = match parse(body)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            return Err(TransportError::Json {
                message: format!("expected a JSON array, got {}", kind(&other)),
                body: snippet(body),
            });
        }
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(TransportError::Json {
                message: format!("item {i}: expected a JSON object, got {}", kind(&other)),
                body: snippet(body),
            }),
        })
        .collect::<Result<Vec<PostcodeData>, _>>()?;

    Ok(Lookup::ListFound(records))
}
