//! Shape checks for the decoded endpoint response.

use hwbot_core::ProtocolError;
use serde_json::Value;
use tracing::debug;

/// Check `body` against the documented response shape and return its
/// `homeworks` list unchanged. The list may be empty.
pub fn check_response(body: &Value) -> Result<&[Value], ProtocolError> {
    debug!("Checking API response shape");

    let object = body.as_object().ok_or_else(|| ProtocolError::TypeMismatch {
        reason: format!("expected a JSON object, got {}", json_type(body)),
    })?;

    let missing: Vec<&str> = ["homeworks", "current_date"]
        .into_iter()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(ProtocolError::TypeMismatch {
            reason: format!("response is missing keys: {}", missing.join(", ")),
        });
    }

    match &object["homeworks"] {
        Value::Array(homeworks) => Ok(homeworks.as_slice()),
        other => Err(ProtocolError::TypeMismatch {
            reason: format!("\"homeworks\" must be a list, got {}", json_type(other)),
        }),
    }
}

/// The server timestamp of the response, if it is an integer.
pub fn current_date(body: &Value) -> Option<i64> {
    body.get("current_date").and_then(Value::as_i64)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
