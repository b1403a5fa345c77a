//! Translation of a homework record into the notification text.

use hwbot_core::{DomainError, HomeworkRecord, HomeworkStatus};
use serde_json::Value;
use tracing::debug;

/// Extract the name and status of a raw homework record.
pub fn parse_record(record: &Value) -> Result<HomeworkRecord, DomainError> {
    let homework_name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(DomainError::MissingField {
            field: "homework_name",
        })?;

    let code = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or(DomainError::MissingField { field: "status" })?;

    let status = HomeworkStatus::from_code(code).ok_or_else(|| DomainError::UnknownStatus {
        status: code.to_string(),
    })?;

    Ok(HomeworkRecord {
        homework_name: homework_name.to_string(),
        status,
    })
}

/// Build the notification sentence for a raw homework record.
pub fn parse_status(record: &Value) -> Result<String, DomainError> {
    let record = parse_record(record)?;
    debug!(homework = %record.homework_name, status = %record.status, "Parsed homework status");
    Ok(record.message())
}
