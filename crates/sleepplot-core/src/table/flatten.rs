use serde_json::Value;

use super::{RawTable, ID_COLUMN};
use crate::error::ValidationError;

/// Key of the sub-mapping that holds the day's sleep metrics.
pub const DTO_KEY: &str = "dailySleepDTO";

/// Flattens raw daily payloads into a table of their `dailySleepDTO` fields.
///
/// Columns are the keys of the first payload's DTO, in payload order. Each
/// later payload contributes one row; keys it lacks become null cells. Rows
/// without an `id` are dropped.
///
/// # Errors
///
/// Returns an error when `payloads` is empty or the first payload has no DTO
/// object to take the column set from.
pub fn flatten_payloads(payloads: &[Value]) -> Result<RawTable, ValidationError> {
    let first = payloads
        .first()
        .ok_or_else(|| ValidationError::EmptyCollection("sleep payloads".into()))?;
    let first_dto = first
        .get(DTO_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| ValidationError::InvalidValue {
            field: DTO_KEY.into(),
            message: "first payload has no sleep DTO object".into(),
        })?;

    let columns: Vec<String> = first_dto.keys().cloned().collect();
    let mut table = RawTable::new(columns.clone());

    for (index, payload) in payloads.iter().enumerate() {
        let dto = payload.get(DTO_KEY);
        let cells = columns
            .iter()
            .map(|key| dto.and_then(|d| d.get(key)).and_then(cell_text))
            .collect();
        table.push_row(index, cells);
    }

    let dropped = table.drop_missing(ID_COLUMN);
    if dropped > 0 {
        tracing::debug!("Dropped {} day(s) without sleep data", dropped);
    }

    Ok(table)
}

/// Renders a JSON value as a table cell. Nested values keep their JSON form.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
