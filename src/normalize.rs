use crate::error::{ExportError, Result};
use crate::user::{RelationshipKind, User};
use crate::validation::{parse_items, RawExport, RawListItem};
use chrono::DateTime;
use serde_json::Value;

fn normalize_item(item: &RawListItem, i: usize) -> Result<User> {
    let offending = || serde_json::to_value(item).unwrap_or_default();

    let entry = item.first_entry().ok_or_else(|| ExportError::InvalidFormat {
        reason: format!("record {}: empty string_list_data", i),
        payload: offending(),
    })?;

    let followed_at =
        DateTime::from_timestamp(entry.timestamp, 0).ok_or_else(|| ExportError::InvalidFormat {
            reason: format!("record {}: timestamp {} out of range", i, entry.timestamp),
            payload: offending(),
        })?;

    Ok(User {
        username: entry.value.clone(),
        profile_url: entry.href.clone(),
        followed_at,
    })
}

/// Turn raw records into users, in record order.
pub fn normalize(items: &[RawListItem]) -> Result<Vec<User>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_item(item, i))
        .collect()
}

pub fn normalize_export(export: &RawExport) -> Result<Vec<User>> {
    normalize(export.items())
}

/// Normalize a payload that has not been through [`crate::validation::classify`].
///
/// Unwraps the `kind` wrapper key when present, otherwise expects a bare
/// array. Anything else is rejected with [`ExportError::InvalidFormat`].
pub fn normalize_value(value: &Value, kind: RelationshipKind) -> Result<Vec<User>> {
    let list = match value {
        Value::Array(_) => value,
        Value::Object(map) => map.get(kind.wrapper_key()).ok_or_else(|| {
            ExportError::invalid(format!("invalid {} data format", kind), value)
        })?,
        _ => return Err(ExportError::invalid(format!("invalid {} data format", kind), value)),
    };
    normalize(&parse_items(list)?)
}
