//! Shape checks for relationship exports.
//!
//! An export arrives in one of two shapes: a bare JSON array of list items, or
//! an object whose `relationships_followers` / `relationships_following` key
//! holds that array. [`classify`] decides the shape once and hands back a
//! [`RawExport`], so nothing downstream probes JSON keys again.
//!
//! Classification outcomes:
//!
//! - valid for the expected kind: `Ok(RawExport)`
//! - a well-formed export of the other kind: [`ExportError::WrongKind`]
//! - anything else: [`ExportError::InvalidFormat`]

use crate::error::{ExportError, Result};
use crate::user::RelationshipKind;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `string_list_data` entry of an export record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStringListEntry {
    pub href: String,
    pub value: String,
    /// Unix seconds
    pub timestamp: i64,
}

/// One export record. Only the first `string_list_data` entry is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListItem {
    #[serde(default)]
    pub title: Option<String>,
    pub string_list_data: Vec<RawStringListEntry>,
}

impl RawListItem {
    pub fn first_entry(&self) -> Option<&RawStringListEntry> {
        self.string_list_data.first()
    }
}

/// A validated export, with its shape decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawExport {
    /// Bare array; carries no kind marker
    Bare(Vec<RawListItem>),
    /// Object wrapper keyed by the relationship kind
    Wrapped {
        kind: RelationshipKind,
        items: Vec<RawListItem>,
    },
}

impl RawExport {
    pub fn items(&self) -> &[RawListItem] {
        match self {
            RawExport::Bare(items) => items,
            RawExport::Wrapped { items, .. } => items,
        }
    }

    pub fn into_items(self) -> Vec<RawListItem> {
        match self {
            RawExport::Bare(items) => items,
            RawExport::Wrapped { items, .. } => items,
        }
    }

    /// Kind declared by the wrapper key, if any.
    pub fn kind(&self) -> Option<RelationshipKind> {
        match self {
            RawExport::Bare(_) => None,
            RawExport::Wrapped { kind, .. } => Some(*kind),
        }
    }
}

/// Classify a parsed payload submitted as an export of `expected` kind.
pub fn classify(value: &Value, expected: RelationshipKind) -> Result<RawExport> {
    match value {
        Value::Array(_) => Ok(RawExport::Bare(parse_items(value)?)),
        Value::Object(map) => {
            if let Some(inner) = map.get(expected.wrapper_key()) {
                return Ok(RawExport::Wrapped {
                    kind: expected,
                    items: parse_items(inner)?,
                });
            }

            let other = expected.other();
            match map.get(other.wrapper_key()) {
                Some(inner) if parse_items(inner).is_ok() => Err(ExportError::WrongKind {
                    expected,
                    detected: other,
                }),
                Some(_) => Err(ExportError::invalid(
                    format!("malformed {} list", other.wrapper_key()),
                    value,
                )),
                None => Err(ExportError::invalid(
                    format!("missing {} key", expected.wrapper_key()),
                    value,
                )),
            }
        }
        _ => Err(ExportError::invalid("expected a JSON array or object", value)),
    }
}

/// Parse and check a list of raw records.
pub fn parse_items(value: &Value) -> Result<Vec<RawListItem>> {
    let Value::Array(raw_items) = value else {
        return Err(ExportError::invalid("relationship list is not an array", value));
    };

    let mut items = Vec::with_capacity(raw_items.len());
    for (i, raw) in raw_items.iter().enumerate() {
        let item = RawListItem::deserialize(raw)
            .map_err(|e| ExportError::invalid(format!("record {}: {}", i, e), raw))?;
        check_item(&item, i, raw)?;
        items.push(item);
    }
    Ok(items)
}

fn check_item(item: &RawListItem, i: usize, raw: &Value) -> Result<()> {
    let Some(entry) = item.first_entry() else {
        return Err(ExportError::invalid(
            format!("record {}: empty string_list_data", i),
            raw,
        ));
    };
    if entry.value.is_empty() {
        return Err(ExportError::invalid(
            format!("record {}: empty username", i),
            raw,
        ));
    }
    if DateTime::from_timestamp(entry.timestamp, 0).is_none() {
        return Err(ExportError::invalid(
            format!("record {}: timestamp {} out of range", i, entry.timestamp),
            raw,
        ));
    }
    Ok(())
}
