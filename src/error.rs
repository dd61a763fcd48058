//! Error types for export validation and normalization

use crate::user::RelationshipKind;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for validation and normalization
pub type Result<T> = std::result::Result<T, ExportError>;

const PAYLOAD_PREVIEW_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// A well-formed export of the other relationship kind
    #[error("expected a {expected} export but found a {detected} export")]
    WrongKind {
        expected: RelationshipKind,
        detected: RelationshipKind,
    },

    /// Payload matches neither known export shape
    #[error("invalid export format: {reason} (payload: {})", preview(.payload))]
    InvalidFormat { reason: String, payload: Value },
}

impl ExportError {
    pub fn invalid(reason: impl Into<String>, payload: &Value) -> Self {
        ExportError::InvalidFormat {
            reason: reason.into(),
            payload: payload.clone(),
        }
    }

    /// Text suitable for showing to the person who supplied the file.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::WrongKind { detected, .. } => format!(
                "This appears to be a {} list file. Please try passing it with --{} instead.",
                detected, detected
            ),
            ExportError::InvalidFormat { .. } => {
                "Invalid file format. Please use a valid JSON file from your Instagram data export."
                    .to_string()
            }
        }
    }
}

fn preview(payload: &Value) -> String {
    let text = payload.to_string();
    if text.chars().count() <= PAYLOAD_PREVIEW_LEN {
        return text;
    }
    let mut cut: String = text.chars().take(PAYLOAD_PREVIEW_LEN).collect();
    cut.push_str("...");
    cut
}
