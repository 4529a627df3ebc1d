//! Engine error type.

use std::fmt;

/// Errors surfaced by the layout engine.
///
/// Geometry never fails: out-of-range positions are clamped and a prevented
/// collision yields an unchanged layout. Only malformed input is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// An item's coordinate or size is not a number.
    NotNumeric {
        context: String,
        index: usize,
        field: &'static str,
    },
    /// JSON layout input is not an array.
    NotAnArray { context: String },
    /// JSON layout input failed to deserialize.
    Json { reason: String },
    /// Two items share an id.
    DuplicateId { id: String },
    /// No item with this id exists in the layout.
    UnknownItem { id: String },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNumeric {
                context,
                index,
                field,
            } => write!(
                f,
                "{context}: layout[{index}].{field} must be a number"
            ),
            Self::NotAnArray { context } => write!(f, "{context}: layout must be an array"),
            Self::Json { reason } => write!(f, "invalid layout json: {reason}"),
            Self::DuplicateId { id } => write!(f, "duplicate layout item id {id:?}"),
            Self::UnknownItem { id } => write!(f, "no layout item with id {id:?}"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            reason: err.to_string(),
        }
    }
}
