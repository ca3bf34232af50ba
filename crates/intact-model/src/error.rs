//! Errors raised by the record model

use crate::id::{EntityId, EntityKind};

/// Errors related to record construction and arena access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A required field was missing or malformed at construction time
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Handle does not resolve to a record in the graph
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// Handle resolves to a record of another kind
    #[error("entity {id} is a {actual}, expected {expected}")]
    WrongKind {
        id: EntityId,
        expected: EntityKind,
        actual: EntityKind,
    },
}

impl ModelError {
    /// Create an invariant violation
    #[inline]
    #[must_use]
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

/// Reject blank required text
pub(crate) fn require_text(field: &str, value: impl Into<String>) -> Result<String, ModelError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(ModelError::invariant(format!("{field} must not be empty")));
    }
    Ok(value)
}
