//! Error types for the synchronization layer

use intact_merge::MergeError;
use intact_model::{EntityKey, ModelError};

/// Record lookup failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Backing store could not be reached
    #[error("record store unreachable: {0}")]
    Unreachable(String),

    /// More than one persisted record shares the candidate's key
    #[error("{count} persisted records match {key}")]
    Ambiguous {
        /// Key shared by the matches
        key: EntityKey,
        /// Number of matches
        count: usize,
    },

    /// Candidate handle unknown to the graph
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Failure to synchronize one candidate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// Persisted counterpart could not be resolved
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Merge into the persisted counterpart failed
    #[error("merge failed: {0}")]
    Merge(#[from] MergeError),
}
