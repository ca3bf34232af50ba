//! Error types for merge configuration and execution

use crate::enricher::EnrichmentError;
use intact_model::{EntityKind, ModelError};

/// Merge failure
///
/// A merge that fails is left partially applied; discard or re-fetch the
/// target before saving it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// Scalar enricher failed; propagated unchanged
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    /// Unknown handle or model invariant broken
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Source and target hold different kinds
    #[error("cannot merge a {source_kind} into a {target_kind}")]
    KindMismatch {
        /// Kind of the source record
        source_kind: EntityKind,
        /// Kind of the target record
        target_kind: EntityKind,
    },
}

/// Invalid merger construction or configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No policy given to the builder
    #[error("merge policy not configured")]
    MissingPolicy,

    /// Kind requires an enricher but none was registered
    #[error("enrichment required for {0} but no enricher registered")]
    MissingEnricher(EntityKind),

    /// Two enrichers registered for one kind
    #[error("more than one enricher registered for {0}")]
    DuplicateEnricher(EntityKind),

    /// Configuration text is not valid TOML for [`MergeConfig`](crate::MergeConfig)
    #[error("invalid merge configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
