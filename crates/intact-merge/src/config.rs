//! Merger configuration
//!
//! ```toml
//! policy = "enrich-only"
//!
//! [enrichment]
//! required = ["cv-term", "organism"]
//! ```

use crate::error::ConfigError;
use crate::policy::Policy;
use intact_model::EntityKind;
use serde::{Deserialize, Serialize};

/// Merger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Policy applied by every merge
    pub policy: Policy,

    /// Enrichment requirements
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Which kinds must be enriched by a registered [`ScalarEnricher`](crate::ScalarEnricher)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichmentConfig {
    /// Kinds that cannot be merged without an enricher
    #[serde(default)]
    pub required: Vec<EntityKind>,
}

impl MergeConfig {
    /// Create config with `policy` and no enrichment requirements
    #[inline]
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            enrichment: EnrichmentConfig::default(),
        }
    }

    /// Require an enricher for `kind`
    #[must_use]
    pub fn with_required_enrichment(mut self, kind: EntityKind) -> Self {
        if !self.enrichment.required.contains(&kind) {
            self.enrichment.required.push(kind);
        }
        self
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed text, unknown keys,
    /// unknown policy or kind names, or a missing `policy`
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
