//! Merge policies
//!
//! A [`Policy`] is chosen once per [`Merger`](crate::Merger) and never mixed
//! within a merge call.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Conflict resolution between a source record and its persisted target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// Fill gaps only: never overwrite a set field, never remove an element
    EnrichOnly,

    /// Source is authoritative: replace differing fields, remove elements
    /// absent from the source
    Override,

    /// Ignore the source entirely and keep the persisted record as is
    KeepTarget,
}

impl Policy {
    /// Stable kebab-case name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnrichOnly => "enrich-only",
            Self::Override => "override",
            Self::KeepTarget => "keep-target",
        }
    }

    /// Whether target fields that are already set may be replaced
    #[inline]
    #[must_use]
    pub fn overwrites(&self) -> bool {
        matches!(self, Self::Override)
    }

    /// Whether collection elements absent from the source are evicted
    #[inline]
    #[must_use]
    pub fn removes(&self) -> bool {
        matches!(self, Self::Override)
    }

    /// Whether the target is touched at all
    #[inline]
    #[must_use]
    pub fn mutates_target(&self) -> bool {
        !matches!(self, Self::KeepTarget)
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown merge policy: {0}")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enrich-only" => Ok(Self::EnrichOnly),
            "override" => Ok(Self::Override),
            "keep-target" => Ok(Self::KeepTarget),
            other => Err(UnknownPolicy(other.to_owned())),
        }
    }
}
