//! Arena handles and the closed set of entity kinds

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Stable handle of a record in the [`Graph`](crate::Graph) arena
///
/// Back-references and associations hold these instead of pointers, so two
/// references are "the same object" exactly when their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Ulid);

impl EntityId {
    /// Generate new entity ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity kinds known to the curation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Curated publication
    Publication,
    /// Experiment described by a publication
    Experiment,
    /// Interaction observed in an experiment
    InteractionEvidence,
    /// Participant of an interaction or complex
    Participant,
    /// Feature (binding region, mutation) of a participant
    Feature,
    /// Controlled-vocabulary term
    CvTerm,
    /// Protein, small molecule or other molecule
    Interactor,
    /// Curated complex
    Complex,
    /// Biological organism
    Organism,
    /// Institution owning records
    Source,
    /// Curation tool user
    User,
    /// User role
    Role,
}

impl EntityKind {
    /// All kinds, in declaration order
    pub const ALL: [EntityKind; 12] = [
        Self::Publication,
        Self::Experiment,
        Self::InteractionEvidence,
        Self::Participant,
        Self::Feature,
        Self::CvTerm,
        Self::Interactor,
        Self::Complex,
        Self::Organism,
        Self::Source,
        Self::User,
        Self::Role,
    ];

    /// Stable kebab-case name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publication => "publication",
            Self::Experiment => "experiment",
            Self::InteractionEvidence => "interaction-evidence",
            Self::Participant => "participant",
            Self::Feature => "feature",
            Self::CvTerm => "cv-term",
            Self::Interactor => "interactor",
            Self::Complex => "complex",
            Self::Organism => "organism",
            Self::Source => "source",
            Self::User => "user",
            Self::Role => "role",
        }
    }

    /// Name of the owning back-reference field, if records of this kind have one
    #[must_use]
    pub fn parent_field(&self) -> Option<&'static str> {
        match self {
            Self::Experiment => Some("publication"),
            Self::InteractionEvidence => Some("experiment"),
            Self::Participant => Some("interaction"),
            Self::Feature => Some("participant"),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn kind_names_match_serde() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn only_children_have_parent_fields() {
        assert_eq!(EntityKind::Experiment.parent_field(), Some("publication"));
        assert_eq!(EntityKind::Feature.parent_field(), Some("participant"));
        assert_eq!(EntityKind::Publication.parent_field(), None);
        assert_eq!(EntityKind::User.parent_field(), None);
    }
}
