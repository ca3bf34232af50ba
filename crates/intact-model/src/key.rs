//! Value identity of arena records
//!
//! Records inside collections (experiments of a publication, roles of a user)
//! are compared by these keys, never by handle.

use crate::id::EntityKind;
use serde::{Deserialize, Serialize};

/// Identity of a controlled-vocabulary term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKey {
    /// Ontology identifier, preferred when present
    Identifier(String),
    /// Short label of a term without identifier
    Label(String),
}

/// Value key of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKey {
    /// Kinds identified by their short label
    Label { kind: EntityKind, label: String },

    /// Controlled-vocabulary term
    Term(TermKey),

    /// Organism by taxonomy id
    Taxon(i32),

    /// User by login
    Login(String),

    /// Role by upper-case name
    RoleName(String),

    /// Participant by what it is and how it took part
    Participant {
        interactor: Option<Box<EntityKey>>,
        experimental_role: Option<Box<EntityKey>>,
        biological_role: Option<Box<EntityKey>>,
    },

    /// Feature by label, type and the regions it covers
    Feature {
        label: String,
        feature_type: Option<Box<EntityKey>>,
        /// Sorted, deduplicated `(start, end)` spans
        ranges: Vec<(u32, u32)>,
    },
}

impl EntityKey {
    /// Key for a label-identified kind
    #[inline]
    #[must_use]
    pub fn label(kind: EntityKind, label: impl Into<String>) -> Self {
        Self::Label {
            kind,
            label: label.into(),
        }
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Label { kind, label } => write!(f, "{kind}:{label}"),
            Self::Term(TermKey::Identifier(id)) => write!(f, "cv-term:{id}"),
            Self::Term(TermKey::Label(label)) => write!(f, "cv-term:{label}"),
            Self::Taxon(tax_id) => write!(f, "organism:{tax_id}"),
            Self::Login(login) => write!(f, "user:{login}"),
            Self::RoleName(name) => write!(f, "role:{name}"),
            Self::Participant { interactor, .. } => match interactor {
                Some(key) => write!(f, "participant:{key}"),
                None => f.write_str("participant:?"),
            },
            Self::Feature { label, .. } => write!(f, "feature:{label}"),
        }
    }
}
