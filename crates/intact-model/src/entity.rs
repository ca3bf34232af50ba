//! Curated records and the closed [`Entity`] enum
//!
//! Associations and back-references are [`EntityId`] handles into the
//! [`Graph`](crate::Graph). Owned children (experiments of a publication,
//! participants of an interaction, ...) point back at their parent through a
//! handle as well.

use crate::audit::Audit;
use crate::element::{Alias, Annotation, Checksum, LifecycleEvent, Preference, Range, Xref};
use crate::error::{require_text, ModelError};
use crate::id::{EntityId, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Curation status of a publication or complex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurationStatus {
    #[default]
    New,
    Reserved,
    Assigned,
    CurationInProgress,
    ReadyForChecking,
    Accepted,
    AcceptedOnHold,
    ReadyForRelease,
    Released,
}

impl CurationStatus {
    /// Stable kebab-case name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reserved => "reserved",
            Self::Assigned => "assigned",
            Self::CurationInProgress => "curation-in-progress",
            Self::ReadyForChecking => "ready-for-checking",
            Self::Accepted => "accepted",
            Self::AcceptedOnHold => "accepted-on-hold",
            Self::ReadyForRelease => "ready-for-release",
            Self::Released => "released",
        }
    }
}

/// Curated publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub ac: Option<String>,
    pub audit: Audit,
    /// Usually the PubMed identifier
    pub short_label: String,
    pub title: Option<String>,
    pub journal: Option<String>,
    pub status: Option<CurationStatus>,
    pub curator: Option<EntityId>,
    pub reviewer: Option<EntityId>,
    /// Owning institution
    pub source: Option<EntityId>,
    pub lifecycle_events: Vec<LifecycleEvent>,
    pub experiments: Vec<EntityId>,
    pub xrefs: Vec<Xref>,
    pub annotations: Vec<Annotation>,
}

impl Publication {
    /// Create publication
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            short_label: require_text("publication short label", short_label)?,
            title: None,
            journal: None,
            status: None,
            curator: None,
            reviewer: None,
            source: None,
            lifecycle_events: Vec::new(),
            experiments: Vec::new(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
        })
    }
}

/// Experiment reported by a publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub ac: Option<String>,
    pub audit: Audit,
    /// Owning publication
    pub publication: Option<EntityId>,
    pub short_label: String,
    pub interaction_detection_method: Option<EntityId>,
    pub participant_identification_method: Option<EntityId>,
    pub host_organism: Option<EntityId>,
    pub interaction_evidences: Vec<EntityId>,
    pub xrefs: Vec<Xref>,
    pub annotations: Vec<Annotation>,
}

impl Experiment {
    /// Create experiment
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            publication: None,
            short_label: require_text("experiment short label", short_label)?,
            interaction_detection_method: None,
            participant_identification_method: None,
            host_organism: None,
            interaction_evidences: Vec::new(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
        })
    }
}

/// Interaction observed in an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvidence {
    pub ac: Option<String>,
    pub audit: Audit,
    /// Owning experiment
    pub experiment: Option<EntityId>,
    pub short_label: String,
    pub interaction_type: Option<EntityId>,
    pub imex_id: Option<String>,
    pub negative: bool,
    pub participants: Vec<EntityId>,
    pub xrefs: Vec<Xref>,
    pub annotations: Vec<Annotation>,
}

impl InteractionEvidence {
    /// Create interaction evidence
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            experiment: None,
            short_label: require_text("interaction short label", short_label)?,
            interaction_type: None,
            imex_id: None,
            negative: false,
            participants: Vec::new(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
        })
    }
}

/// Participant of an interaction evidence or complex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub ac: Option<String>,
    pub audit: Audit,
    /// Owning interaction evidence or complex
    pub interaction: Option<EntityId>,
    pub interactor: Option<EntityId>,
    pub biological_role: Option<EntityId>,
    pub experimental_role: Option<EntityId>,
    pub stoichiometry: Option<u32>,
    pub features: Vec<EntityId>,
    pub xrefs: Vec<Xref>,
    pub aliases: Vec<Alias>,
    pub annotations: Vec<Annotation>,
}

impl Participant {
    /// Create participant for an interactor
    #[must_use]
    pub fn new(interactor: EntityId) -> Self {
        Self {
            interactor: Some(interactor),
            ..Self::default()
        }
    }
}

/// Feature of a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub ac: Option<String>,
    pub audit: Audit,
    /// Owning participant
    pub participant: Option<EntityId>,
    pub short_label: String,
    pub full_name: Option<String>,
    pub feature_type: Option<EntityId>,
    pub ranges: Vec<Range>,
    pub xrefs: Vec<Xref>,
    pub aliases: Vec<Alias>,
    pub annotations: Vec<Annotation>,
}

impl Feature {
    /// Create feature
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            participant: None,
            short_label: require_text("feature short label", short_label)?,
            full_name: None,
            feature_type: None,
            ranges: Vec::new(),
            xrefs: Vec::new(),
            aliases: Vec::new(),
            annotations: Vec::new(),
        })
    }
}

/// Controlled-vocabulary term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvTerm {
    pub ac: Option<String>,
    pub audit: Audit,
    pub short_label: String,
    pub full_name: Option<String>,
    /// Ontology identifier, e.g. `MI:0018`
    pub identifier: Option<String>,
    pub definition: Option<String>,
    /// Parent terms in the ontology (shared, not owned)
    pub parents: Vec<EntityId>,
    pub xrefs: Vec<Xref>,
    pub annotations: Vec<Annotation>,
    pub synonyms: Vec<Alias>,
}

impl CvTerm {
    /// Create term
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            short_label: require_text("term short label", short_label)?,
            full_name: None,
            identifier: None,
            definition: None,
            parents: Vec::new(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
            synonyms: Vec::new(),
        })
    }

    #[inline]
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// Fields shared by every interactor, complexes included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractorFields {
    pub short_label: String,
    pub full_name: Option<String>,
    pub interactor_type: Option<EntityId>,
    pub organism: Option<EntityId>,
    pub xrefs: Vec<Xref>,
    pub aliases: Vec<Alias>,
    pub annotations: Vec<Annotation>,
    pub checksums: Vec<Checksum>,
}

impl InteractorFields {
    /// Create interactor fields
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            short_label: require_text("interactor short label", short_label)?,
            full_name: None,
            interactor_type: None,
            organism: None,
            xrefs: Vec::new(),
            aliases: Vec::new(),
            annotations: Vec::new(),
            checksums: Vec::new(),
        })
    }
}

/// Protein, nucleic acid, small molecule, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactor {
    pub ac: Option<String>,
    pub audit: Audit,
    pub fields: InteractorFields,
}

impl Interactor {
    /// Create interactor
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            fields: InteractorFields::new(short_label)?,
        })
    }
}

/// Curated complex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub ac: Option<String>,
    pub audit: Audit,
    pub fields: InteractorFields,
    pub status: Option<CurationStatus>,
    pub curator: Option<EntityId>,
    pub reviewer: Option<EntityId>,
    pub source: Option<EntityId>,
    pub lifecycle_events: Vec<LifecycleEvent>,
    pub participants: Vec<EntityId>,
}

impl Complex {
    /// Create complex
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            fields: InteractorFields::new(short_label)?,
            status: None,
            curator: None,
            reviewer: None,
            source: None,
            lifecycle_events: Vec::new(),
            participants: Vec::new(),
        })
    }
}

/// Biological organism, identified by its taxonomy id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub ac: Option<String>,
    pub audit: Audit,
    pub tax_id: i32,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub aliases: Vec<Alias>,
}

impl Organism {
    /// Lowest taxonomy id accepted (negative ids encode in-vitro, chemical
    /// synthesis, unknown, ...)
    pub const MIN_TAX_ID: i32 = -5;

    /// Create organism
    ///
    /// # Errors
    /// Returns error if `tax_id` is below [`Self::MIN_TAX_ID`]
    pub fn new(tax_id: i32) -> Result<Self, ModelError> {
        if tax_id < Self::MIN_TAX_ID {
            return Err(ModelError::invariant(format!("invalid taxonomy id {tax_id}")));
        }
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            tax_id,
            common_name: None,
            scientific_name: None,
            aliases: Vec::new(),
        })
    }
}

/// Institution owning curated records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub ac: Option<String>,
    pub audit: Audit,
    pub short_label: String,
    pub full_name: Option<String>,
    pub url: Option<String>,
    pub postal_address: Option<String>,
    pub xrefs: Vec<Xref>,
    pub annotations: Vec<Annotation>,
    pub aliases: Vec<Alias>,
}

impl Source {
    /// Create institution
    ///
    /// # Errors
    /// Returns error if `short_label` is blank
    pub fn new(short_label: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            short_label: require_text("source short label", short_label)?,
            full_name: None,
            url: None,
            postal_address: None,
            xrefs: Vec::new(),
            annotations: Vec::new(),
            aliases: Vec::new(),
        })
    }
}

/// Curation tool user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub ac: Option<String>,
    pub audit: Audit,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
    pub last_login: Option<DateTime<Utc>>,
    /// Shared [`Role`] records
    pub roles: Vec<EntityId>,
    pub preferences: Vec<Preference>,
}

impl User {
    /// Create user
    ///
    /// # Errors
    /// Returns error if `login` is blank
    pub fn new(login: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            login: require_text("user login", login)?,
            first_name: None,
            last_name: None,
            email: None,
            disabled: false,
            last_login: None,
            roles: Vec::new(),
            preferences: Vec::new(),
        })
    }
}

/// User role (`CURATOR`, `REVIEWER`, ...)
///
/// Deserialization goes through [`Role::new`], so a stored name is
/// upper-cased and a blank one is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoleFields")]
pub struct Role {
    pub ac: Option<String>,
    pub audit: Audit,
    name: String,
}

impl Role {
    /// Create role; the name is stored upper-cased
    ///
    /// # Errors
    /// Returns error if `name` is blank
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            audit: Audit::default(),
            name: require_text("role name", name)?.to_uppercase(),
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename role, keeping the upper-case invariant
    ///
    /// # Errors
    /// Returns error if `name` is blank
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        self.name = require_text("role name", name)?.to_uppercase();
        Ok(())
    }
}

#[derive(Deserialize)]
struct RoleFields {
    ac: Option<String>,
    #[serde(default)]
    audit: Audit,
    name: String,
}

impl TryFrom<RoleFields> for Role {
    type Error = ModelError;

    fn try_from(fields: RoleFields) -> Result<Self, Self::Error> {
        let mut role = Role::new(fields.name)?;
        role.ac = fields.ac;
        role.audit = fields.audit;
        Ok(role)
    }
}

/// Any record stored in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Entity {
    Publication(Publication),
    Experiment(Experiment),
    InteractionEvidence(InteractionEvidence),
    Participant(Participant),
    Feature(Feature),
    CvTerm(CvTerm),
    Interactor(Interactor),
    Complex(Complex),
    Organism(Organism),
    Source(Source),
    User(User),
    Role(Role),
}

/// Apply the same expression to whichever record an [`Entity`] holds
macro_rules! each_variant {
    ($entity:expr, $record:ident => $body:expr) => {
        match $entity {
            Entity::Publication($record) => $body,
            Entity::Experiment($record) => $body,
            Entity::InteractionEvidence($record) => $body,
            Entity::Participant($record) => $body,
            Entity::Feature($record) => $body,
            Entity::CvTerm($record) => $body,
            Entity::Interactor($record) => $body,
            Entity::Complex($record) => $body,
            Entity::Organism($record) => $body,
            Entity::Source($record) => $body,
            Entity::User($record) => $body,
            Entity::Role($record) => $body,
        }
    };
}

impl Entity {
    /// Kind of the held record
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Publication(_) => EntityKind::Publication,
            Self::Experiment(_) => EntityKind::Experiment,
            Self::InteractionEvidence(_) => EntityKind::InteractionEvidence,
            Self::Participant(_) => EntityKind::Participant,
            Self::Feature(_) => EntityKind::Feature,
            Self::CvTerm(_) => EntityKind::CvTerm,
            Self::Interactor(_) => EntityKind::Interactor,
            Self::Complex(_) => EntityKind::Complex,
            Self::Organism(_) => EntityKind::Organism,
            Self::Source(_) => EntityKind::Source,
            Self::User(_) => EntityKind::User,
            Self::Role(_) => EntityKind::Role,
        }
    }

    /// Storage accession, if the record has been persisted
    #[must_use]
    pub fn ac(&self) -> Option<&str> {
        each_variant!(self, record => record.ac.as_deref())
    }

    #[must_use]
    pub fn audit(&self) -> &Audit {
        each_variant!(self, record => &record.audit)
    }

    pub fn audit_mut(&mut self) -> &mut Audit {
        each_variant!(self, record => &mut record.audit)
    }

    /// Owning parent handle; `None` for kinds without a back-reference
    #[must_use]
    pub fn parent(&self) -> Option<EntityId> {
        match self {
            Self::Experiment(e) => e.publication,
            Self::InteractionEvidence(i) => i.experiment,
            Self::Participant(p) => p.interaction,
            Self::Feature(f) => f.participant,
            _ => None,
        }
    }

    /// Point the back-reference at `parent`
    ///
    /// Returns `false` (and changes nothing) for kinds without one.
    pub fn set_parent(&mut self, parent: Option<EntityId>) -> bool {
        let slot = match self {
            Self::Experiment(e) => &mut e.publication,
            Self::InteractionEvidence(i) => &mut i.experiment,
            Self::Participant(p) => &mut p.interaction,
            Self::Feature(f) => &mut f.participant,
            _ => return false,
        };
        *slot = parent;
        true
    }
}

/// Typed access to one variant of [`Entity`]
pub trait EntityVariant: Sized {
    /// Kind of this record type
    const KIND: EntityKind;

    /// Borrow the record if `entity` holds this variant
    fn from_entity(entity: &Entity) -> Option<&Self>;

    /// Mutably borrow the record if `entity` holds this variant
    fn from_entity_mut(entity: &mut Entity) -> Option<&mut Self>;
}

macro_rules! entity_variant {
    ($($record:ident),* $(,)?) => {
        $(
            impl EntityVariant for $record {
                const KIND: EntityKind = EntityKind::$record;

                #[inline]
                fn from_entity(entity: &Entity) -> Option<&Self> {
                    match entity {
                        Entity::$record(record) => Some(record),
                        _ => None,
                    }
                }

                #[inline]
                fn from_entity_mut(entity: &mut Entity) -> Option<&mut Self> {
                    match entity {
                        Entity::$record(record) => Some(record),
                        _ => None,
                    }
                }
            }

            impl From<$record> for Entity {
                fn from(record: $record) -> Self {
                    Entity::$record(record)
                }
            }
        )*
    };
}

entity_variant!(
    Publication,
    Experiment,
    InteractionEvidence,
    Participant,
    Feature,
    CvTerm,
    Interactor,
    Complex,
    Organism,
    Source,
    User,
    Role,
);
