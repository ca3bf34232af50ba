//! Id-keyed arena holding every record of a curation session

use crate::element::ValueIdentity;
use crate::entity::{Entity, EntityVariant};
use crate::error::ModelError;
use crate::id::{EntityId, EntityKind};
use crate::key::{EntityKey, TermKey};
use indexmap::IndexMap;

/// Arena of records addressed by [`EntityId`]
///
/// Both halves of a merge pair live here: records loaded from storage and
/// freshly built candidates. Insertion order is preserved for iteration.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    entities: IndexMap<EntityId, Entity>,
}

impl Graph {
    /// Create empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under a fresh handle
    pub fn insert(&mut self, entity: impl Into<Entity>) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(id, entity.into());
        id
    }

    /// Store a record under a known handle, returning the previous one
    pub fn insert_with_id(&mut self, id: EntityId, entity: impl Into<Entity>) -> Option<Entity> {
        self.entities.insert(id, entity.into())
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Resolve a handle
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownEntity`] if `id` is not in the graph
    pub fn entity(&self, id: EntityId) -> Result<&Entity, ModelError> {
        self.get(id).ok_or(ModelError::UnknownEntity(id))
    }

    /// Resolve a handle mutably
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownEntity`] if `id` is not in the graph
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, ModelError> {
        self.get_mut(id).ok_or(ModelError::UnknownEntity(id))
    }

    /// Resolve a handle to a typed record
    ///
    /// # Errors
    /// Returns error if `id` is unknown or holds another kind
    pub fn record<R: EntityVariant>(&self, id: EntityId) -> Result<&R, ModelError> {
        let entity = self.entity(id)?;
        R::from_entity(entity).ok_or(ModelError::WrongKind {
            id,
            expected: R::KIND,
            actual: entity.kind(),
        })
    }

    /// Resolve a handle to a typed record, mutably
    ///
    /// # Errors
    /// Returns error if `id` is unknown or holds another kind
    pub fn record_mut<R: EntityVariant>(&mut self, id: EntityId) -> Result<&mut R, ModelError> {
        let entity = self.entity_mut(id)?;
        let actual = entity.kind();
        R::from_entity_mut(entity).ok_or(ModelError::WrongKind {
            id,
            expected: R::KIND,
            actual,
        })
    }

    #[inline]
    #[must_use]
    pub fn kind(&self, id: EntityId) -> Option<EntityKind> {
        self.get(id).map(Entity::kind)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    /// Value key of the record behind `id`
    #[must_use]
    pub fn identity_key(&self, id: EntityId) -> Option<EntityKey> {
        let key = match self.get(id)? {
            Entity::Publication(p) => EntityKey::label(EntityKind::Publication, &p.short_label),
            Entity::Experiment(e) => EntityKey::label(EntityKind::Experiment, &e.short_label),
            Entity::InteractionEvidence(i) => {
                EntityKey::label(EntityKind::InteractionEvidence, &i.short_label)
            }
            Entity::Participant(p) => EntityKey::Participant {
                interactor: self.boxed_key(p.interactor),
                experimental_role: self.boxed_key(p.experimental_role),
                biological_role: self.boxed_key(p.biological_role),
            },
            Entity::Feature(f) => {
                let mut ranges: Vec<_> = f.ranges.iter().map(|r| r.identity_key()).collect();
                ranges.sort_unstable();
                ranges.dedup();
                EntityKey::Feature {
                    label: f.short_label.clone(),
                    feature_type: self.boxed_key(f.feature_type),
                    ranges,
                }
            }
            Entity::CvTerm(t) => EntityKey::Term(match &t.identifier {
                Some(identifier) => TermKey::Identifier(identifier.clone()),
                None => TermKey::Label(t.short_label.clone()),
            }),
            Entity::Interactor(i) => {
                EntityKey::label(EntityKind::Interactor, &i.fields.short_label)
            }
            Entity::Complex(c) => EntityKey::label(EntityKind::Complex, &c.fields.short_label),
            Entity::Organism(o) => EntityKey::Taxon(o.tax_id),
            Entity::Source(s) => EntityKey::label(EntityKind::Source, &s.short_label),
            Entity::User(u) => EntityKey::Login(u.login.clone()),
            Entity::Role(r) => EntityKey::RoleName(r.name().to_owned()),
        };
        Some(key)
    }

    fn boxed_key(&self, id: Option<EntityId>) -> Option<Box<EntityKey>> {
        id.and_then(|id| self.identity_key(id)).map(Box::new)
    }

    /// True when both handles denote the same record by value
    #[must_use]
    pub fn same_entity(&self, a: EntityId, b: EntityId) -> bool {
        if a == b {
            return true;
        }
        match (self.identity_key(a), self.identity_key(b)) {
            (Some(ka), Some(kb)) => ka == kb,
            _ => false,
        }
    }

    /// Append `child` to the owned collection of `parent` and point its
    /// back-reference at `parent`
    ///
    /// # Errors
    /// Returns error if either handle is unknown or `parent` cannot own a
    /// record of the child's kind
    pub fn attach(&mut self, parent: EntityId, child: EntityId) -> Result<(), ModelError> {
        let child_kind = self.entity(child)?.kind();
        let parent_entity = self.entity_mut(parent)?;
        let parent_kind = parent_entity.kind();
        let children = match (parent_entity, child_kind) {
            (Entity::Publication(p), EntityKind::Experiment) => &mut p.experiments,
            (Entity::Experiment(e), EntityKind::InteractionEvidence) => {
                &mut e.interaction_evidences
            }
            (Entity::InteractionEvidence(i), EntityKind::Participant) => &mut i.participants,
            (Entity::Complex(c), EntityKind::Participant) => &mut c.participants,
            (Entity::Participant(p), EntityKind::Feature) => &mut p.features,
            _ => {
                return Err(ModelError::invariant(format!(
                    "a {parent_kind} cannot own a {child_kind}"
                )))
            }
        };
        if !children.contains(&child) {
            children.push(child);
        }
        self.entity_mut(child)?.set_parent(Some(parent));
        Ok(())
    }
}
