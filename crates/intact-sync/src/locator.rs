//! Record locator contract and an in-memory key index
//!
//! A locator answers one question: which persisted record, if any, is the
//! counterpart of a candidate? Matching is by [`EntityKey`], never by handle.

use crate::error::LookupError;
use dashmap::DashMap;
use intact_model::{EntityId, EntityKey, Graph, ModelError};

/// Resolves the persisted counterpart of a candidate record
pub trait RecordLocator: Send + Sync {
    /// Persisted record matching `candidate`, if any
    ///
    /// The candidate itself is never returned.
    ///
    /// # Errors
    /// - [`LookupError::Unreachable`] if the store cannot be queried
    /// - [`LookupError::Ambiguous`] if several persisted records match
    /// - [`LookupError::Model`] if `candidate` is not in `graph`
    fn find(&self, graph: &Graph, candidate: EntityId) -> Result<Option<EntityId>, LookupError>;

    /// Make `record` findable by later lookups of the same session
    ///
    /// Called after a candidate was kept as a new record. Defaults to a
    /// no-op for locators backed by a store that learns on save.
    ///
    /// # Errors
    /// Returns error if `record` is not in `graph`
    fn remember(&self, _graph: &Graph, _record: EntityId) -> Result<(), LookupError> {
        Ok(())
    }
}

/// Locator over an in-memory index of identity keys
///
/// Thread-safe: lookups and registrations may run concurrently.
#[derive(Debug, Default)]
pub struct KeyIndexLocator {
    index: DashMap<EntityKey, Vec<EntityId>>,
}

impl KeyIndexLocator {
    /// Create empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every persisted record of `graph` (those carrying an accession)
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let locator = Self::new();
        for (id, entity) in graph.iter() {
            if entity.ac().is_none() {
                continue;
            }
            if let Some(key) = graph.identity_key(id) {
                locator.index.entry(key).or_default().push(id);
            }
        }
        tracing::debug!(keys = locator.index.len(), "key index built");
        locator
    }

    /// Add `record` to the index
    ///
    /// # Errors
    /// Returns [`LookupError::Model`] if `record` is not in `graph`
    pub fn register(&self, graph: &Graph, record: EntityId) -> Result<(), LookupError> {
        let key = graph
            .identity_key(record)
            .ok_or(ModelError::UnknownEntity(record))?;
        let mut ids = self.index.entry(key).or_default();
        if !ids.contains(&record) {
            ids.push(record);
        }
        Ok(())
    }

    /// Number of distinct keys indexed
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when nothing is indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl RecordLocator for KeyIndexLocator {
    fn find(&self, graph: &Graph, candidate: EntityId) -> Result<Option<EntityId>, LookupError> {
        let key = graph
            .identity_key(candidate)
            .ok_or(ModelError::UnknownEntity(candidate))?;
        let Some(ids) = self.index.get(&key) else {
            return Ok(None);
        };
        let matches: Vec<EntityId> = ids.iter().copied().filter(|id| *id != candidate).collect();
        match matches.as_slice() {
            [] => Ok(None),
            [single] => Ok(Some(*single)),
            _ => Err(LookupError::Ambiguous {
                count: matches.len(),
                key,
            }),
        }
    }

    fn remember(&self, graph: &Graph, record: EntityId) -> Result<(), LookupError> {
        self.register(graph, record)
    }
}
