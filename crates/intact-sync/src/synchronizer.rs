//! Candidate synchronization
//!
//! Resolves the merge pair for a candidate through a [`RecordLocator`] and
//! hands it to the [`Merger`].

use crate::error::SyncError;
use crate::locator::RecordLocator;
use intact_merge::Merger;
use intact_model::{EntityId, Graph};

/// What happened to a synchronized candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No persisted counterpart; the candidate stands as a new record
    Created(EntityId),

    /// Candidate merged into its persisted counterpart
    Merged {
        /// Candidate handle
        source: EntityId,
        /// Persisted record that absorbed it
        target: EntityId,
    },
}

impl SyncOutcome {
    /// Handle of the record to save
    #[inline]
    #[must_use]
    pub fn record(&self) -> EntityId {
        match self {
            Self::Created(id) | Self::Merged { target: id, .. } => *id,
        }
    }

    /// True when the candidate was merged into an existing record
    #[inline]
    #[must_use]
    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

/// Locate-then-merge driver
#[derive(Debug)]
pub struct Synchronizer<L> {
    merger: Merger,
    locator: L,
}

impl<L: RecordLocator> Synchronizer<L> {
    /// Create synchronizer
    #[inline]
    #[must_use]
    pub fn new(merger: Merger, locator: L) -> Self {
        Self { merger, locator }
    }

    /// Merger applied to located pairs
    #[inline]
    #[must_use]
    pub fn merger(&self) -> &Merger {
        &self.merger
    }

    /// Locator used to find persisted counterparts
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Synchronize one candidate
    ///
    /// # Errors
    /// - [`SyncError::Lookup`] if the locator fails
    /// - [`SyncError::Merge`] if the merge fails; the persisted record is
    ///   then partially merged and must be re-fetched
    pub fn synchronize(
        &self,
        graph: &mut Graph,
        candidate: EntityId,
    ) -> Result<SyncOutcome, SyncError> {
        let kind = graph.kind(candidate);
        match self.locator.find(graph, candidate)? {
            None => {
                self.locator.remember(graph, candidate)?;
                tracing::info!(?kind, %candidate, "no persisted counterpart, kept as new record");
                Ok(SyncOutcome::Created(candidate))
            }
            Some(persisted) => {
                let target = self.merger.merge_pair(graph, candidate, persisted)?;
                tracing::info!(
                    ?kind,
                    %candidate,
                    %target,
                    policy = %self.merger.policy(),
                    "merged into persisted record"
                );
                Ok(SyncOutcome::Merged {
                    source: candidate,
                    target,
                })
            }
        }
    }

    /// Synchronize candidates in order, stopping at the first failure
    ///
    /// # Errors
    /// Returns the first candidate's error; earlier candidates stay
    /// synchronized
    pub fn synchronize_all(
        &self,
        graph: &mut Graph,
        candidates: impl IntoIterator<Item = EntityId>,
    ) -> Result<Vec<SyncOutcome>, SyncError> {
        let outcomes = candidates
            .into_iter()
            .map(|candidate| self.synchronize(graph, candidate))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            candidates = outcomes.len(),
            merged = outcomes.iter().filter(|o| o.is_merged()).count(),
            "batch synchronized"
        );
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::KeyIndexLocator;
    use intact_merge::Policy;
    use intact_test_utils::{create_persisted_publication, create_publication};

    #[test]
    fn outcome_points_at_record_to_save() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_eq!(SyncOutcome::Created(a).record(), a);
        let merged = SyncOutcome::Merged { source: a, target: b };
        assert_eq!(merged.record(), b);
        assert!(merged.is_merged());
    }

    #[test]
    fn batch_candidates_with_one_key_collapse() {
        let mut graph = Graph::new();
        let first = graph.insert(create_publication("15199141"));
        let second = graph.insert(create_publication("15199141"));
        let synchronizer = Synchronizer::new(
            Merger::with_policy(Policy::EnrichOnly),
            KeyIndexLocator::from_graph(&graph),
        );

        let outcomes = synchronizer.synchronize_all(&mut graph, [first, second]).unwrap();

        assert_eq!(
            outcomes,
            vec![
                SyncOutcome::Created(first),
                SyncOutcome::Merged {
                    source: second,
                    target: first
                }
            ]
        );
    }

    #[test]
    fn persisted_counterpart_absorbs_candidate() {
        let mut graph = Graph::new();
        let persisted = graph.insert(create_persisted_publication("15199141", "EBI-1"));
        let candidate = graph.insert(create_publication("15199141"));
        let synchronizer = Synchronizer::new(
            Merger::with_policy(Policy::Override),
            KeyIndexLocator::from_graph(&graph),
        );

        let outcome = synchronizer.synchronize(&mut graph, candidate).unwrap();

        assert_eq!(outcome.record(), persisted);
        assert_eq!(synchronizer.merger().policy(), Policy::Override);
    }
}
