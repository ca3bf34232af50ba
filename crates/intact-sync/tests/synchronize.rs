use intact_merge::{EnrichmentError, Merger, Policy, RecordingListener};
use intact_model::{Entity, EntityId, EntityKind, Experiment, Graph, Publication};
use intact_sync::{
    KeyIndexLocator, LookupError, RecordLocator, SyncError, SyncOutcome, Synchronizer,
};
use intact_test_utils::{
    create_experiment, create_persisted_publication, create_publication, init_tracing,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Store that answers a fixed number of lookups, then goes away
struct FlakyStore {
    inner: KeyIndexLocator,
    remaining: AtomicUsize,
}

impl RecordLocator for FlakyStore {
    fn find(&self, graph: &Graph, candidate: EntityId) -> Result<Option<EntityId>, LookupError> {
        let left = self.remaining.load(Ordering::SeqCst);
        if left == 0 {
            return Err(LookupError::Unreachable("connection reset".into()));
        }
        self.remaining.store(left - 1, Ordering::SeqCst);
        self.inner.find(graph, candidate)
    }
}

#[test]
fn publication_candidate_merges_into_persisted_record() {
    init_tracing();
    let mut graph = Graph::new();
    let mut persisted = create_persisted_publication("15199141", "EBI-1");
    persisted.title = Some("Functional organization of the yeast proteome".into());
    let persisted = graph.insert(persisted);

    let mut candidate = create_publication("15199141");
    candidate.journal = Some("Nature".into());
    let candidate = graph.insert(candidate);
    let experiment = graph.insert(create_experiment("gavin-2004-1", None));
    graph.attach(candidate, experiment).unwrap();

    let recorder = Arc::new(RecordingListener::new());
    let merger = Merger::builder()
        .policy(Policy::EnrichOnly)
        .listener(recorder.clone())
        .build()
        .unwrap();
    let synchronizer = Synchronizer::new(merger, KeyIndexLocator::from_graph(&graph));

    let outcome = synchronizer.synchronize(&mut graph, candidate).unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Merged {
            source: candidate,
            target: persisted
        }
    );
    let merged = graph.record::<Publication>(persisted).unwrap();
    assert_eq!(merged.journal.as_deref(), Some("Nature"));
    assert_eq!(
        merged.title.as_deref(),
        Some("Functional organization of the yeast proteome")
    );
    assert_eq!(merged.experiments, vec![experiment]);
    assert_eq!(graph.record::<Experiment>(experiment).unwrap().publication, Some(persisted));
    assert_eq!(recorder.added("experiments").len(), 1);
}

#[test]
fn unmatched_candidate_is_created() {
    let mut graph = Graph::new();
    graph.insert(create_persisted_publication("15199141", "EBI-1"));
    let candidate = graph.insert(create_publication("23456789"));
    let synchronizer = Synchronizer::new(
        Merger::with_policy(Policy::Override),
        KeyIndexLocator::from_graph(&graph),
    );

    assert_eq!(
        synchronizer.synchronize(&mut graph, candidate).unwrap(),
        SyncOutcome::Created(candidate)
    );
    assert_eq!(synchronizer.locator().len(), 2);
}

#[test]
fn batch_stops_at_first_unreachable_lookup() {
    let mut graph = Graph::new();
    let persisted = graph.insert(create_persisted_publication("1", "EBI-1"));
    let first = graph.insert(create_publication("1"));
    let second = graph.insert(create_publication("2"));
    let third = graph.insert(create_publication("3"));
    let store = FlakyStore {
        inner: KeyIndexLocator::from_graph(&graph),
        remaining: AtomicUsize::new(1),
    };
    let synchronizer = Synchronizer::new(Merger::with_policy(Policy::EnrichOnly), store);

    let err = synchronizer
        .synchronize_all(&mut graph, [first, second, third])
        .unwrap_err();

    assert_eq!(
        err,
        SyncError::Lookup(LookupError::Unreachable("connection reset".into()))
    );
    // first candidate was merged before the store went away
    assert!(graph.contains(persisted));
}

#[test]
fn merge_failures_surface_as_sync_errors() {
    let mut graph = Graph::new();
    graph.insert(create_persisted_publication("1", "EBI-1"));
    let candidate = graph.insert(create_publication("1"));

    let rejecting = |target: &mut Entity, _: &Entity| -> Result<(), EnrichmentError> {
        Err(EnrichmentError::Rejected {
            kind: target.kind(),
            reason: "retracted".into(),
        })
    };
    let merger = Merger::builder()
        .policy(Policy::EnrichOnly)
        .enricher(EntityKind::Publication, Arc::new(rejecting))
        .build()
        .unwrap();
    let synchronizer = Synchronizer::new(merger, KeyIndexLocator::from_graph(&graph));

    let err = synchronizer.synchronize(&mut graph, candidate).unwrap_err();

    assert!(matches!(
        err,
        SyncError::Merge(intact_merge::MergeError::Enrichment(EnrichmentError::Rejected { .. }))
    ));
}
