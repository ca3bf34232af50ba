//! Merge engine entry point
//!
//! [`Merger`] combines a source record with its persisted target inside one
//! [`Graph`], mutating the target in place.

use crate::audit::reconcile_audit;
use crate::backref::fixup_back_reference;
use crate::config::MergeConfig;
use crate::context::MergeContext;
use crate::enricher::ScalarEnricher;
use crate::error::{ConfigError, MergeError};
use crate::kinds::{
    ComplexMerger, CvTermMerger, ExperimentMerger, FeatureMerger, InteractionEvidenceMerger,
    InteractorMerger, KindMerger, OrganismMerger, ParticipantMerger, PublicationMerger, RoleMerger,
    SourceMerger, UserMerger,
};
use crate::listener::{FieldChange, FieldValue, MergeListener, NoopListener};
use crate::policy::Policy;
use intact_model::{Entity, EntityId, EntityKind, EntityVariant, Graph};
use std::collections::HashMap;
use std::sync::Arc;

/// Reconciliation engine
///
/// Policy, listener, enrichers and default institution are fixed at
/// construction. A `Merger` holds no per-call state and can be shared
/// between threads that each own their graph.
pub struct Merger {
    policy: Policy,
    listener: Arc<dyn MergeListener>,
    enrichers: HashMap<EntityKind, Arc<dyn ScalarEnricher>>,
    default_institution: Option<EntityId>,
}

impl std::fmt::Debug for Merger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut enriched: Vec<_> = self.enrichers.keys().copied().collect();
        enriched.sort_by_key(EntityKind::as_str);
        f.debug_struct("Merger")
            .field("policy", &self.policy)
            .field("enriched_kinds", &enriched)
            .field("default_institution", &self.default_institution)
            .finish_non_exhaustive()
    }
}

impl Merger {
    /// Start building a merger
    #[inline]
    #[must_use]
    pub fn builder() -> MergerBuilder {
        MergerBuilder::default()
    }

    /// Merger with `policy`, no listener, no enrichers
    #[must_use]
    pub fn with_policy(policy: Policy) -> Self {
        Self {
            policy,
            listener: Arc::new(NoopListener),
            enrichers: HashMap::new(),
            default_institution: None,
        }
    }

    /// Policy applied by every merge
    #[inline]
    #[must_use]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Merge `source` into `target`
    ///
    /// - absent target: returns the source (it becomes a new record)
    /// - absent source: returns the target
    /// - otherwise see [`Merger::merge_pair`]
    ///
    /// # Errors
    /// See [`Merger::merge_pair`]
    pub fn merge(
        &self,
        graph: &mut Graph,
        source: Option<EntityId>,
        target: Option<EntityId>,
    ) -> Result<Option<EntityId>, MergeError> {
        match (source, target) {
            (Some(source), Some(target)) => self.merge_pair(graph, source, target).map(Some),
            (source, None) => Ok(source),
            (None, target) => Ok(target),
        }
    }

    /// Merge the record behind `source` into the record behind `target`
    ///
    /// Steps: back-reference fixup, audit, scalars (or the kind's enricher),
    /// default institution, collections. The same handle on both sides and
    /// [`Policy::KeepTarget`] return `target` untouched. The source record
    /// itself is never modified; owned children it lists may be re-parented
    /// to the target.
    ///
    /// # Errors
    /// - [`MergeError::Model`] if either handle is unknown
    /// - [`MergeError::KindMismatch`] if the records differ in kind
    /// - [`MergeError::Enrichment`] if the kind's enricher fails; the target
    ///   is then partially merged (back-reference and audit applied)
    pub fn merge_pair(
        &self,
        graph: &mut Graph,
        source: EntityId,
        target: EntityId,
    ) -> Result<EntityId, MergeError> {
        if source == target {
            return Ok(target);
        }
        let mut record = graph.entity(source)?.clone();
        let kind = graph.entity(target)?.kind();
        if record.kind() != kind {
            return Err(MergeError::KindMismatch {
                source_kind: record.kind(),
                target_kind: kind,
            });
        }

        let span = tracing::debug_span!("merge", %kind, %source, %target, policy = %self.policy);
        let _guard = span.enter();

        if !self.policy.mutates_target() {
            tracing::debug!("source ignored");
            return Ok(target);
        }

        let ctx = MergeContext::new(self.policy, self.listener.as_ref(), target);
        let record = &mut record;
        let result = match kind {
            EntityKind::Publication => self.merge_record::<PublicationMerger>(graph, record, &ctx),
            EntityKind::Experiment => self.merge_record::<ExperimentMerger>(graph, record, &ctx),
            EntityKind::InteractionEvidence => {
                self.merge_record::<InteractionEvidenceMerger>(graph, record, &ctx)
            }
            EntityKind::Participant => self.merge_record::<ParticipantMerger>(graph, record, &ctx),
            EntityKind::Feature => self.merge_record::<FeatureMerger>(graph, record, &ctx),
            EntityKind::CvTerm => self.merge_record::<CvTermMerger>(graph, record, &ctx),
            EntityKind::Interactor => self.merge_record::<InteractorMerger>(graph, record, &ctx),
            EntityKind::Complex => self.merge_record::<ComplexMerger>(graph, record, &ctx),
            EntityKind::Organism => self.merge_record::<OrganismMerger>(graph, record, &ctx),
            EntityKind::Source => self.merge_record::<SourceMerger>(graph, record, &ctx),
            EntityKind::User => self.merge_record::<UserMerger>(graph, record, &ctx),
            EntityKind::Role => self.merge_record::<RoleMerger>(graph, record, &ctx),
        };

        match result {
            Ok(()) => {
                tracing::debug!("merged");
                Ok(target)
            }
            Err(err) => {
                tracing::warn!(error = %err, "merge aborted, target left partially merged");
                Err(err)
            }
        }
    }

    /// `source` is a private copy of the source record; the default
    /// institution is folded into it so both policies compare against the
    /// effective value
    fn merge_record<K: KindMerger>(
        &self,
        graph: &mut Graph,
        source: &mut Entity,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let kind = K::Record::KIND;
        if let Some(institution) = self.default_institution {
            let slot = K::Record::from_entity_mut(source).and_then(K::institution);
            if let Some(slot) = slot.filter(|slot| slot.is_none()) {
                *slot = Some(institution);
            }
        }
        let source = &*source;
        let source_record = K::Record::from_entity(source).ok_or(MergeError::KindMismatch {
            source_kind: source.kind(),
            target_kind: kind,
        })?;
        let enricher = self.enrichers.get(&kind);

        {
            let target = graph.entity_mut(ctx.target())?;
            if let Some(change) = fixup_back_reference(target, source) {
                ctx.field_changed(&change);
            }
            for change in reconcile_audit(target.audit_mut(), source.audit(), ctx.policy()) {
                ctx.field_changed(&change);
            }
            if let Some(enricher) = enricher {
                enricher.enrich_scalar_fields(target, source)?;
            }
        }

        let target = graph.record_mut::<K::Record>(ctx.target())?;
        if enricher.is_none() {
            K::reconcile_scalars(target, source_record, ctx)?;
        }
        if let Some(institution) = self.default_institution {
            if let Some(slot) = K::institution(target).filter(|slot| slot.is_none()) {
                *slot = Some(institution);
                ctx.field_changed(&FieldChange::new("source", FieldValue::Absent, institution));
            }
        }

        K::reconcile_collections(graph, source_record, ctx)
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::with_policy(Policy::EnrichOnly)
    }
}

/// Builder for [`Merger`]
///
/// Collaborators are validated by [`MergerBuilder::build`]; a built merger
/// never raises configuration errors.
#[derive(Default)]
pub struct MergerBuilder {
    policy: Option<Policy>,
    required: Vec<EntityKind>,
    listener: Option<Arc<dyn MergeListener>>,
    enrichers: Vec<(EntityKind, Arc<dyn ScalarEnricher>)>,
    default_institution: Option<EntityId>,
}

impl MergerBuilder {
    /// Set policy
    #[must_use]
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Apply a loaded configuration (policy and enrichment requirements)
    #[must_use]
    pub fn config(mut self, config: MergeConfig) -> Self {
        self.policy = Some(config.policy);
        self.required = config.enrichment.required;
        self
    }

    /// Set change listener; defaults to [`NoopListener`]
    #[must_use]
    pub fn listener(mut self, listener: Arc<dyn MergeListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Register the scalar enricher for `kind`
    #[must_use]
    pub fn enricher(mut self, kind: EntityKind, enricher: Arc<dyn ScalarEnricher>) -> Self {
        self.enrichers.push((kind, enricher));
        self
    }

    /// Institution assigned to publications and complexes that have none
    #[must_use]
    pub fn default_institution(mut self, source: EntityId) -> Self {
        self.default_institution = Some(source);
        self
    }

    /// Validate and build
    ///
    /// # Errors
    /// - [`ConfigError::MissingPolicy`] if no policy was set
    /// - [`ConfigError::DuplicateEnricher`] if a kind has two enrichers
    /// - [`ConfigError::MissingEnricher`] if a required kind has none
    pub fn build(self) -> Result<Merger, ConfigError> {
        let policy = self.policy.ok_or(ConfigError::MissingPolicy)?;

        let mut enrichers = HashMap::with_capacity(self.enrichers.len());
        for (kind, enricher) in self.enrichers {
            if enrichers.insert(kind, enricher).is_some() {
                return Err(ConfigError::DuplicateEnricher(kind));
            }
        }
        if let Some(kind) = self.required.iter().find(|kind| !enrichers.contains_key(kind)) {
            return Err(ConfigError::MissingEnricher(*kind));
        }

        let listener: Arc<dyn MergeListener> = match self.listener {
            Some(listener) => listener,
            None => Arc::new(NoopListener),
        };

        tracing::debug!(
            %policy,
            enrichers = enrichers.len(),
            default_institution = ?self.default_institution,
            "merger built"
        );

        Ok(Merger {
            policy,
            listener,
            enrichers,
            default_institution: self.default_institution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enricher::EnrichmentError;
    use crate::listener::RecordingListener;
    use intact_model::{CvTerm, Experiment, Publication, Source, User};
    use intact_test_utils::{create_experiment, create_publication, create_term};
    use pretty_assertions::assert_eq;

    fn failing(_: &mut Entity, _: &Entity) -> Result<(), EnrichmentError> {
        Err(EnrichmentError::Unavailable("ols down".into()))
    }

    fn passing(_: &mut Entity, _: &Entity) -> Result<(), EnrichmentError> {
        Ok(())
    }

    #[test]
    fn absent_sides_short_circuit() {
        let mut graph = Graph::new();
        let id = graph.insert(create_publication("1"));
        let merger = Merger::default();

        assert_eq!(merger.merge(&mut graph, Some(id), None).unwrap(), Some(id));
        assert_eq!(merger.merge(&mut graph, None, Some(id)).unwrap(), Some(id));
        assert_eq!(merger.merge(&mut graph, None, None).unwrap(), None);
        assert_eq!(merger.merge(&mut graph, Some(id), Some(id)).unwrap(), Some(id));
    }

    #[test]
    fn keep_target_leaves_target_untouched() {
        let mut graph = Graph::new();
        let mut source = create_publication("1");
        source.title = Some("A title".into());
        let source = graph.insert(source);
        let target = graph.insert(create_publication("2"));
        let before = graph.entity(target).unwrap().clone();

        let merged = Merger::with_policy(Policy::KeepTarget)
            .merge_pair(&mut graph, source, target)
            .unwrap();

        assert_eq!(merged, target);
        assert_eq!(graph.entity(target).unwrap(), &before);
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let mut graph = Graph::new();
        let source = graph.insert(User::new("curator1").unwrap());
        let target = graph.insert(create_publication("1"));
        let err = Merger::default().merge_pair(&mut graph, source, target).unwrap_err();
        assert_eq!(
            err,
            MergeError::KindMismatch {
                source_kind: EntityKind::User,
                target_kind: EntityKind::Publication,
            }
        );
    }

    #[test]
    fn unknown_handles_are_model_errors() {
        let mut graph = Graph::new();
        let target = graph.insert(create_publication("1"));
        let err = Merger::default()
            .merge_pair(&mut graph, EntityId::new(), target)
            .unwrap_err();
        assert!(matches!(err, MergeError::Model(_)));
    }

    #[test]
    fn builder_validates_collaborators() {
        assert!(matches!(Merger::builder().build(), Err(ConfigError::MissingPolicy)));

        let config =
            MergeConfig::new(Policy::EnrichOnly).with_required_enrichment(EntityKind::CvTerm);
        assert!(matches!(
            Merger::builder().config(config.clone()).build(),
            Err(ConfigError::MissingEnricher(EntityKind::CvTerm))
        ));
        assert!(Merger::builder()
            .config(config)
            .enricher(EntityKind::CvTerm, Arc::new(passing))
            .build()
            .is_ok());

        assert!(matches!(
            Merger::builder()
                .policy(Policy::Override)
                .enricher(EntityKind::Organism, Arc::new(passing))
                .enricher(EntityKind::Organism, Arc::new(failing))
                .build(),
            Err(ConfigError::DuplicateEnricher(EntityKind::Organism))
        ));
    }

    #[test]
    fn enricher_replaces_built_in_scalar_step() {
        let mut graph = Graph::new();
        let mut source = create_term("two hybrid", "MI:0018");
        source.definition = Some("from source".into());
        source.synonyms = vec![intact_model::Alias::new("Y2H").unwrap()];
        let source = graph.insert(source);
        let target = graph.insert(create_term("two hybrid", "MI:0018"));

        let merger = Merger::builder()
            .policy(Policy::EnrichOnly)
            .enricher(EntityKind::CvTerm, Arc::new(passing))
            .build()
            .unwrap();
        merger.merge_pair(&mut graph, source, target).unwrap();

        let merged = graph.record::<CvTerm>(target).unwrap();
        assert_eq!(merged.definition, None);
        assert_eq!(merged.synonyms.len(), 1);
    }

    #[test]
    fn enrichment_failure_leaves_partial_merge() {
        let mut graph = Graph::new();
        let p1 = graph.insert(create_publication("111"));
        let mut source = create_experiment("exp-1", Some(p1));
        source.xrefs = vec![intact_model::Xref::new("imex", "IM-1").unwrap()];
        source.audit =
            intact_model::Audit::created_by("importer", intact_test_utils::ts(2024, 2, 1));
        let source = graph.insert(source);
        let target = graph.insert(create_experiment("exp-1", None));

        let merger = Merger::builder()
            .policy(Policy::EnrichOnly)
            .enricher(EntityKind::Experiment, Arc::new(failing))
            .build()
            .unwrap();
        let err = merger.merge_pair(&mut graph, source, target).unwrap_err();

        assert_eq!(err, MergeError::Enrichment(EnrichmentError::Unavailable("ols down".into())));
        let partial = graph.record::<Experiment>(target).unwrap();
        assert_eq!(partial.publication, Some(p1));
        assert_eq!(partial.audit.creator.as_deref(), Some("importer"));
        assert!(partial.xrefs.is_empty());
    }

    #[test]
    fn default_institution_fills_missing_source() {
        let mut graph = Graph::new();
        let intact = graph.insert(Source::new("intact").unwrap());
        let mint = graph.insert(Source::new("mint").unwrap());
        let source = graph.insert(create_publication("1"));
        let orphan = graph.insert(create_publication("1"));
        let mut owned = create_publication("1");
        owned.source = Some(mint);
        let owned = graph.insert(owned);

        let merger = Merger::builder()
            .policy(Policy::EnrichOnly)
            .default_institution(intact)
            .build()
            .unwrap();
        merger.merge_pair(&mut graph, source, orphan).unwrap();
        merger.merge_pair(&mut graph, source, owned).unwrap();

        assert_eq!(graph.record::<Publication>(orphan).unwrap().source, Some(intact));
        assert_eq!(graph.record::<Publication>(owned).unwrap().source, Some(mint));
    }

    #[test]
    fn converged_override_merge_with_default_institution_is_silent() {
        let mut graph = Graph::new();
        let intact = graph.insert(Source::new("intact").unwrap());
        let source = graph.insert(create_publication("1"));
        let target = graph.insert(create_publication("1"));
        let recorder = Arc::new(RecordingListener::new());
        let merger = Merger::builder()
            .policy(Policy::Override)
            .listener(recorder.clone())
            .default_institution(intact)
            .build()
            .unwrap();

        merger.merge_pair(&mut graph, source, target).unwrap();
        assert_eq!(recorder.field_changes("source").len(), 1);
        let once = graph.entity(target).unwrap().clone();
        let _ = recorder.take();

        merger.merge_pair(&mut graph, source, target).unwrap();

        assert!(recorder.is_empty(), "unexpected events: {:?}", recorder.events());
        assert_eq!(graph.entity(target).unwrap(), &once);
        assert_eq!(graph.record::<Publication>(target).unwrap().source, Some(intact));
        assert_eq!(graph.record::<Publication>(source).unwrap().source, None);
    }

    #[test]
    fn merger_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Merger>();
    }
}
