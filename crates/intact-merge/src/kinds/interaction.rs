use super::KindMerger;
use crate::context::{MergeContext, Ownership};
use crate::error::MergeError;
use intact_model::{Graph, InteractionEvidence};

pub(crate) struct InteractionEvidenceMerger;

impl KindMerger for InteractionEvidenceMerger {
    type Record = InteractionEvidence;

    fn reconcile_scalars(
        target: &mut InteractionEvidence,
        source: &InteractionEvidence,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.required("short_label", &mut target.short_label, &source.short_label);
        ctx.optional("interaction_type", &mut target.interaction_type, &source.interaction_type);
        ctx.optional("imex_id", &mut target.imex_id, &source.imex_id);
        ctx.required("negative", &mut target.negative, &source.negative);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &InteractionEvidence,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<InteractionEvidence>(ctx.target())?;
        ctx.elements("xrefs", &mut target.xrefs, &source.xrefs);
        ctx.elements("annotations", &mut target.annotations, &source.annotations);
        ctx.members::<InteractionEvidence>(
            graph,
            "participants",
            |i| &mut i.participants,
            &source.participants,
            Ownership::Owned,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Merger, Policy};
    use intact_model::{Graph, InteractionEvidence, Interactor, Participant};
    use pretty_assertions::assert_eq;

    fn interaction(
        graph: &mut Graph,
        imex: Option<&str>,
        interactors: &[&str],
    ) -> intact_model::EntityId {
        let mut record = InteractionEvidence::new("brca2-palb2").unwrap();
        record.imex_id = imex.map(str::to_owned);
        let id = graph.insert(record);
        for label in interactors {
            let protein = graph.insert(Interactor::new(*label).unwrap());
            let participant = graph.insert(Participant::new(protein));
            graph.attach(id, participant).unwrap();
        }
        id
    }

    #[test]
    fn enrich_only_keeps_imex_id_and_negative_flag() {
        let mut graph = Graph::new();
        let source = interaction(&mut graph, Some("IM-2"), &[]);
        graph.record_mut::<InteractionEvidence>(source).unwrap().negative = true;
        let target = interaction(&mut graph, Some("IM-1"), &[]);

        Merger::with_policy(Policy::EnrichOnly)
            .merge_pair(&mut graph, source, target)
            .unwrap();

        let merged = graph.record::<InteractionEvidence>(target).unwrap();
        assert_eq!(merged.imex_id.as_deref(), Some("IM-1"));
        assert!(!merged.negative);
    }

    #[test]
    fn participants_match_by_interactor() {
        let mut graph = Graph::new();
        let source = interaction(&mut graph, None, &["brca2_human", "palb2_human"]);
        let target = interaction(&mut graph, None, &["brca2_human", "rad51_human"]);
        let original = graph.record::<InteractionEvidence>(target).unwrap().participants.clone();

        Merger::with_policy(Policy::Override)
            .merge_pair(&mut graph, source, target)
            .unwrap();

        let merged = &graph.record::<InteractionEvidence>(target).unwrap().participants;
        assert_eq!(merged.len(), 2);
        // brca2 participant is the target's own instance
        assert_eq!(merged[0], original[0]);
        assert_eq!(graph.entity(merged[1]).unwrap().parent(), Some(target));
        assert_eq!(graph.entity(original[1]).unwrap().parent(), None);
    }
}
