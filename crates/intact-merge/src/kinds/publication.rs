use super::KindMerger;
use crate::context::{MergeContext, Ownership};
use crate::error::MergeError;
use intact_model::{EntityId, Graph, Publication};

pub(crate) struct PublicationMerger;

impl KindMerger for PublicationMerger {
    type Record = Publication;

    fn reconcile_scalars(
        target: &mut Publication,
        source: &Publication,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.required("short_label", &mut target.short_label, &source.short_label);
        ctx.optional("title", &mut target.title, &source.title);
        ctx.optional("journal", &mut target.journal, &source.journal);
        ctx.optional("status", &mut target.status, &source.status);
        ctx.optional("curator", &mut target.curator, &source.curator);
        ctx.optional("reviewer", &mut target.reviewer, &source.reviewer);
        ctx.optional("source", &mut target.source, &source.source);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &Publication,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<Publication>(ctx.target())?;
        ctx.elements("lifecycle_events", &mut target.lifecycle_events, &source.lifecycle_events);
        ctx.elements("xrefs", &mut target.xrefs, &source.xrefs);
        ctx.elements("annotations", &mut target.annotations, &source.annotations);
        ctx.members::<Publication>(
            graph,
            "experiments",
            |p| &mut p.experiments,
            &source.experiments,
            Ownership::Owned,
        )?;
        Ok(())
    }

    fn institution(record: &mut Publication) -> Option<&mut Option<EntityId>> {
        Some(&mut record.source)
    }
}
