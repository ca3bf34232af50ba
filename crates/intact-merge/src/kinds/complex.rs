use super::interactor::{reconcile_interactor_elements, reconcile_interactor_scalars};
use super::KindMerger;
use crate::context::{MergeContext, Ownership};
use crate::error::MergeError;
use intact_model::{Complex, EntityId, Graph};

pub(crate) struct ComplexMerger;

impl KindMerger for ComplexMerger {
    type Record = Complex;

    fn reconcile_scalars(
        target: &mut Complex,
        source: &Complex,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        reconcile_interactor_scalars(&mut target.fields, &source.fields, ctx);
        ctx.optional("status", &mut target.status, &source.status);
        ctx.optional("curator", &mut target.curator, &source.curator);
        ctx.optional("reviewer", &mut target.reviewer, &source.reviewer);
        ctx.optional("source", &mut target.source, &source.source);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &Complex,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<Complex>(ctx.target())?;
        reconcile_interactor_elements(&mut target.fields, &source.fields, ctx);
        ctx.elements("lifecycle_events", &mut target.lifecycle_events, &source.lifecycle_events);
        ctx.members::<Complex>(
            graph,
            "participants",
            |c| &mut c.participants,
            &source.participants,
            Ownership::Owned,
        )?;
        Ok(())
    }

    fn institution(record: &mut Complex) -> Option<&mut Option<EntityId>> {
        Some(&mut record.source)
    }
}
