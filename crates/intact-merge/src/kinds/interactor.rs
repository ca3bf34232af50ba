use super::KindMerger;
use crate::context::MergeContext;
use crate::error::MergeError;
use intact_model::{Graph, Interactor, InteractorFields};

pub(crate) struct InteractorMerger;

/// Scalars shared by interactors and complexes
pub(super) fn reconcile_interactor_scalars(
    target: &mut InteractorFields,
    source: &InteractorFields,
    ctx: &MergeContext<'_>,
) {
    ctx.required("short_label", &mut target.short_label, &source.short_label);
    ctx.optional("full_name", &mut target.full_name, &source.full_name);
    ctx.optional("interactor_type", &mut target.interactor_type, &source.interactor_type);
    ctx.optional("organism", &mut target.organism, &source.organism);
}

/// Element collections shared by interactors and complexes
pub(super) fn reconcile_interactor_elements(
    target: &mut InteractorFields,
    source: &InteractorFields,
    ctx: &MergeContext<'_>,
) {
    ctx.elements("xrefs", &mut target.xrefs, &source.xrefs);
    ctx.elements("aliases", &mut target.aliases, &source.aliases);
    ctx.elements("annotations", &mut target.annotations, &source.annotations);
    ctx.elements("checksums", &mut target.checksums, &source.checksums);
}

impl KindMerger for InteractorMerger {
    type Record = Interactor;

    fn reconcile_scalars(
        target: &mut Interactor,
        source: &Interactor,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        reconcile_interactor_scalars(&mut target.fields, &source.fields, ctx);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &Interactor,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<Interactor>(ctx.target())?;
        reconcile_interactor_elements(&mut target.fields, &source.fields, ctx);
        Ok(())
    }
}
