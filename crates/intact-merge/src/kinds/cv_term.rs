use super::KindMerger;
use crate::context::{MergeContext, Ownership};
use crate::error::MergeError;
use intact_model::{CvTerm, Graph};

pub(crate) struct CvTermMerger;

impl KindMerger for CvTermMerger {
    type Record = CvTerm;

    fn reconcile_scalars(
        target: &mut CvTerm,
        source: &CvTerm,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.required("short_label", &mut target.short_label, &source.short_label);
        ctx.optional("full_name", &mut target.full_name, &source.full_name);
        ctx.optional("identifier", &mut target.identifier, &source.identifier);
        ctx.optional("definition", &mut target.definition, &source.definition);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &CvTerm,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<CvTerm>(ctx.target())?;
        ctx.elements("xrefs", &mut target.xrefs, &source.xrefs);
        ctx.elements("annotations", &mut target.annotations, &source.annotations);
        ctx.elements("synonyms", &mut target.synonyms, &source.synonyms);
        ctx.members::<CvTerm>(
            graph,
            "parents",
            |t| &mut t.parents,
            &source.parents,
            Ownership::Shared,
        )?;
        Ok(())
    }
}
