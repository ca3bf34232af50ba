use super::KindMerger;
use crate::context::MergeContext;
use crate::error::MergeError;
use intact_model::{Feature, Graph};

pub(crate) struct FeatureMerger;

impl KindMerger for FeatureMerger {
    type Record = Feature;

    fn reconcile_scalars(
        target: &mut Feature,
        source: &Feature,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.required("short_label", &mut target.short_label, &source.short_label);
        ctx.optional("full_name", &mut target.full_name, &source.full_name);
        ctx.optional("feature_type", &mut target.feature_type, &source.feature_type);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &Feature,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<Feature>(ctx.target())?;
        ctx.elements("ranges", &mut target.ranges, &source.ranges);
        ctx.elements("xrefs", &mut target.xrefs, &source.xrefs);
        ctx.elements("aliases", &mut target.aliases, &source.aliases);
        ctx.elements("annotations", &mut target.annotations, &source.annotations);
        Ok(())
    }
}
