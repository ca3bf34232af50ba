use super::KindMerger;
use crate::context::{MergeContext, Ownership};
use crate::error::MergeError;
use intact_model::{Experiment, Graph};

pub(crate) struct ExperimentMerger;

impl KindMerger for ExperimentMerger {
    type Record = Experiment;

    fn reconcile_scalars(
        target: &mut Experiment,
        source: &Experiment,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.required("short_label", &mut target.short_label, &source.short_label);
        ctx.optional(
            "interaction_detection_method",
            &mut target.interaction_detection_method,
            &source.interaction_detection_method,
        );
        ctx.optional(
            "participant_identification_method",
            &mut target.participant_identification_method,
            &source.participant_identification_method,
        );
        ctx.optional("host_organism", &mut target.host_organism, &source.host_organism);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &Experiment,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<Experiment>(ctx.target())?;
        ctx.elements("xrefs", &mut target.xrefs, &source.xrefs);
        ctx.elements("annotations", &mut target.annotations, &source.annotations);
        ctx.members::<Experiment>(
            graph,
            "interaction_evidences",
            |e| &mut e.interaction_evidences,
            &source.interaction_evidences,
            Ownership::Owned,
        )?;
        Ok(())
    }
}
