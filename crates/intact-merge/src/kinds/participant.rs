use super::KindMerger;
use crate::context::{MergeContext, Ownership};
use crate::error::MergeError;
use intact_model::{Graph, Participant};

pub(crate) struct ParticipantMerger;

impl KindMerger for ParticipantMerger {
    type Record = Participant;

    fn reconcile_scalars(
        target: &mut Participant,
        source: &Participant,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.optional("interactor", &mut target.interactor, &source.interactor);
        ctx.optional("biological_role", &mut target.biological_role, &source.biological_role);
        ctx.optional(
            "experimental_role",
            &mut target.experimental_role,
            &source.experimental_role,
        );
        ctx.optional("stoichiometry", &mut target.stoichiometry, &source.stoichiometry);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &Participant,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<Participant>(ctx.target())?;
        ctx.elements("xrefs", &mut target.xrefs, &source.xrefs);
        ctx.elements("aliases", &mut target.aliases, &source.aliases);
        ctx.elements("annotations", &mut target.annotations, &source.annotations);
        ctx.members::<Participant>(
            graph,
            "features",
            |p| &mut p.features,
            &source.features,
            Ownership::Owned,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Merger, Policy};
    use intact_model::{Feature, Graph, Interactor, Participant, Range};
    use pretty_assertions::assert_eq;

    #[test]
    fn stoichiometry_is_filled_not_overwritten() {
        let mut graph = Graph::new();
        let protein = graph.insert(Interactor::new("brca2_human").unwrap());
        let mut source = Participant::new(protein);
        source.stoichiometry = Some(2);
        let source = graph.insert(source);
        let mut target = Participant::new(protein);
        target.stoichiometry = Some(1);
        let target = graph.insert(target);

        let merger = Merger::with_policy(Policy::EnrichOnly);
        merger.merge_pair(&mut graph, source, target).unwrap();
        assert_eq!(graph.record::<Participant>(target).unwrap().stoichiometry, Some(1));

        let merger = Merger::with_policy(Policy::Override);
        merger.merge_pair(&mut graph, source, target).unwrap();
        assert_eq!(graph.record::<Participant>(target).unwrap().stoichiometry, Some(2));
    }

    #[test]
    fn features_are_adopted() {
        let mut graph = Graph::new();
        let protein = graph.insert(Interactor::new("brca2_human").unwrap());
        let source = graph.insert(Participant::new(protein));
        let target = graph.insert(Participant::new(protein));
        let feature = graph.insert(Feature::new("binding site").unwrap());
        graph.attach(source, feature).unwrap();

        Merger::with_policy(Policy::EnrichOnly)
            .merge_pair(&mut graph, source, target)
            .unwrap();

        assert_eq!(graph.record::<Participant>(target).unwrap().features, vec![feature]);
        assert_eq!(graph.record::<Feature>(feature).unwrap().participant, Some(target));
    }

    #[test]
    fn override_swaps_features_on_different_regions() {
        let binding_site = |start, end| {
            let mut feature = Feature::new("binding site").unwrap();
            feature.ranges = vec![Range::new(start, end).unwrap()];
            feature
        };
        let mut graph = Graph::new();
        let protein = graph.insert(Interactor::new("brca2_human").unwrap());
        let source = graph.insert(Participant::new(protein));
        let target = graph.insert(Participant::new(protein));
        let c_terminal = graph.insert(binding_site(400, 450));
        let n_terminal = graph.insert(binding_site(10, 20));
        graph.attach(source, c_terminal).unwrap();
        graph.attach(target, n_terminal).unwrap();

        Merger::with_policy(Policy::Override)
            .merge_pair(&mut graph, source, target)
            .unwrap();

        assert_eq!(graph.record::<Participant>(target).unwrap().features, vec![c_terminal]);
        assert_eq!(graph.record::<Feature>(c_terminal).unwrap().participant, Some(target));
        assert_eq!(graph.record::<Feature>(n_terminal).unwrap().participant, None);
    }
}
