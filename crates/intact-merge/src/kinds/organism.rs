use super::KindMerger;
use crate::context::MergeContext;
use crate::error::MergeError;
use intact_model::{Graph, Organism};

pub(crate) struct OrganismMerger;

impl KindMerger for OrganismMerger {
    type Record = Organism;

    fn reconcile_scalars(
        target: &mut Organism,
        source: &Organism,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.required("tax_id", &mut target.tax_id, &source.tax_id);
        ctx.optional("common_name", &mut target.common_name, &source.common_name);
        ctx.optional("scientific_name", &mut target.scientific_name, &source.scientific_name);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &Organism,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<Organism>(ctx.target())?;
        ctx.elements("aliases", &mut target.aliases, &source.aliases);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Merger, Policy};
    use intact_model::{Alias, Graph, Organism};
    use pretty_assertions::assert_eq;

    #[test]
    fn names_are_filled_and_aliases_united() {
        let mut graph = Graph::new();
        let mut source = Organism::new(9606).unwrap();
        source.common_name = Some("human".into());
        source.scientific_name = Some("Homo sapiens".into());
        source.aliases = vec![Alias::new("man").unwrap()];
        let source = graph.insert(source);
        let mut target = Organism::new(9606).unwrap();
        target.common_name = Some("Human".into());
        target.aliases = vec![Alias::new("hs").unwrap()];
        let target = graph.insert(target);

        Merger::with_policy(Policy::EnrichOnly)
            .merge_pair(&mut graph, source, target)
            .unwrap();

        let merged = graph.record::<Organism>(target).unwrap();
        assert_eq!(merged.common_name.as_deref(), Some("Human"));
        assert_eq!(merged.scientific_name.as_deref(), Some("Homo sapiens"));
        assert_eq!(merged.aliases.len(), 2);
    }
}
