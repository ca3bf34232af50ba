use super::KindMerger;
use crate::context::MergeContext;
use crate::error::MergeError;
use intact_model::{Graph, Source};

pub(crate) struct SourceMerger;

impl KindMerger for SourceMerger {
    type Record = Source;

    fn reconcile_scalars(
        target: &mut Source,
        source: &Source,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.required("short_label", &mut target.short_label, &source.short_label);
        ctx.optional("full_name", &mut target.full_name, &source.full_name);
        ctx.optional("url", &mut target.url, &source.url);
        ctx.optional("postal_address", &mut target.postal_address, &source.postal_address);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &Source,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<Source>(ctx.target())?;
        ctx.elements("xrefs", &mut target.xrefs, &source.xrefs);
        ctx.elements("annotations", &mut target.annotations, &source.annotations);
        ctx.elements("aliases", &mut target.aliases, &source.aliases);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Merger, Policy};
    use intact_model::{Graph, Source};
    use intact_test_utils::create_xref;
    use pretty_assertions::assert_eq;

    #[test]
    fn override_takes_url_and_xrefs_from_source() {
        let mut graph = Graph::new();
        let mut source = Source::new("intact").unwrap();
        source.url = Some("https://www.ebi.ac.uk/intact".into());
        source.xrefs = vec![create_xref("psi-mi", "MI:0469")];
        let source = graph.insert(source);
        let mut target = Source::new("intact").unwrap();
        target.url = Some("http://www.ebi.ac.uk/intact".into());
        target.postal_address = Some("Hinxton".into());
        let target = graph.insert(target);

        Merger::with_policy(Policy::Override)
            .merge_pair(&mut graph, source, target)
            .unwrap();

        let merged = graph.record::<Source>(target).unwrap();
        assert_eq!(merged.url.as_deref(), Some("https://www.ebi.ac.uk/intact"));
        assert_eq!(merged.postal_address, None);
        assert_eq!(merged.xrefs, vec![create_xref("psi-mi", "MI:0469")]);
    }
}
