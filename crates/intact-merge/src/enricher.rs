//! Scalar enricher contract
//!
//! An enricher fills the non-collection attributes of a target from a source
//! (typically by consulting an external reference service). When one is
//! registered for a kind it replaces the built-in scalar step; the engine
//! still runs back-reference, audit and collection reconciliation around it.

use intact_model::{Entity, EntityKind};

/// Failure reported by a [`ScalarEnricher`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrichmentError {
    /// Reference service could not be reached
    #[error("enrichment service unavailable: {0}")]
    Unavailable(String),

    /// Reference service has no entry for the record
    #[error("no reference entry for {kind} '{key}'")]
    #[allow(missing_docs)]
    NotFound { kind: EntityKind, key: String },

    /// Reference service answered, but the record could not be enriched
    #[error("cannot enrich {kind}: {reason}")]
    #[allow(missing_docs)]
    Rejected { kind: EntityKind, reason: String },
}

/// Per-kind scalar filling callback
///
/// Must be pure with respect to the graph: only `target` may be written.
pub trait ScalarEnricher: Send + Sync {
    /// Fill scalar fields of `target` from `source`
    ///
    /// # Errors
    /// Any error aborts the merge after audit reconciliation; collections
    /// are left unreconciled.
    fn enrich_scalar_fields(&self, target: &mut Entity, source: &Entity)
        -> Result<(), EnrichmentError>;
}

impl<F> ScalarEnricher for F
where
    F: Fn(&mut Entity, &Entity) -> Result<(), EnrichmentError> + Send + Sync,
{
    fn enrich_scalar_fields(
        &self,
        target: &mut Entity,
        source: &Entity,
    ) -> Result<(), EnrichmentError> {
        self(target, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intact_model::{CvTerm, EntityVariant};

    fn copy_definition(target: &mut Entity, source: &Entity) -> Result<(), EnrichmentError> {
        let definition = CvTerm::from_entity(source).and_then(|t| t.definition.clone());
        match CvTerm::from_entity_mut(target) {
            Some(term) => {
                term.definition = definition;
                Ok(())
            }
            None => Err(EnrichmentError::Rejected {
                kind: target.kind(),
                reason: "not a term".into(),
            }),
        }
    }

    #[test]
    fn functions_are_enrichers() {
        let enricher: &dyn ScalarEnricher = &copy_definition;
        let mut source = CvTerm::new("two hybrid").unwrap();
        source.definition = Some("yeast two hybrid".into());
        let mut target: Entity = CvTerm::new("two hybrid").unwrap().into();

        enricher
            .enrich_scalar_fields(&mut target, &source.into())
            .unwrap();

        let term = CvTerm::from_entity(&target).unwrap();
        assert_eq!(term.definition.as_deref(), Some("yeast two hybrid"));
    }

    #[test]
    fn error_messages_name_the_kind() {
        let err = EnrichmentError::NotFound {
            kind: EntityKind::Interactor,
            key: "brca2_human".into(),
        };
        assert_eq!(err.to_string(), "no reference entry for interactor 'brca2_human'");
    }
}
