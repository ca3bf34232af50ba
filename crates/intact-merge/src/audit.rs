//! Audit reconciliation
//!
//! Creation metadata is never lost: Override copies the source's audit block
//! but leaves `creator`/`created` alone when the source does not carry them.

use crate::listener::FieldChange;
use crate::policy::Policy;
use intact_model::Audit;

/// Reconcile `target` audit metadata with `source` under `policy`
///
/// Returns one [`FieldChange`] per field whose value moved, in the order
/// creator, created, updator, updated.
pub fn reconcile_audit(target: &mut Audit, source: &Audit, policy: Policy) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    match policy {
        Policy::KeepTarget => {}
        Policy::EnrichOnly => {
            fill(&mut changes, "creator", &mut target.creator, &source.creator);
            fill(&mut changes, "created", &mut target.created, &source.created);
            fill(&mut changes, "updator", &mut target.updator, &source.updator);
            fill(&mut changes, "updated", &mut target.updated, &source.updated);
        }
        Policy::Override => {
            if source.creator.is_some() {
                replace(&mut changes, "creator", &mut target.creator, &source.creator);
            }
            if source.created.is_some() {
                replace(&mut changes, "created", &mut target.created, &source.created);
            }
            replace(&mut changes, "updator", &mut target.updator, &source.updator);
            replace(&mut changes, "updated", &mut target.updated, &source.updated);
        }
    }
    changes
}

fn fill<T>(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    target: &mut Option<T>,
    source: &Option<T>,
) where
    T: Clone,
    crate::listener::FieldValue: From<T>,
{
    if target.is_none() && source.is_some() {
        *target = source.clone();
        changes.push(FieldChange::new(field, None::<T>, source.clone()));
    }
}

fn replace<T>(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    target: &mut Option<T>,
    source: &Option<T>,
) where
    T: Clone + PartialEq,
    crate::listener::FieldValue: From<T>,
{
    if target != source {
        let old = std::mem::replace(target, source.clone());
        changes.push(FieldChange::new(field, old, source.clone()));
    }
}
