//! Collection reconciliation
//!
//! Two-list diff/merge used for every owned collection. Elements are never
//! merged with each other: a match keeps the target's instance, a non-match
//! inserts the source's instance or (under [`Policy::Override`]) evicts the
//! target's.

use crate::identity::IdentityComparator;
use crate::policy::Policy;

/// Elements inserted into and evicted from a target collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDiff<T> {
    /// Source elements inserted, in decision order
    pub added: Vec<T>,
    /// Target elements evicted, in decision order
    pub removed: Vec<T>,
}

impl<T> CollectionDiff<T> {
    /// True when the target collection was left untouched
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl<T> Default for CollectionDiff<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// Reconcile `target` with `source` under `policy`
///
/// # Algorithm
/// 1. Override only: evict every target element with no match in `source`,
///    calling `on_remove` for each.
/// 2. Enrich-Only and Override: each source element with no match in
///    `target` is inserted right after the target position of the nearest
///    preceding source element (matched or inserted), or at the front when
///    there is none, and `on_add` is called. Source order is preserved
///    among the elements it shares with the result.
///
/// Keep-Target leaves `target` untouched.
///
/// # Performance
/// O(n·m) comparisons; curated sub-collections hold tens of elements.
pub fn reconcile<T, C>(
    target: &mut Vec<T>,
    source: &[T],
    policy: Policy,
    comparator: &C,
    mut on_add: impl FnMut(&T),
    mut on_remove: impl FnMut(&T),
) -> CollectionDiff<T>
where
    T: Clone,
    C: IdentityComparator<T> + ?Sized,
{
    let mut diff = CollectionDiff::default();
    if !policy.mutates_target() {
        return diff;
    }

    if policy.removes() {
        let mut kept = Vec::with_capacity(target.len());
        for element in target.drain(..) {
            if source.iter().any(|s| comparator.same_value(&element, s)) {
                kept.push(element);
            } else {
                on_remove(&element);
                diff.removed.push(element);
            }
        }
        *target = kept;
    }

    // insertion point after the last source element placed in `target`
    let mut anchor = 0;
    for element in source {
        if let Some(position) = target.iter().position(|t| comparator.same_value(t, element)) {
            anchor = position + 1;
            continue;
        }
        target.insert(anchor, element.clone());
        anchor += 1;
        on_add(element);
        diff.added.push(element.clone());
    }

    diff
}
