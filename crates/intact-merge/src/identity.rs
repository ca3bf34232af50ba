//! Identity comparators
//!
//! Decide whether two collection elements describe the same fact. Always by
//! value: handles are resolved through the graph and compared by key.

use intact_model::{EntityId, Graph, ValueIdentity};

/// Value-based "same fact" decision for elements of type `T`
///
/// # Contract
/// - Pure, reflexive and symmetric
/// - Must agree with itself for the whole reconciliation of one collection
pub trait IdentityComparator<T: ?Sized> {
    /// True when `a` and `b` describe the same fact
    fn same_value(&self, a: &T, b: &T) -> bool;
}

/// Compares elements by their [`ValueIdentity`] key
#[derive(Debug, Clone, Copy, Default)]
pub struct ByValue;

impl<T: ValueIdentity> IdentityComparator<T> for ByValue {
    #[inline]
    fn same_value(&self, a: &T, b: &T) -> bool {
        a.same_value(b)
    }
}

/// Compares record handles by the identity key of the records behind them
#[derive(Debug, Clone, Copy)]
pub struct ByEntityKey<'g> {
    graph: &'g Graph,
}

impl<'g> ByEntityKey<'g> {
    /// Create comparator over `graph`
    #[inline]
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }
}

impl IdentityComparator<EntityId> for ByEntityKey<'_> {
    #[inline]
    fn same_value(&self, a: &EntityId, b: &EntityId) -> bool {
        self.graph.same_entity(*a, *b)
    }
}
