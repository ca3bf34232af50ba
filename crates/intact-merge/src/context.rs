//! Per-call merge state shared by the kind mergers

use crate::collection::{self, CollectionDiff};
use crate::error::MergeError;
use crate::identity::{ByEntityKey, ByValue};
use crate::listener::{ElementValue, FieldChange, FieldValue, MergeListener};
use crate::policy::Policy;
use intact_model::{EntityId, EntityVariant, Graph, ValueIdentity};

/// Whether a handle collection owns its members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ownership {
    /// Members point back at the owner and are re-parented on adoption
    Owned,
    /// Members are shared records (roles, parent terms)
    Shared,
}

/// Policy, listener and target handle of one merge call
pub(crate) struct MergeContext<'a> {
    policy: Policy,
    listener: &'a dyn MergeListener,
    target: EntityId,
}

impl<'a> MergeContext<'a> {
    pub(crate) fn new(policy: Policy, listener: &'a dyn MergeListener, target: EntityId) -> Self {
        Self {
            policy,
            listener,
            target,
        }
    }

    #[inline]
    pub(crate) fn policy(&self) -> Policy {
        self.policy
    }

    #[inline]
    pub(crate) fn target(&self) -> EntityId {
        self.target
    }

    /// Report a field change on the target
    pub(crate) fn field_changed(&self, change: &FieldChange) {
        self.listener
            .on_field_changed(self.target, change.field, &change.old, &change.new);
    }

    /// Reconcile an optional scalar
    ///
    /// Enrich-Only fills an unset target; Override replaces on any
    /// difference, clearing the target when the source is unset.
    pub(crate) fn optional<T>(
        &self,
        field: &'static str,
        target: &mut Option<T>,
        source: &Option<T>,
    ) where
        T: Clone + PartialEq,
        FieldValue: From<T>,
    {
        let replace = match self.policy {
            Policy::EnrichOnly => target.is_none() && source.is_some(),
            Policy::Override => target != source,
            Policy::KeepTarget => false,
        };
        if replace {
            let old = std::mem::replace(target, source.clone());
            self.field_changed(&FieldChange::new(field, old, source.clone()));
        }
    }

    /// Reconcile a mandatory scalar; a set value is only replaced by Override
    pub(crate) fn required<T>(&self, field: &'static str, target: &mut T, source: &T)
    where
        T: Clone + PartialEq,
        FieldValue: From<T>,
    {
        if self.policy.overwrites() && target != source {
            let old = std::mem::replace(target, source.clone());
            self.field_changed(&FieldChange::new(field, old, source.clone()));
        }
    }

    /// Reconcile a collection of value elements
    pub(crate) fn elements<T>(
        &self,
        collection: &'static str,
        target: &mut Vec<T>,
        source: &[T],
    ) -> CollectionDiff<T>
    where
        T: ValueIdentity + Clone,
        ElementValue: From<T>,
    {
        collection::reconcile(
            target,
            source,
            self.policy,
            &ByValue,
            |element| {
                self.listener
                    .on_added(self.target, collection, &ElementValue::from(element.clone()));
            },
            |element| {
                self.listener
                    .on_removed(self.target, collection, &ElementValue::from(element.clone()));
            },
        )
    }

    /// Reconcile a collection of record handles held by the target `R`
    ///
    /// Handles are matched by the identity key of the records behind them.
    /// Owned members inserted into the target are re-parented to it; owned
    /// members evicted from it lose their parent.
    ///
    /// # Errors
    /// Returns error if the target or an adopted member is missing from the
    /// graph
    pub(crate) fn members<R: EntityVariant>(
        &self,
        graph: &mut Graph,
        collection: &'static str,
        access: fn(&mut R) -> &mut Vec<EntityId>,
        source: &[EntityId],
        ownership: Ownership,
    ) -> Result<CollectionDiff<EntityId>, MergeError> {
        let mut members = std::mem::take(access(graph.record_mut::<R>(self.target)?));
        let diff = collection::reconcile(
            &mut members,
            source,
            self.policy,
            &ByEntityKey::new(graph),
            |id| self.listener.on_added(self.target, collection, &ElementValue::Entity(*id)),
            |id| self.listener.on_removed(self.target, collection, &ElementValue::Entity(*id)),
        );
        *access(graph.record_mut::<R>(self.target)?) = members;

        if ownership == Ownership::Owned {
            for &child in &diff.added {
                self.reparent(graph, child, Some(self.target))?;
            }
            for &child in &diff.removed {
                if graph.entity(child)?.parent() == Some(self.target) {
                    self.reparent(graph, child, None)?;
                }
            }
        }
        Ok(diff)
    }

    fn reparent(
        &self,
        graph: &mut Graph,
        child: EntityId,
        parent: Option<EntityId>,
    ) -> Result<(), MergeError> {
        let entity = graph.entity_mut(child)?;
        let previous = entity.parent();
        let Some(field) = entity.kind().parent_field() else {
            return Ok(());
        };
        if previous != parent {
            entity.set_parent(parent);
            self.listener.on_field_changed(
                child,
                field,
                &FieldValue::from(previous),
                &FieldValue::from(parent),
            );
        }
        Ok(())
    }
}
