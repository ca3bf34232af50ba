//! Change notification
//!
//! A [`MergeListener`] observes every mutation a merge performs on its target:
//! elements added to or removed from a collection and scalar fields replaced.
//! Callbacks run synchronously, in decision order, before `merge` returns.

use chrono::{DateTime, Utc};
use intact_model::{
    Alias, Annotation, Checksum, CurationStatus, EntityId, LifecycleEvent, Preference, Range, Xref,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Element of a reconciled collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ElementValue {
    Xref(Xref),
    Annotation(Annotation),
    Alias(Alias),
    LifecycleEvent(LifecycleEvent),
    Preference(Preference),
    Checksum(Checksum),
    Range(Range),
    /// Handle of an associated record
    Entity(EntityId),
}

macro_rules! element_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for ElementValue {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

element_from!(Xref, Annotation, Alias, LifecycleEvent, Preference, Checksum, Range);

impl From<EntityId> for ElementValue {
    fn from(id: EntityId) -> Self {
        Self::Entity(id)
    }
}

/// Old or new value of a scalar field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum FieldValue {
    /// Field was or became unset
    Absent,
    /// Label, name, identifier, ...
    Text(String),
    /// Taxonomy id, stoichiometry
    Integer(i64),
    /// Negative, disabled
    Flag(bool),
    /// Audit stamps, last login
    Timestamp(DateTime<Utc>),
    /// Curation status
    Status(CurationStatus),
    /// Handle of an associated record
    Entity(EntityId),
    /// Keyed element whose value changed in place
    Element(Box<ElementValue>),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<CurationStatus> for FieldValue {
    fn from(value: CurationStatus) -> Self {
        Self::Status(value)
    }
}

impl From<EntityId> for FieldValue {
    fn from(value: EntityId) -> Self {
        Self::Entity(value)
    }
}

impl From<ElementValue> for FieldValue {
    fn from(value: ElementValue) -> Self {
        Self::Element(Box::new(value))
    }
}

impl<T> From<Option<T>> for FieldValue
where
    FieldValue: From<T>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::from)
    }
}

/// Scalar field replacement on one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Field name as reported to listeners
    pub field: &'static str,
    /// Value before the merge
    pub old: FieldValue,
    /// Value after the merge
    pub new: FieldValue,
}

impl FieldChange {
    /// Create field change
    #[inline]
    #[must_use]
    pub fn new(
        field: &'static str,
        old: impl Into<FieldValue>,
        new: impl Into<FieldValue>,
    ) -> Self {
        Self {
            field,
            old: old.into(),
            new: new.into(),
        }
    }
}

/// Observer of merge mutations
///
/// Every callback defaults to a no-op. Implementations must not mutate the
/// graph being merged; they only get copies of the values involved.
pub trait MergeListener: Send + Sync {
    /// `element` was inserted into `collection` of `parent`
    fn on_added(&self, _parent: EntityId, _collection: &'static str, _element: &ElementValue) {}

    /// `element` was evicted from `collection` of `parent`
    fn on_removed(&self, _parent: EntityId, _collection: &'static str, _element: &ElementValue) {}

    /// `field` of `parent` went from `old` to `new`
    fn on_field_changed(
        &self,
        _parent: EntityId,
        _field: &'static str,
        _old: &FieldValue,
        _new: &FieldValue,
    ) {
    }
}

/// Listener that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl MergeListener for NoopListener {}

/// Listener that logs every notification at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl MergeListener for TracingListener {
    fn on_added(&self, parent: EntityId, collection: &'static str, element: &ElementValue) {
        tracing::debug!(%parent, collection, ?element, "element added");
    }

    fn on_removed(&self, parent: EntityId, collection: &'static str, element: &ElementValue) {
        tracing::debug!(%parent, collection, ?element, "element removed");
    }

    fn on_field_changed(
        &self,
        parent: EntityId,
        field: &'static str,
        old: &FieldValue,
        new: &FieldValue,
    ) {
        tracing::debug!(%parent, field, ?old, ?new, "field changed");
    }
}

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ChangeEvent {
    Added {
        parent: EntityId,
        collection: String,
        element: ElementValue,
    },
    Removed {
        parent: EntityId,
        collection: String,
        element: ElementValue,
    },
    FieldChanged {
        parent: EntityId,
        field: String,
        old: FieldValue,
        new: FieldValue,
    },
}

/// Listener that keeps every notification in memory, in arrival order
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingListener {
    /// Create empty recorder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    #[must_use]
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<ChangeEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True when nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Elements added to `collection`, any parent
    #[must_use]
    pub fn added(&self, collection: &str) -> Vec<ElementValue> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ChangeEvent::Added {
                    collection: c,
                    element,
                    ..
                } if c == collection => Some(element.clone()),
                _ => None,
            })
            .collect()
    }

    /// Elements removed from `collection`, any parent
    #[must_use]
    pub fn removed(&self, collection: &str) -> Vec<ElementValue> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ChangeEvent::Removed {
                    collection: c,
                    element,
                    ..
                } if c == collection => Some(element.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(old, new)` pairs recorded for `field`, any parent
    #[must_use]
    pub fn field_changes(&self, field: &str) -> Vec<(FieldValue, FieldValue)> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ChangeEvent::FieldChanged {
                    field: f, old, new, ..
                } if f == field => Some((old.clone(), new.clone())),
                _ => None,
            })
            .collect()
    }
}

impl MergeListener for RecordingListener {
    fn on_added(&self, parent: EntityId, collection: &'static str, element: &ElementValue) {
        self.events.lock().push(ChangeEvent::Added {
            parent,
            collection: collection.to_owned(),
            element: element.clone(),
        });
    }

    fn on_removed(&self, parent: EntityId, collection: &'static str, element: &ElementValue) {
        self.events.lock().push(ChangeEvent::Removed {
            parent,
            collection: collection.to_owned(),
            element: element.clone(),
        });
    }

    fn on_field_changed(
        &self,
        parent: EntityId,
        field: &'static str,
        old: &FieldValue,
        new: &FieldValue,
    ) {
        self.events.lock().push(ChangeEvent::FieldChanged {
            parent,
            field: field.to_owned(),
            old: old.clone(),
            new: new.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn optional_values_map_to_absent() {
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Absent);
        assert_eq!(
            FieldValue::from(Some("exp-7".to_owned())),
            FieldValue::Text("exp-7".into())
        );
        assert_eq!(FieldValue::from(Some(9606_i32)), FieldValue::Integer(9606));
    }

    #[test]
    fn recorder_keeps_arrival_order() {
        let recorder = RecordingListener::new();
        let parent = EntityId::new();
        let role = EntityId::new();

        recorder.on_removed(parent, "roles", &ElementValue::Entity(role));
        recorder.on_added(parent, "roles", &ElementValue::Entity(role));
        recorder.on_field_changed(parent, "email", &FieldValue::Absent, &"a@b.org".into());

        let events = recorder.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], ChangeEvent::Removed { .. }));
        assert!(matches!(events[2], ChangeEvent::FieldChanged { .. }));
        assert_eq!(recorder.added("roles"), vec![ElementValue::Entity(role)]);
        assert_eq!(
            recorder.field_changes("email"),
            vec![(FieldValue::Absent, FieldValue::Text("a@b.org".into()))]
        );

        assert_eq!(recorder.take().len(), 3);
        assert!(recorder.is_empty());
    }

    #[test]
    fn change_events_serialize_with_tag() {
        let event = ChangeEvent::FieldChanged {
            parent: EntityId::new(),
            field: "disabled".into(),
            old: FieldValue::Flag(false),
            new: FieldValue::Flag(true),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "field-changed");
        assert_eq!(json["new"]["type"], "flag");
    }

    #[test]
    fn default_callbacks_are_no_ops() {
        let listener = NoopListener;
        listener.on_added(EntityId::new(), "xrefs", &ElementValue::Entity(EntityId::new()));
        let element = ElementValue::Entity(EntityId::new());
        TracingListener.on_removed(EntityId::new(), "xrefs", &element);
    }
}
