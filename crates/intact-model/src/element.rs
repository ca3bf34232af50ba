//! Value elements held in owned collections
//!
//! Elements carry no arena handle of their own. Two elements are the same fact
//! when their [`ValueIdentity::identity_key`]s are equal; fields outside the
//! key (accessions, versions, preference values) never take part.

use crate::error::{require_text, ModelError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Value-based identity of a collection element
pub trait ValueIdentity {
    /// Key made of the fields that define the fact
    type Key: Eq + Hash + Debug;

    /// Compute identity key
    fn identity_key(&self) -> Self::Key;

    /// True when both values describe the same fact
    #[inline]
    fn same_value(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

/// Cross-reference to an external database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xref {
    database: String,
    id: String,
    qualifier: Option<String>,
    version: Option<String>,
    secondary_id: Option<String>,
    ac: Option<String>,
}

impl Xref {
    /// Create cross-reference
    ///
    /// # Errors
    /// Returns error if `database` or `id` is blank
    pub fn new(database: impl Into<String>, id: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            database: require_text("xref database", database)?,
            id: require_text("xref id", id)?,
            qualifier: None,
            version: None,
            secondary_id: None,
            ac: None,
        })
    }

    /// Set qualifier (e.g. `identity`, `see-also`)
    #[inline]
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Set database version
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set secondary identifier
    #[inline]
    #[must_use]
    pub fn with_secondary_id(mut self, secondary_id: impl Into<String>) -> Self {
        self.secondary_id = Some(secondary_id.into());
        self
    }

    /// Set storage accession
    #[inline]
    #[must_use]
    pub fn with_ac(mut self, ac: impl Into<String>) -> Self {
        self.ac = Some(ac.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn secondary_id(&self) -> Option<&str> {
        self.secondary_id.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn ac(&self) -> Option<&str> {
        self.ac.as_deref()
    }
}

impl ValueIdentity for Xref {
    type Key = (String, String, Option<String>);

    fn identity_key(&self) -> Self::Key {
        (self.database.clone(), self.id.clone(), self.qualifier.clone())
    }
}

/// Free-text annotation under a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub ac: Option<String>,
    pub topic: String,
    pub value: Option<String>,
}

impl Annotation {
    /// Create annotation
    ///
    /// # Errors
    /// Returns error if `topic` is blank
    pub fn new(topic: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            topic: require_text("annotation topic", topic)?,
            value: None,
        })
    }

    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl ValueIdentity for Annotation {
    type Key = (String, Option<String>);

    fn identity_key(&self) -> Self::Key {
        (self.topic.clone(), self.value.clone())
    }
}

/// Alternative name (gene name, synonym, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub ac: Option<String>,
    pub alias_type: Option<String>,
    pub name: String,
}

impl Alias {
    /// Create alias
    ///
    /// # Errors
    /// Returns error if `name` is blank
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            alias_type: None,
            name: require_text("alias name", name)?,
        })
    }

    #[inline]
    #[must_use]
    pub fn with_type(mut self, alias_type: impl Into<String>) -> Self {
        self.alias_type = Some(alias_type.into());
        self
    }
}

impl ValueIdentity for Alias {
    type Key = (Option<String>, String);

    fn identity_key(&self) -> Self::Key {
        (self.alias_type.clone(), self.name.clone())
    }
}

/// Steps of the curation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleEventKind {
    Created,
    Submitted,
    Reserved,
    Assigned,
    CurationStarted,
    ReadyForChecking,
    Accepted,
    AcceptedOnHold,
    Rejected,
    PutOnHold,
    ReadyForRelease,
    Released,
    OwnerChanged,
    ReviewerChanged,
}

/// Dated entry of a record's curation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub ac: Option<String>,
    pub kind: LifecycleEventKind,
    pub who: Option<String>,
    pub when: DateTime<Utc>,
    pub note: Option<String>,
}

impl LifecycleEvent {
    /// Create event
    #[must_use]
    pub fn new(kind: LifecycleEventKind, when: DateTime<Utc>) -> Self {
        Self {
            ac: None,
            kind,
            who: None,
            when,
            note: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn by(mut self, who: impl Into<String>) -> Self {
        self.who = Some(who.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl ValueIdentity for LifecycleEvent {
    type Key = (LifecycleEventKind, Option<String>, DateTime<Utc>, Option<String>);

    fn identity_key(&self) -> Self::Key {
        (self.kind, self.who.clone(), self.when, self.note.clone())
    }
}

/// User preference, identified by its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub ac: Option<String>,
    pub key: String,
    pub value: Option<String>,
}

impl Preference {
    /// Create preference
    ///
    /// # Errors
    /// Returns error if `key` is blank
    pub fn new(key: impl Into<String>, value: Option<String>) -> Result<Self, ModelError> {
        Ok(Self {
            ac: None,
            key: require_text("preference key", key)?,
            value,
        })
    }
}

impl ValueIdentity for Preference {
    type Key = String;

    fn identity_key(&self) -> Self::Key {
        self.key.clone()
    }
}

/// Sequence or structure checksum of an interactor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    pub method: String,
    pub value: String,
}

impl Checksum {
    /// Create checksum
    ///
    /// # Errors
    /// Returns error if `method` or `value` is blank
    pub fn new(method: impl Into<String>, value: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            method: require_text("checksum method", method)?,
            value: require_text("checksum value", value)?,
        })
    }
}

impl ValueIdentity for Checksum {
    type Key = (String, String);

    fn identity_key(&self) -> Self::Key {
        (self.method.clone(), self.value.clone())
    }
}

/// Sequence range of a feature (1-based, inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub ac: Option<String>,
    pub start: u32,
    pub end: u32,
}

impl Range {
    /// Create range
    ///
    /// # Errors
    /// Returns error if `start` is zero or greater than `end`
    pub fn new(start: u32, end: u32) -> Result<Self, ModelError> {
        if start == 0 || start > end {
            return Err(ModelError::invariant(format!(
                "invalid range {start}..{end}"
            )));
        }
        Ok(Self {
            ac: None,
            start,
            end,
        })
    }
}

impl ValueIdentity for Range {
    type Key = (u32, u32);

    fn identity_key(&self) -> Self::Key {
        (self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn xref_rejects_blank_database() {
        assert!(matches!(
            Xref::new("", "P12345"),
            Err(ModelError::InvariantViolation(_))
        ));
        assert!(Xref::new("uniprotkb", " ").is_err());
    }

    #[test]
    fn xref_identity_ignores_version_and_ac() {
        let a = Xref::new("uniprotkb", "P12345")
            .unwrap()
            .with_qualifier("identity")
            .with_ac("EBI-1");
        let b = Xref::new("uniprotkb", "P12345")
            .unwrap()
            .with_qualifier("identity")
            .with_version("2");
        assert!(a.same_value(&b));
        assert!(b.same_value(&a));
    }

    #[test]
    fn xref_identity_includes_qualifier() {
        let a = Xref::new("go", "GO:0005634").unwrap().with_qualifier("component");
        let b = Xref::new("go", "GO:0005634").unwrap();
        assert!(!a.same_value(&b));
    }

    #[test]
    fn lifecycle_identity_uses_every_value_field() {
        let when = Utc.with_ymd_and_hms(2023, 5, 2, 10, 0, 0).unwrap();
        let a = LifecycleEvent::new(LifecycleEventKind::Accepted, when).by("reviewer1");
        let b = a.clone().with_note("fine");
        assert!(a.same_value(&a.clone()));
        assert!(!a.same_value(&b));
    }

    #[test]
    fn preference_identity_is_key_only() {
        let a = Preference::new("editor.font", Some("mono".into())).unwrap();
        let b = Preference::new("editor.font", Some("serif".into())).unwrap();
        assert!(a.same_value(&b));
        assert!(Preference::new("", None).is_err());
    }

    #[test]
    fn range_validation() {
        assert!(Range::new(5, 10).is_ok());
        assert!(Range::new(0, 10).is_err());
        assert!(Range::new(11, 10).is_err());
    }

    proptest::proptest! {
        #[test]
        fn xref_same_value_is_symmetric(
            db in "[a-z]{1,8}",
            id_a in "[A-Z0-9]{1,6}",
            id_b in "[A-Z0-9]{1,6}",
            qualified in proptest::bool::ANY,
        ) {
            let mut a = Xref::new(db.clone(), id_a).unwrap();
            let mut b = Xref::new(db, id_b).unwrap();
            if qualified {
                a = a.with_qualifier("identity");
                b = b.with_qualifier("identity");
            }
            proptest::prop_assert_eq!(a.same_value(&b), b.same_value(&a));
            proptest::prop_assert!(a.same_value(&a));
        }
    }

    #[test]
    fn checksum_and_alias_validation() {
        assert!(Checksum::new("crc64", "").is_err());
        assert!(Alias::new("").is_err());
        assert!(Annotation::new("").is_err());
        assert!(Alias::new("BRCA2").unwrap().with_type("gene name").same_value(
            &Alias::new("BRCA2").unwrap().with_type("gene name")
        ));
    }
}
