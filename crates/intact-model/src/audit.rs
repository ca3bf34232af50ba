//! Audit metadata carried by every persisted record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation and last-update metadata
///
/// # Invariants
/// - Once `creator`/`created` are set on a persisted record they are never
///   cleared again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    /// Login of the user who created the record
    pub creator: Option<String>,
    /// Creation timestamp
    pub created: Option<DateTime<Utc>>,
    /// Login of the user who last updated the record
    pub updator: Option<String>,
    /// Last update timestamp
    pub updated: Option<DateTime<Utc>>,
}

impl Audit {
    /// Audit stamped as created (and updated) by `who` at `when`
    #[must_use]
    pub fn created_by(who: impl Into<String>, when: DateTime<Utc>) -> Self {
        let who = who.into();
        Self {
            creator: Some(who.clone()),
            created: Some(when),
            updator: Some(who),
            updated: Some(when),
        }
    }

    /// Record an update by `who` at `when`
    #[must_use]
    pub fn updated_by(mut self, who: impl Into<String>, when: DateTime<Utc>) -> Self {
        self.updator = Some(who.into());
        self.updated = Some(when);
        self
    }

    /// True when none of the four fields is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creator.is_none()
            && self.created.is_none()
            && self.updator.is_none()
            && self.updated.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn created_by_sets_all_fields() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let audit = Audit::created_by("curator1", when);
        assert_eq!(audit.creator.as_deref(), Some("curator1"));
        assert_eq!(audit.updated, Some(when));
        assert!(!audit.is_empty());
    }

    #[test]
    fn updated_by_keeps_creation() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let audit = Audit::created_by("curator1", created).updated_by("reviewer1", updated);
        assert_eq!(audit.creator.as_deref(), Some("curator1"));
        assert_eq!(audit.updator.as_deref(), Some("reviewer1"));
        assert_eq!(audit.updated, Some(updated));
    }

    #[test]
    fn default_is_empty() {
        assert!(Audit::default().is_empty());
    }
}
