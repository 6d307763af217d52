//! Completion records and preferences on top of a [`KeyValueStore`].
//!
//! # Key scheme
//!
//! - `<namespace>:done:w<week>:<day title>` holds the RFC 3339 UTC time the
//!   day was marked done (e.g. `pc:done:w2:Day 1 - Push`).
//! - `<namespace>:lastWeek` holds the most recently selected week number.
//!
//! Records are written once per explicit action and read in one batch when
//! a view is entered. Writes are last-write-wins.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::resolve::ResolvedWeek;
use crate::store::KeyValueStore;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "pc";

/// Errors from reading or writing progress records.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The underlying store failed.
    #[error("store unavailable: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// A stored timestamp could not be parsed.
    #[error("invalid completion timestamp under {key}: {value}")]
    Timestamp {
        key: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

fn store_error<E: std::error::Error + Send + Sync + 'static>(err: E) -> ProgressError {
    ProgressError::Store(Box::new(err))
}

/// Identifies one day of one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionKey<'a> {
    pub week: u32,
    pub day_title: &'a str,
}

impl<'a> CompletionKey<'a> {
    pub const fn new(week: u32, day_title: &'a str) -> Self {
        Self { week, day_title }
    }

    /// The storage key under `namespace`.
    pub fn storage_key(&self, namespace: &str) -> String {
        format!("{namespace}:done:w{}:{}", self.week, self.day_title)
    }
}

/// The prefix shared by every completion key in `namespace`.
pub fn completion_prefix(namespace: &str) -> String {
    format!("{namespace}:done:")
}

/// Formats a completion time the way it is persisted.
pub fn format_stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Completion records and the week preference for one namespace.
#[derive(Debug)]
pub struct ProgressStore<S> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// When the day was marked done, if it has been.
    pub fn completed_at(
        &self,
        key: CompletionKey<'_>,
    ) -> Result<Option<DateTime<Utc>>, ProgressError> {
        let storage_key = key.storage_key(&self.namespace);
        let Some(value) = self.store.get(&storage_key).map_err(store_error)? else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(&value)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|source| ProgressError::Timestamp {
                key: storage_key,
                value,
                source,
            })
    }

    /// Records the day as done at `at`.
    pub fn mark_done(
        &mut self,
        key: CompletionKey<'_>,
        at: DateTime<Utc>,
    ) -> Result<(), ProgressError> {
        let storage_key = key.storage_key(&self.namespace);
        self.store
            .set(&storage_key, &format_stamp(at))
            .map_err(store_error)?;
        tracing::info!(week = key.week, day = key.day_title, "marked day done");
        Ok(())
    }

    /// Removes the day's completion record. Returns whether one existed.
    pub fn unmark_done(&mut self, key: CompletionKey<'_>) -> Result<bool, ProgressError> {
        let removed = self
            .store
            .delete(&key.storage_key(&self.namespace))
            .map_err(store_error)?;
        tracing::info!(week = key.week, day = key.day_title, removed, "unmarked day");
        Ok(removed)
    }

    /// Loads the completion state of every day of a week in one pass.
    ///
    /// The result is parallel to `week.days`.
    pub fn load_week(
        &self,
        week: &ResolvedWeek,
    ) -> Result<Vec<Option<DateTime<Utc>>>, ProgressError> {
        week.days
            .iter()
            .map(|day| self.completed_at(CompletionKey::new(week.week, day.title.as_str())))
            .collect()
    }

    fn last_week_key(&self) -> String {
        format!("{}:lastWeek", self.namespace)
    }

    /// The most recently selected week. Unparseable values read as unset.
    pub fn last_week(&self) -> Result<Option<u32>, ProgressError> {
        let value = self.store.get(&self.last_week_key()).map_err(store_error)?;
        Ok(value.and_then(|v| v.parse().ok()))
    }

    pub fn set_last_week(&mut self, week: u32) -> Result<(), ProgressError> {
        let key = self.last_week_key();
        self.store
            .set(&key, &week.to_string())
            .map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn storage_key_format() {
        let key = CompletionKey::new(3, "Day 2 - Pull");
        assert_eq!(key.storage_key("pc"), "pc:done:w3:Day 2 - Pull");
        assert!(key.storage_key("pc").starts_with(&completion_prefix("pc")));
    }

    #[test]
    fn stamps_use_millisecond_utc_form() {
        assert_eq!(
            format_stamp(at("2025-03-01T08:15:00Z")),
            "2025-03-01T08:15:00.000Z"
        );
    }

    #[test]
    fn mark_then_read_then_unmark() {
        let mut progress = ProgressStore::new(MemoryStore::new(), DEFAULT_NAMESPACE);
        let key = CompletionKey::new(1, "Day 1 - Push");

        assert!(progress.completed_at(key).unwrap().is_none());

        let when = at("2025-03-01T08:15:00Z");
        progress.mark_done(key, when).unwrap();
        assert_eq!(progress.completed_at(key).unwrap(), Some(when));
        assert_eq!(
            progress
                .store()
                .get("pc:done:w1:Day 1 - Push")
                .unwrap()
                .as_deref(),
            Some("2025-03-01T08:15:00.000Z")
        );

        assert!(progress.unmark_done(key).unwrap());
        assert!(progress.completed_at(key).unwrap().is_none());
        assert!(!progress.unmark_done(key).unwrap());
    }

    #[test]
    fn namespaces_are_isolated() {
        let mut store = MemoryStore::new();
        store.set("other:done:w1:A", "2025-01-01T00:00:00Z").unwrap();
        let progress = ProgressStore::new(store, "pc");
        assert!(
            progress
                .completed_at(CompletionKey::new(1, "A"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn corrupt_stamp_is_reported() {
        let mut store = MemoryStore::new();
        store.set("pc:done:w1:A", "yesterday").unwrap();
        let progress = ProgressStore::new(store, "pc");
        let err = progress
            .completed_at(CompletionKey::new(1, "A"))
            .unwrap_err();
        assert!(matches!(err, ProgressError::Timestamp { .. }));
    }

    #[test]
    fn last_week_preference() {
        let mut progress = ProgressStore::new(MemoryStore::new(), "pc");
        assert_eq!(progress.last_week().unwrap(), None);
        progress.set_last_week(3).unwrap();
        assert_eq!(progress.last_week().unwrap(), Some(3));
        assert_eq!(
            progress.store().get("pc:lastWeek").unwrap().as_deref(),
            Some("3")
        );
    }
}
