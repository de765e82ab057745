//! Daily free-use quota, counted per calendar day (UTC) in client storage.
//!
//! Nothing here fails: unreadable or malformed storage reads as zero usage
//! and failed writes are dropped. Two processes incrementing at once race
//! on the same key and the last write wins.

pub mod storage;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use self::storage::KeyValueStore;

/// Versioned storage key holding the serialized `UsageRecord`.
pub const STORAGE_KEY: &str = "quota.v1";

pub const DEFAULT_DAILY_LIMIT: u32 = 3;

/// Usage for one day. `used` must be a non-negative integer; anything else
/// makes the stored record malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub day: String,
    pub used: u32,
}

impl UsageRecord {
    fn fresh(day: String) -> Self {
        Self { day, used: 0 }
    }
}

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

pub struct QuotaTracker {
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl QuotaTracker {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn can_use_today(&self, limit: u32) -> bool {
        self.today_record().used < limit
    }

    pub fn record_use(&self) {
        let mut record = self.today_record();
        record.used = record.used.saturating_add(1);
        self.write(&record);
    }

    pub fn remaining(&self, limit: u32) -> u32 {
        limit.saturating_sub(self.today_record().used)
    }

    /// Today's record. Absent, malformed or stale data reads as a fresh record.
    fn today_record(&self) -> UsageRecord {
        let today = self.clock.today().format("%Y-%m-%d").to_string();
        match self.read() {
            Some(record) if record.day == today => record,
            _ => UsageRecord::fresh(today),
        }
    }

    fn read(&self) -> Option<UsageRecord> {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!("quota storage unreadable, treating as empty: {e}");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| debug!("malformed quota record ignored: {e}"))
            .ok()
    }

    fn write(&self, record: &UsageRecord) {
        let result = serde_json::to_string(record)
            .map_err(storage::StorageError::from)
            .and_then(|raw| self.store.set(STORAGE_KEY, &raw));
        if let Err(e) = result {
            debug!("quota write dropped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::storage::{MemoryStore, UnavailableStore};
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock whose date the test can move forward.
    #[derive(Clone)]
    struct ManualClock(Rc<Cell<NaiveDate>>);

    impl ManualClock {
        fn at(y: i32, m: u32, d: u32) -> Self {
            Self(Rc::new(Cell::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())))
        }

        fn advance_days(&self, days: u64) {
            self.0
                .set(self.0.get() + chrono::Days::new(days));
        }
    }

    impl Clock for ManualClock {
        fn today(&self) -> NaiveDate {
            self.0.get()
        }
    }

    /// Memory store shared between the tracker and the test body.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<MemoryStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, storage::StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), storage::StorageError> {
            self.0.set(key, value)
        }
    }

    fn tracker(store: &SharedStore, clock: &ManualClock) -> QuotaTracker {
        QuotaTracker::with_clock(Box::new(store.clone()), Box::new(clock.clone()))
    }

    #[test]
    fn test_limit_gates_usage() {
        let store = SharedStore::default();
        let clock = ManualClock::at(2024, 3, 1);
        let quota = tracker(&store, &clock);

        for limit in 1..=5u32 {
            for used in 0..limit + 2 {
                store
                    .set(STORAGE_KEY, &format!(r#"{{"day":"2024-03-01","used":{used}}}"#))
                    .unwrap();
                assert_eq!(quota.can_use_today(limit), used < limit, "L={limit} u={used}");
            }
        }
    }

    #[test]
    fn test_record_use_counts_sequential_calls() {
        let store = SharedStore::default();
        let clock = ManualClock::at(2024, 3, 1);
        let quota = tracker(&store, &clock);

        assert_eq!(quota.remaining(DEFAULT_DAILY_LIMIT), 3);
        for n in 1..=5u32 {
            quota.record_use();
            assert_eq!(quota.remaining(3), 3u32.saturating_sub(n));
        }
        assert!(!quota.can_use_today(3));

        let stored: UsageRecord =
            serde_json::from_str(&store.get(STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(
            stored,
            UsageRecord {
                day: "2024-03-01".to_string(),
                used: 5
            }
        );
    }

    #[test]
    fn test_day_rollover_resets_usage() {
        let store = SharedStore::default();
        let clock = ManualClock::at(2024, 12, 31);
        let quota = tracker(&store, &clock);

        quota.record_use();
        quota.record_use();
        quota.record_use();
        assert!(!quota.can_use_today(3));

        clock.advance_days(1);
        assert!(quota.can_use_today(3));
        assert_eq!(quota.remaining(3), 3);
        // stale record is only rewritten by the next increment
        assert!(store.get(STORAGE_KEY).unwrap().unwrap().contains("2024-12-31"));

        quota.record_use();
        assert!(store.get(STORAGE_KEY).unwrap().unwrap().contains("2025-01-01"));
        assert_eq!(quota.remaining(3), 2);
    }

    #[test]
    fn test_malformed_records_read_as_zero() {
        let store = SharedStore::default();
        let clock = ManualClock::at(2024, 3, 1);
        let quota = tracker(&store, &clock);

        for raw in [
            "not json",
            "[]",
            r#"{"day":"2024-03-01"}"#,
            r#"{"day":"2024-03-01","used":-1}"#,
            r#"{"day":"2024-03-01","used":"2"}"#,
            r#"{"day":"2024-03-01","used":1.5}"#,
            r#"{"day":"2024-03-01","used":null}"#,
        ] {
            store.set(STORAGE_KEY, raw).unwrap();
            assert_eq!(quota.remaining(3), 3, "record {raw}");
        }

        quota.record_use();
        assert_eq!(quota.remaining(3), 2);
    }

    #[test]
    fn test_unavailable_storage_is_always_permissive() {
        let quota = QuotaTracker::with_clock(
            Box::new(UnavailableStore),
            Box::new(ManualClock::at(2024, 3, 1)),
        );
        for _ in 0..10 {
            quota.record_use();
        }
        assert!(quota.can_use_today(3));
        assert_eq!(quota.remaining(3), 3);
    }

    #[test]
    fn test_remaining_never_negative() {
        let store = SharedStore::default();
        let clock = ManualClock::at(2024, 3, 1);
        let quota = tracker(&store, &clock);

        store
            .set(STORAGE_KEY, r#"{"day":"2024-03-01","used":40}"#)
            .unwrap();
        assert_eq!(quota.remaining(3), 0);
        assert_eq!(quota.remaining(0), 0);
    }
}
