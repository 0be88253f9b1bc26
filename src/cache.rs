//! In-memory read-through projection of the record store: who is registered,
//! which badge they carry, and on which dates they submitted.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::constants::UNKNOWN_BADGE;
use crate::error::StoreError;
use crate::model::UserId;
use crate::store::{EXPECTED_COLUMNS, RecordStore, SheetRow};

/// The three projections rebuilt on every refresh. Readers always observe a
/// complete snapshot; `refresh` swaps the whole struct under one write lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub users: HashSet<UserId>,
    pub badges: HashMap<UserId, String>,
    pub entries: HashMap<UserId, HashSet<NaiveDate>>,
}

impl Snapshot {
    fn from_rows(rows: &[SheetRow]) -> Self {
        let mut snapshot = Snapshot::default();
        for row in rows {
            snapshot.users.insert(row.user_id.clone());
            snapshot.badges.insert(row.user_id.clone(), row.badge.clone());
            // Registration-only rows carry a date too, but only rows with a
            // steps value mark a submitted day.
            if row.is_submission() {
                snapshot
                    .entries
                    .entry(row.user_id.clone())
                    .or_default()
                    .insert(row.date);
            }
        }
        snapshot
    }
}

/// The cache is never the sole writer of truth: every mutation path appends
/// to the store first, then calls one of the `record_*` methods, so between
/// a store write and the next full refresh it can only be conservatively
/// stale, never wrong about what it was told.
#[derive(Default)]
pub struct SubmissionCache {
    snapshot: RwLock<Snapshot>,
}

impl SubmissionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full resync from the store. The read happens before the lock is
    /// taken, so a slow store call never blocks readers; on failure the
    /// previous snapshot stays in place and the error is returned for the
    /// caller to log.
    pub async fn refresh(&self, store: &dyn RecordStore) -> Result<(), StoreError> {
        let rows = store.read_all_rows(&EXPECTED_COLUMNS).await?;
        let next = Snapshot::from_rows(&rows);
        *self.snapshot.write().await = next;
        Ok(())
    }

    pub async fn has_submitted(&self, user: &UserId, date: NaiveDate) -> bool {
        self.snapshot
            .read()
            .await
            .entries
            .get(user)
            .is_some_and(|dates| dates.contains(&date))
    }

    pub async fn is_registered(&self, user: &UserId) -> bool {
        self.snapshot.read().await.users.contains(user)
    }

    /// Badge for a user, or the `UNKNOWN` sentinel when the cache has none.
    pub async fn badge_of(&self, user: &UserId) -> String {
        self.snapshot
            .read()
            .await
            .badges
            .get(user)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_BADGE.to_string())
    }

    /// Write-through companion of a successful registration append; makes
    /// the user visible to a concurrent reminder cycle without waiting for
    /// the next full refresh.
    pub async fn record_registration(&self, user: &UserId, badge: &str) {
        let mut snapshot = self.snapshot.write().await;
        snapshot.users.insert(user.clone());
        snapshot.badges.insert(user.clone(), badge.to_string());
    }

    /// Write-through companion of a successful submission append.
    pub async fn record_submission(&self, user: &UserId, date: NaiveDate) {
        self.snapshot
            .write()
            .await
            .entries
            .entry(user.clone())
            .or_default()
            .insert(date);
    }

    pub async fn all_known_users(&self) -> Vec<UserId> {
        self.snapshot.read().await.users.iter().cloned().collect()
    }

    /// Cloned view of the current projections, for diagnostics and tests.
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }
}
