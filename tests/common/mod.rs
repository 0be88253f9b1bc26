//! Shared fakes: an in-memory record store and a recording gateway, plus a
//! small builder wiring them into an `AppState` the way `main` does.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::time::Duration;
use tokio::sync::RwLock;

use stepsbot::cache::SubmissionCache;
use stepsbot::config::BotConfig;
use stepsbot::error::{DeliveryError, StoreError};
use stepsbot::gateway::MessagingGateway;
use stepsbot::model::{AppState, Sender, UserId};
use stepsbot::session::SessionStore;
use stepsbot::store::{RecordStore, SheetRow};

#[derive(Default)]
pub struct MemStore {
    pub rows: RwLock<Vec<SheetRow>>,
    fail_reads: RwLock<bool>,
    fail_appends: RwLock<bool>,
}

impl MemStore {
    pub async fn seed(&self, rows: Vec<SheetRow>) {
        *self.rows.write().await = rows;
    }

    pub async fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write().await = fail;
    }

    pub async fn set_fail_appends(&self, fail: bool) {
        *self.fail_appends.write().await = fail;
    }

    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn last_row(&self) -> Option<SheetRow> {
        self.rows.read().await.last().cloned()
    }
}

#[async_trait]
impl RecordStore for MemStore {
    async fn read_all_rows(&self, _expected_columns: &[&str]) -> Result<Vec<SheetRow>, StoreError> {
        if *self.fail_reads.read().await {
            return Err(StoreError::Read("mem store offline".into()));
        }
        Ok(self.rows.read().await.clone())
    }

    async fn append_row(&self, row: SheetRow) -> Result<(), StoreError> {
        if *self.fail_appends.read().await {
            return Err(StoreError::Append("mem store offline".into()));
        }
        self.rows.write().await.push(row);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingGateway {
    pub sent: RwLock<Vec<(UserId, String)>>,
    failing: RwLock<HashSet<UserId>>,
}

impl RecordingGateway {
    pub async fn fail_for(&self, user: UserId) {
        self.failing.write().await.insert(user);
    }

    pub async fn recipients(&self) -> Vec<UserId> {
        self.sent.read().await.iter().map(|(u, _)| u.clone()).collect()
    }

    pub async fn texts_to(&self, user: &UserId) -> Vec<String> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|(u, _)| u == user)
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub async fn last_text_to(&self, user: &UserId) -> Option<String> {
        self.texts_to(user).await.pop()
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_text(&self, user: &UserId, text: &str) -> Result<(), DeliveryError> {
        if self.failing.read().await.contains(user) {
            return Err(DeliveryError::Send("user blocked the bot".into()));
        }
        self.sent.write().await.push((user.clone(), text.to_string()));
        Ok(())
    }
}

pub struct TestBot {
    pub state: Arc<AppState>,
    pub store: Arc<MemStore>,
    pub gateway: Arc<RecordingGateway>,
}

pub fn test_config() -> BotConfig {
    BotConfig {
        timezone: chrono_tz::UTC,
        reminder_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        refresh_interval: Duration::from_secs(3600),
        refresh_warmup: Duration::from_secs(10),
        sheet_path: "unused.csv".into(),
    }
}

pub fn build_bot() -> TestBot {
    let store = Arc::new(MemStore::default());
    let gateway = Arc::new(RecordingGateway::default());
    let state = Arc::new(AppState {
        cache: SubmissionCache::new(),
        store: store.clone(),
        gateway: gateway.clone(),
        sessions: SessionStore::default(),
        config: test_config(),
    });
    TestBot {
        state,
        store,
        gateway,
    }
}

pub fn sender(id: &str) -> Sender {
    Sender {
        id: UserId::from(id),
        handle: Some(format!("user_{id}")),
    }
}

/// "Today" as the test config computes it (UTC).
pub fn today() -> NaiveDate {
    stepsbot::util::today_in(chrono_tz::UTC)
}

pub fn registration_row(id: &str, badge: &str, date: NaiveDate) -> SheetRow {
    SheetRow {
        first_name: "First".into(),
        last_name: "Last".into(),
        user_id: UserId::from(id),
        handle: format!("user_{id}"),
        badge: badge.into(),
        steps: None,
        photo_ref: None,
        date,
    }
}

pub fn submission_row(id: &str, badge: &str, steps: u64, date: NaiveDate) -> SheetRow {
    SheetRow {
        first_name: "First".into(),
        last_name: "Last".into(),
        user_id: UserId::from(id),
        handle: format!("user_{id}"),
        badge: badge.into(),
        steps: Some(steps),
        photo_ref: Some(format!("photo-{id}")),
        date,
    }
}
