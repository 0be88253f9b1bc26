//! The durable record store seam and its fixed row schema.
//! The store is an append-only table; nothing in it is ever updated in
//! place, and uniqueness of (user, date) is enforced by the cache's dedup
//! check rather than by the store itself.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreError;
use crate::model::{Sender, UserId};

/// Column order of the backing table. Registration-only rows leave the
/// steps and photo columns blank.
pub const EXPECTED_COLUMNS: [&str; 8] = [
    "First name",
    "Last name",
    "User ID",
    "Handle",
    "Badge",
    "Steps",
    "Photo ID",
    "Date",
];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One typed row of the backing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub first_name: String,
    pub last_name: String,
    pub user_id: UserId,
    pub handle: String,
    pub badge: String,
    /// `None` for registration-only rows.
    pub steps: Option<u64>,
    /// `None` for registration-only rows.
    pub photo_ref: Option<String>,
    pub date: NaiveDate,
}

impl SheetRow {
    /// Row written when a registration completes. Steps and photo stay blank;
    /// the date column records the registration day.
    pub fn registration(
        sender: &Sender,
        first_name: &str,
        last_name: &str,
        badge: &str,
        date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            user_id: sender.id.clone(),
            handle: sender.handle.clone().unwrap_or_default(),
            badge: badge.to_string(),
            steps: None,
            photo_ref: None,
            date,
        }
    }

    /// A row carrying a steps value is a submission; anything else only
    /// contributes registration data.
    pub fn is_submission(&self) -> bool {
        self.steps.is_some()
    }

    /// Serialize into the fixed column order.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.user_id.0.clone(),
            self.handle.clone(),
            self.badge.clone(),
            self.steps.map(|s| s.to_string()).unwrap_or_default(),
            self.photo_ref.clone().unwrap_or_default(),
            self.date.format(DATE_FORMAT).to_string(),
        ]
    }

    /// Parse a raw record back into a typed row.
    pub fn from_record(fields: &[String]) -> Result<Self, StoreError> {
        if fields.len() != EXPECTED_COLUMNS.len() {
            return Err(StoreError::MalformedRow(format!(
                "expected {} columns, got {}",
                EXPECTED_COLUMNS.len(),
                fields.len()
            )));
        }
        let steps = match fields[5].trim() {
            "" => None,
            raw => Some(raw.parse().map_err(|_| {
                StoreError::MalformedRow(format!("bad steps value: {raw}"))
            })?),
        };
        let photo_ref = match fields[6].trim() {
            "" => None,
            raw => Some(raw.to_string()),
        };
        let date = NaiveDate::parse_from_str(fields[7].trim(), DATE_FORMAT)
            .map_err(|_| StoreError::MalformedRow(format!("bad date value: {}", fields[7])))?;
        Ok(Self {
            first_name: fields[0].clone(),
            last_name: fields[1].clone(),
            user_id: UserId(fields[2].clone()),
            handle: fields[3].clone(),
            badge: fields[4].clone(),
            steps,
            photo_ref,
            date,
        })
    }
}

/// Abstract append-only tabular store. The cache is rebuilt from
/// `read_all_rows`; every mutation path appends here before touching the
/// cache.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read every row in insertion order. `expected_columns` lets the store
    /// verify that the table it is reading matches the schema the caller
    /// assumes.
    async fn read_all_rows(&self, expected_columns: &[&str]) -> Result<Vec<SheetRow>, StoreError>;

    /// Append one row at the end of the table.
    async fn append_row(&self, row: SheetRow) -> Result<(), StoreError>;
}
