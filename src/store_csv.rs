//! CSV-file implementation of `RecordStore`, used by the bundled binary for
//! local operation. The file mirrors the 8-column sheet schema, header
//! included; rows that fail to parse are skipped with a warning so one bad
//! line cannot poison a refresh.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use crate::error::StoreError;
use crate::store::{EXPECTED_COLUMNS, RecordStore, SheetRow};

pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_sync(path: &Path, expected: &[String]) -> Result<Vec<SheetRow>, StoreError> {
        if !path.exists() {
            // An empty table, not an error: the first append creates it.
            return Ok(Vec::new());
        }
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| StoreError::Read(e.to_string()))?;
        let headers = reader
            .headers()
            .map_err(|e| StoreError::Read(e.to_string()))?;
        if headers.iter().ne(expected.iter().map(String::as_str)) {
            return Err(StoreError::Read(format!(
                "header mismatch: expected {expected:?}, found {headers:?}"
            )));
        }
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| StoreError::Read(e.to_string()))?;
            let fields: Vec<String> = record.iter().map(str::to_string).collect();
            match SheetRow::from_record(&fields) {
                Ok(row) => rows.push(row),
                Err(e) => warn!(target = "store.csv", error = %e, "skipping malformed row"),
            }
        }
        Ok(rows)
    }

    fn append_sync(path: &Path, row: &SheetRow) -> Result<(), StoreError> {
        let new_file = !path.exists();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::Append(e.to_string()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if new_file {
            writer
                .write_record(EXPECTED_COLUMNS)
                .map_err(|e| StoreError::Append(e.to_string()))?;
        }
        writer
            .write_record(row.to_record())
            .map_err(|e| StoreError::Append(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StoreError::Append(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for CsvStore {
    async fn read_all_rows(&self, expected_columns: &[&str]) -> Result<Vec<SheetRow>, StoreError> {
        let path = self.path.clone();
        let expected: Vec<String> = expected_columns.iter().map(|s| s.to_string()).collect();
        tokio::task::spawn_blocking(move || Self::read_sync(&path, &expected))
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?
    }

    async fn append_row(&self, row: SheetRow) -> Result<(), StoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::append_sync(&path, &row))
            .await
            .map_err(|e| StoreError::Append(e.to_string()))?
    }
}
