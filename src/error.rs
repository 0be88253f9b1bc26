//! Error kinds for the bot's external interactions.
//! Each concern gets its own enum so callers can tell retryable failures
//! apart from terminal ones instead of swallowing everything uniformly.

use thiserror::Error;

/// Failures talking to the durable record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store append failed: {0}")]
    Append(String),

    #[error("store call timed out")]
    Timeout,

    #[error("malformed row: {0}")]
    MalformedRow(String),
}

impl StoreError {
    /// A malformed row is a data problem that retrying will not fix;
    /// everything else is worth another attempt on the next cycle.
    pub fn is_transient(&self) -> bool {
        !matches!(self, StoreError::MalformedRow(_))
    }
}

/// Failure delivering an outbound message to one user.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("message delivery failed: {0}")]
    Send(String),

    #[error("message delivery timed out")]
    Timeout,
}

/// Invalid runtime configuration. Only surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid reminder time (expected HH:MM): {0}")]
    InvalidReminderTime(String),

    #[error("invalid value for {key}: {value} (expected whole seconds)")]
    InvalidSeconds { key: &'static str, value: String },
}
