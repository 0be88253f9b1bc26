//! Runtime configuration read from the environment, with sensible defaults
//! so the bot starts with nothing but a token-less local setup.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;

use crate::constants;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// All users share one submission-day boundary computed in this timezone.
    pub timezone: Tz,
    /// Wall-clock time (in `timezone`) at which the daily reminder fires.
    pub reminder_time: NaiveTime,
    /// Interval between full cache resyncs from the store.
    pub refresh_interval: Duration,
    /// Delay before the first resync after startup.
    pub refresh_warmup: Duration,
    /// Backing CSV file for the bundled local store.
    pub sheet_path: PathBuf,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let timezone = match env::var("STEPSBOT_TIMEZONE") {
            Ok(raw) => raw
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimezone(raw))?,
            Err(_) => chrono_tz::Europe::Moscow,
        };
        let reminder_time = match env::var("STEPSBOT_REMINDER_TIME") {
            Ok(raw) => parse_reminder_time(&raw)?,
            Err(_) => parse_reminder_time(constants::DEFAULT_REMINDER_TIME)?,
        };
        let refresh_interval = seconds_from_env(
            "STEPSBOT_REFRESH_INTERVAL_SECS",
            constants::DEFAULT_REFRESH_INTERVAL_SECS,
        )?;
        let refresh_warmup = seconds_from_env(
            "STEPSBOT_REFRESH_WARMUP_SECS",
            constants::DEFAULT_REFRESH_WARMUP_SECS,
        )?;
        let sheet_path = env::var("STEPSBOT_SHEET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(constants::DEFAULT_SHEET_PATH));

        Ok(Self {
            timezone,
            reminder_time,
            refresh_interval,
            refresh_warmup,
            sheet_path,
        })
    }
}

fn parse_reminder_time(raw: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| ConfigError::InvalidReminderTime(raw.to_string()))
}

fn seconds_from_env(key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidSeconds { key, value: raw }),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
