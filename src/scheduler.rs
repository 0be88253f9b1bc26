//! Background jobs: the periodic cache refresh and the daily reminder
//! sweep. The two tasks are independent; a failure in one never cancels the
//! other, and neither is ever fatal to the process.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::constants::{EXTERNAL_CALL_TIMEOUT_SECS, MSG_REMINDER};
use crate::error::StoreError;
use crate::model::AppState;
use crate::util::today_in;

const EXTERNAL_CALL_TIMEOUT: Duration = Duration::from_secs(EXTERNAL_CALL_TIMEOUT_SECS);

/// Spawn the periodic cache-refresh loop: first run after the configured
/// warm-up, then on a fixed interval. Failures keep the previous snapshot
/// and never cancel future runs.
pub fn spawn_refresh_task(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(state.config.refresh_warmup).await;
        loop {
            match refresh_once(&state).await {
                Ok(()) => debug!(target = "scheduler.refresh", "cache refreshed"),
                Err(e) => warn!(
                    target = "scheduler.refresh",
                    error = %e,
                    transient = e.is_transient(),
                    "cache refresh failed; keeping previous snapshot"
                ),
            }
            sleep(state.config.refresh_interval).await;
        }
    })
}

async fn refresh_once(state: &AppState) -> Result<(), StoreError> {
    // If the timeout fires the refresh future is dropped before the swap,
    // so the cache still holds the last good snapshot.
    match timeout(EXTERNAL_CALL_TIMEOUT, state.cache.refresh(state.store.as_ref())).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout),
    }
}

/// Spawn the once-a-day reminder loop, firing at the configured wall-clock
/// time in the configured timezone, every day of the week.
pub fn spawn_daily_reminder_task(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Utc::now().with_timezone(&state.config.timezone);
            sleep(delay_until_next(now, state.config.reminder_time)).await;
            run_daily_reminder(&state).await;
        }
    })
}

/// Delay from `now` until the next occurrence of `at` in the same timezone:
/// later today if still ahead, otherwise tomorrow.
pub fn delay_until_next(now: DateTime<Tz>, at: NaiveTime) -> Duration {
    let now_local = now.naive_local();
    let today_target = now.date_naive().and_time(at);
    let until = if now_local < today_target {
        today_target - now_local
    } else {
        today_target + TimeDelta::days(1) - now_local
    };
    until.to_std().unwrap_or(Duration::ZERO)
}

/// One reminder sweep over the current cache state. The daily task does not
/// force a refresh; it trusts whatever the refresh loop last built plus the
/// write-through updates. A failed send is logged and skipped so one bad
/// user id cannot block reminders to the rest.
pub async fn run_daily_reminder(state: &AppState) {
    let today = today_in(state.config.timezone);
    let users = state.cache.all_known_users().await;
    info!(
        target = "scheduler.reminder",
        known_users = users.len(),
        %today,
        "reminder sweep started"
    );
    let mut sent = 0usize;
    for user in users {
        if state.cache.has_submitted(&user, today).await {
            continue;
        }
        match timeout(EXTERNAL_CALL_TIMEOUT, state.gateway.send_text(&user, MSG_REMINDER)).await {
            Ok(Ok(())) => sent += 1,
            Ok(Err(e)) => warn!(
                target = "scheduler.reminder",
                user = %user,
                error = %e,
                "reminder delivery failed"
            ),
            Err(_) => warn!(
                target = "scheduler.reminder",
                user = %user,
                "reminder delivery timed out"
            ),
        }
    }
    info!(target = "scheduler.reminder", sent, "reminder sweep finished");
}
