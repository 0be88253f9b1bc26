//! Small shared helpers: the submission-day clock and input validation.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Calendar date "today" in the bot's fixed timezone. Every submission-day
/// decision goes through this one function so the dialogue and the reminder
/// job can never disagree on the day boundary.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Parse a step count: ASCII decimal digits only. Leading zeros are fine
/// ("007" is 7); signs, decimal points, whitespace and values that overflow
/// `u64` are all rejected.
pub fn parse_steps(text: &str) -> Option<u64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
