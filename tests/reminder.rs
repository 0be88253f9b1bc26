//! Daily reminder sweep: completeness, partial-failure isolation and the
//! next-fire arithmetic.

mod common;

use chrono::{NaiveTime, TimeZone};
use std::time::Duration;

use stepsbot::constants::MSG_REMINDER;
use stepsbot::model::UserId;
use stepsbot::scheduler::{delay_until_next, run_daily_reminder};

#[tokio::test]
async fn reminds_exactly_the_users_without_a_submission_today() {
    let bot = common::build_bot();
    let today = common::today();
    // A submitted today, B is registered without a submission, C is unknown.
    bot.store
        .seed(vec![
            common::registration_row("A", "1", today),
            common::submission_row("A", "1", 900, today),
            common::registration_row("B", "2", today),
        ])
        .await;
    bot.state.cache.refresh(bot.store.as_ref()).await.unwrap();

    run_daily_reminder(&bot.state).await;

    assert_eq!(bot.gateway.recipients().await, vec![UserId::from("B")]);
    assert_eq!(
        bot.gateway.texts_to(&UserId::from("B")).await,
        vec![MSG_REMINDER.to_string()]
    );
}

#[tokio::test]
async fn one_failed_delivery_does_not_stop_the_sweep() {
    let bot = common::build_bot();
    let today = common::today();
    bot.store
        .seed(vec![
            common::registration_row("B", "2", today),
            common::registration_row("D", "4", today),
        ])
        .await;
    bot.state.cache.refresh(bot.store.as_ref()).await.unwrap();
    bot.gateway.fail_for(UserId::from("B")).await;

    run_daily_reminder(&bot.state).await;

    let recipients = bot.gateway.recipients().await;
    assert_eq!(recipients, vec![UserId::from("D")]);
}

#[tokio::test]
async fn yesterdays_submission_does_not_suppress_todays_reminder() {
    let bot = common::build_bot();
    let yesterday = common::today().pred_opt().unwrap();
    bot.store
        .seed(vec![
            common::registration_row("E", "5", yesterday),
            common::submission_row("E", "5", 700, yesterday),
        ])
        .await;
    bot.state.cache.refresh(bot.store.as_ref()).await.unwrap();

    run_daily_reminder(&bot.state).await;

    assert_eq!(bot.gateway.recipients().await, vec![UserId::from("E")]);
}

#[test]
fn delay_until_next_targets_later_today_when_still_ahead() {
    let now = chrono_tz::UTC.with_ymd_and_hms(2026, 8, 29, 10, 0, 0).unwrap();
    let at = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
    assert_eq!(delay_until_next(now, at), Duration::from_secs(12 * 3600));
}

#[test]
fn delay_until_next_rolls_over_to_tomorrow() {
    let now = chrono_tz::UTC.with_ymd_and_hms(2026, 8, 29, 23, 0, 0).unwrap();
    let at = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
    assert_eq!(delay_until_next(now, at), Duration::from_secs(23 * 3600));
}

#[test]
fn delay_at_the_exact_firing_time_waits_a_full_day() {
    let now = chrono_tz::UTC.with_ymd_and_hms(2026, 8, 29, 22, 0, 0).unwrap();
    let at = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
    assert_eq!(delay_until_next(now, at), Duration::from_secs(24 * 3600));
}
