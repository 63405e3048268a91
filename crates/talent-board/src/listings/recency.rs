//! Elapsed-day arithmetic shared by the time-window filter and the listing labels.
//!
//! Every helper here rounds the same way: the millisecond difference is divided
//! by one day and rounded up, with calendar dates anchored at 00:00 UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub const DEADLINE_WARNING_DAYS: i64 = 7;
pub const RECENT_APPLICATION_DAYS: i64 = 3;

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn ceil_days(millis: i64) -> i64 {
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Whole days elapsed from `date` until `now`, rounded up. Negative for future dates.
pub fn elapsed_days(now: DateTime<Utc>, date: NaiveDate) -> i64 {
    ceil_days((now - start_of_day(date)).num_milliseconds())
}

/// Whole days remaining from `now` until `date`, rounded up. Negative once passed.
pub fn days_until(now: DateTime<Utc>, date: NaiveDate) -> i64 {
    ceil_days((start_of_day(date) - now).num_milliseconds())
}

/// Human readable age of a posting, e.g. `3 days ago` or `2 weeks ago`.
pub fn posted_label(now: DateTime<Utc>, posted: NaiveDate) -> String {
    let millis = (now - start_of_day(posted)).num_milliseconds().abs();
    let days = ceil_days(millis);

    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural((days + 6) / 7, "week"),
        _ => plural((days + 29) / 30, "month"),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

pub fn is_deadline_near(now: DateTime<Utc>, deadline: NaiveDate) -> bool {
    days_until(now, deadline) <= DEADLINE_WARNING_DAYS
}

pub fn is_recent_application(now: DateTime<Utc>, applied: NaiveDate) -> bool {
    elapsed_days(now, applied) <= RECENT_APPLICATION_DAYS
}
