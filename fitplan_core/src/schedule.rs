//! Session date scheduling.
//!
//! Sessions are spaced `ceil(7 / days_per_week)` calendar days apart and
//! never fall on a Saturday or Sunday.

use crate::{Error, Result};
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn next_weekday(mut date: NaiveDate) -> NaiveDate {
    while is_weekend(date) {
        date = date + Days::new(1);
    }
    date
}

/// Calendar days between consecutive sessions
pub fn spacing_days(days_per_week: u32) -> Result<u64> {
    if days_per_week == 0 {
        return Err(Error::InvalidProfile(
            "days_per_week must be at least 1".into(),
        ));
    }
    Ok(7u64.div_ceil(u64::from(days_per_week)))
}

/// Generate `count` session dates starting on or after `start`
///
/// The returned dates are strictly increasing and all fall Monday–Friday.
pub fn generate_dates(start: NaiveDate, days_per_week: u32, count: usize) -> Result<Vec<NaiveDate>> {
    let step = spacing_days(days_per_week)?;
    let mut dates = Vec::with_capacity(count);
    let mut current = next_weekday(start);

    for _ in 0..count {
        dates.push(current);
        current = next_weekday(current + Days::new(step));
    }

    tracing::debug!(
        "Scheduled {} sessions from {} every {} day(s)",
        count,
        start,
        step
    );
    Ok(dates)
}

/// Generate session dates starting from today's local date
pub fn generate_dates_from_today(days_per_week: u32, count: usize) -> Result<Vec<NaiveDate>> {
    generate_dates(today(), days_per_week, count)
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Render a date for display, e.g. "Friday, October 16"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}
