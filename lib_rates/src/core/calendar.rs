//! Calendar helpers. Records are keyed by UTC calendar date, formatted `YYYY-MM-DD`.

use chrono::{NaiveDate, Utc};

/// The current UTC calendar date.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// The calendar day before `date`.
///
/// For UTC dates this is the same day that subtracting 24 hours would land on.
/// Returns `date` itself only at `NaiveDate::MIN`, which no feed will ever carry.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}
