use chrono::{Datelike, Local, NaiveDate};

/// Day and month the forward-looking class window starts from.
pub fn day_month(date: NaiveDate) -> (i64, i64) {
    (i64::from(date.day()), i64::from(date.month()))
}

/// Today's day and month in the server's local time zone.
pub fn today_day_month() -> (i64, i64) {
    day_month(Local::now().date_naive())
}
