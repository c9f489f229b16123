//! Danish wall-clock helpers: the tariff bands and the day split follow local time.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::{Europe::Copenhagen, Tz};

pub const TIME_ZONE: Tz = Copenhagen;

#[must_use]
pub fn local(timestamp: DateTime<Utc>) -> DateTime<Tz> {
    timestamp.with_timezone(&TIME_ZONE)
}

#[must_use]
pub fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    local(timestamp).date_naive()
}

#[must_use]
pub fn local_hour(timestamp: DateTime<Utc>) -> u32 {
    local(timestamp).hour()
}

/// Start of the Danish calendar day.
#[must_use]
pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    TIME_ZONE
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |midnight| midnight.to_utc())
}

#[must_use]
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}
