mod aggregate;
mod point;

use chrono::{DateTime, Utc};

pub use self::{
    aggregate::{DailyAggregate, downsample},
    point::PricePoint,
};
use crate::calendar;

/// Split the interleaved series into today and tomorrow by the Danish calendar.
///
/// Points before today's midnight belong to neither.
#[must_use]
pub fn split_days(points: &[PricePoint], now: DateTime<Utc>) -> (Vec<PricePoint>, Vec<PricePoint>) {
    let today = calendar::local_date(now);
    let today_midnight = calendar::midnight(today);
    let tomorrow_midnight = calendar::midnight(calendar::next_day(today));
    let (today, later): (Vec<_>, Vec<_>) = points
        .iter()
        .copied()
        .filter(|point| point.start() >= today_midnight)
        .partition(|point| point.start() < tomorrow_midnight);
    (today, later)
}

/// Select the point covering `now`, or the latest available one.
#[must_use]
pub fn current(points: &[PricePoint], now: DateTime<Utc>) -> Option<PricePoint> {
    points
        .iter()
        .find(|point| point.interval.contains(now))
        .or_else(|| points.iter().max_by_key(|point| point.start()))
        .copied()
}
