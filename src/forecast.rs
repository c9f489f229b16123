mod alert;
mod class;

use chrono::{DateTime, Utc};
use itertools::Itertools;

pub use self::{alert::Alert, class::PriceClass};
use crate::{quantity::rate::KilowattHourRate, series::PricePoint};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Summary {
    pub min: KilowattHourRate,
    pub max: KilowattHourRate,
    pub average: KilowattHourRate,
}

impl Summary {
    #[must_use]
    pub fn of(points: &[PricePoint]) -> Option<Self> {
        let (min, max) = points.iter().map(|point| point.total).minmax().into_option()?;
        Some(Self { min, max, average: average(points.iter().map(|point| point.total))? })
    }
}

/// Cheapest and most expensive intervals.
#[derive(Clone, Debug, Default)]
pub struct BestWorst {
    /// Cheapest first.
    pub best: Vec<PricePoint>,

    /// Most expensive first.
    pub worst: Vec<PricePoint>,
}

impl BestWorst {
    pub const N_POINTS: usize = 5;

    /// Equal prices keep their chronological order.
    #[must_use]
    pub fn of(points: &[PricePoint]) -> Self {
        let sorted = points.iter().copied().sorted_by_key(|point| point.total).collect_vec();
        Self {
            best: sorted.iter().take(Self::N_POINTS).copied().collect(),
            worst: sorted.iter().rev().take(Self::N_POINTS).copied().collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    const RISING_FACTOR: f64 = 1.1;
    const FALLING_FACTOR: f64 = 0.9;

    #[must_use]
    pub fn classify(reference: KilowattHourRate, observed: KilowattHourRate) -> Self {
        if observed > reference * Self::RISING_FACTOR {
            Self::Rising
        } else if observed < reference * Self::FALLING_FACTOR {
            Self::Falling
        } else {
            Self::Stable
        }
    }

    /// Compare the interval covering `now` with the one right after it.
    #[must_use]
    pub fn next_step(points: &[PricePoint], now: DateTime<Utc>) -> Self {
        let Some(next_index) = points.iter().position(|point| point.start() > now) else {
            return Self::Stable;
        };
        let Some(current_index) = next_index.checked_sub(1) else {
            return Self::Stable;
        };
        Self::classify(points[current_index].total, points[next_index].total)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Forecast {
    /// There are no prices at all.
    Unavailable,

    /// Not enough upcoming prices, typically before the next day's auction is published.
    Waiting,

    Trend { trend: Trend, current: KilowattHourRate, upcoming_average: KilowattHourRate },
}

impl Forecast {
    pub const N_UPCOMING: usize = 8;
    pub const MIN_UPCOMING: usize = 2;

    /// Classify the average of the upcoming points against the current price.
    ///
    /// `points` must be chronological.
    #[must_use]
    pub fn new(points: &[PricePoint], current: Option<KilowattHourRate>, now: DateTime<Utc>) -> Self {
        if points.is_empty() {
            return Self::Unavailable;
        }
        let upcoming = points
            .iter()
            .filter(|point| point.start() > now)
            .take(Self::N_UPCOMING)
            .map(|point| point.total)
            .collect_vec();
        if upcoming.len() < Self::MIN_UPCOMING {
            return Self::Waiting;
        }
        let Some(upcoming_average) = average(upcoming.into_iter()) else {
            return Self::Waiting;
        };
        let current = current.unwrap_or(KilowattHourRate::ZERO);
        Self::Trend { trend: Trend::classify(current, upcoming_average), current, upcoming_average }
    }
}

fn average(rates: impl Iterator<Item = KilowattHourRate>) -> Option<KilowattHourRate> {
    let (sum, count) = rates.fold((KilowattHourRate::ZERO, 0_u32), |(sum, count), rate| (sum + rate, count + 1));
    (count != 0).then(|| sum / f64::from(count))
}
