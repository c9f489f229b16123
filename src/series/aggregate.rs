use chrono::NaiveDate;
use itertools::Itertools;

use crate::{calendar, quantity::rate::KilowattHourRate, series::PricePoint};

/// Per-day statistics of the historical series.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub average: KilowattHourRate,
    pub min: KilowattHourRate,
    pub max: KilowattHourRate,
}

impl DailyAggregate {
    /// Group the points by the Danish calendar date, in date order.
    #[must_use]
    pub fn from_series(points: &[PricePoint]) -> Vec<Self> {
        points
            .iter()
            .into_group_map_by(|point| calendar::local_date(point.start()))
            .into_iter()
            .sorted_unstable_by_key(|(date, _)| *date)
            .filter_map(|(date, points)| {
                let (min, max) = points.iter().map(|point| point.total).minmax().into_option()?;
                #[allow(clippy::cast_precision_loss)]
                let average =
                    points.iter().map(|point| point.total).sum::<KilowattHourRate>() / points.len() as f64;
                Some(Self { date, average, min, max })
            })
            .collect()
    }
}

/// Keep every `step`-th point, starting with the first one.
#[must_use]
pub fn downsample(points: &[PricePoint], step: usize) -> Vec<PricePoint> {
    points.iter().step_by(step.max(1)).copied().collect()
}
