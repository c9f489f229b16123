use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    calendar,
    interval::Interval,
    quantity::rate::KilowattHourRate,
    region::Region,
    tariff::PricingStrategy,
};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub interval: Interval,

    /// Spot price excluding VAT.
    pub spot: KilowattHourRate,

    /// Tariff and fees including VAT.
    pub grid: KilowattHourRate,

    /// What the consumer pays.
    pub total: KilowattHourRate,
}

impl PricePoint {
    /// Price the spot rate with the strategy, using the local hour of the interval start.
    pub fn priced(
        interval: Interval,
        spot: KilowattHourRate,
        region: Region,
        strategy: &dyn PricingStrategy,
    ) -> Self {
        let hour = calendar::local_hour(interval.start);
        Self {
            interval,
            spot,
            grid: strategy.grid_cost(hour, region),
            total: strategy.total_price(spot, hour, region),
        }
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.interval.start
    }
}
