use crate::{quantity::rate::KilowattHourRate, region::Region, tariff::Tariffs};

/// How a spot price turns into the price a household pays.
pub trait PricingStrategy: Send + Sync {
    /// Everything on top of the spot price for the given local hour.
    fn grid_cost(&self, hour: u32, region: Region) -> KilowattHourRate;

    fn total_price(&self, spot: KilowattHourRate, hour: u32, region: Region) -> KilowattHourRate;
}

/// Bare spot price as published by the market.
pub struct FlatPricing;

impl PricingStrategy for FlatPricing {
    fn grid_cost(&self, _hour: u32, _region: Region) -> KilowattHourRate {
        KilowattHourRate::ZERO
    }

    fn total_price(&self, spot: KilowattHourRate, _hour: u32, _region: Region) -> KilowattHourRate {
        spot
    }
}

/// Spot price with the distribution tariff, fixed fees, and VAT layered on top.
pub struct TariffPricing(pub Tariffs);

impl PricingStrategy for TariffPricing {
    fn grid_cost(&self, hour: u32, region: Region) -> KilowattHourRate {
        self.0.grid_cost(hour, region)
    }

    fn total_price(&self, spot: KilowattHourRate, hour: u32, region: Region) -> KilowattHourRate {
        self.0.total_price(spot, hour, region)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Pricing {
    /// Spot price only, excluding VAT.
    Flat,

    /// Spot price plus grid tariff, fees, and VAT.
    #[default]
    Tariffs,
}

impl Pricing {
    #[must_use]
    pub fn into_strategy(self, tariffs: Tariffs) -> Box<dyn PricingStrategy> {
        match self {
            Self::Flat => Box::new(FlatPricing),
            Self::Tariffs => Box::new(TariffPricing(tariffs)),
        }
    }
}
