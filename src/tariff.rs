mod band;
mod strategy;

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

pub use self::{
    band::Band,
    strategy::{Pricing, PricingStrategy},
};
use crate::{prelude::*, quantity::rate::KilowattHourRate, region::Region};

/// Distribution tariff («nettarif») rates per band, excluding VAT.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TariffSchedule {
    pub low: KilowattHourRate,
    pub medium: KilowattHourRate,
    pub high: KilowattHourRate,
}

impl TariffSchedule {
    /// N1, the grid operator in most of DK1.
    pub const DK1: Self = Self {
        low: KilowattHourRate(0.1330),
        medium: KilowattHourRate(0.1995),
        high: KilowattHourRate(0.5187),
    };

    /// Radius, the grid operator in most of DK2.
    pub const DK2: Self = Self {
        low: KilowattHourRate(0.1863),
        medium: KilowattHourRate(0.5477),
        high: KilowattHourRate(1.3520),
    };

    #[must_use]
    pub const fn builtin(region: Region) -> Self {
        match region {
            Region::Dk1 => Self::DK1,
            Region::Dk2 => Self::DK2,
        }
    }

    #[must_use]
    pub const fn rate(&self, band: Band) -> KilowattHourRate {
        match band {
            Band::Low => self.low,
            Band::Medium => self.medium,
            Band::High => self.high,
        }
    }
}

/// Per-kilowatt-hour charges that do not depend on the hour or the region, excluding VAT.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedFees {
    /// Energinet transmission tariff.
    pub transmission: KilowattHourRate,

    /// Energinet system tariff.
    pub system: KilowattHourRate,

    /// Electricity tax («elafgift»).
    pub electricity_tax: KilowattHourRate,
}

impl Default for FixedFees {
    fn default() -> Self {
        Self {
            transmission: KilowattHourRate(0.049),
            system: KilowattHourRate(0.054),
            electricity_tax: KilowattHourRate(0.00872),
        }
    }
}

impl FixedFees {
    #[must_use]
    pub fn total(&self) -> KilowattHourRate {
        self.transmission + self.system + self.electricity_tax
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Tariffs {
    /// VAT multiplier applied to the pre-tax total.
    pub vat: f64,

    pub fees: FixedFees,

    /// Region whose schedule is used when the requested one is not configured.
    pub default_region: Region,

    /// Schedules keyed by the price area code.
    pub schedules: BTreeMap<String, TariffSchedule>,
}

impl Default for Tariffs {
    fn default() -> Self {
        Self {
            vat: 1.25,
            fees: FixedFees::default(),
            default_region: Region::default(),
            schedules: Region::ALL
                .into_iter()
                .map(|region| (region.code().to_string(), TariffSchedule::builtin(region)))
                .collect(),
        }
    }
}

impl Tariffs {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context("failed to read the tariffs")?;
        let tariffs: Self = toml::from_str(&contents).context("failed to parse the tariffs")?;
        ensure!(tariffs.vat >= 1.0, "VAT multiplier must be at least 1.0, got {}", tariffs.vat);
        info!(n_schedules = tariffs.schedules.len(), vat = tariffs.vat, "loaded");
        Ok(tariffs)
    }

    #[must_use]
    pub fn schedule(&self, region: Region) -> TariffSchedule {
        self.schedules
            .get(region.code())
            .or_else(|| self.schedules.get(self.default_region.code()))
            .copied()
            .unwrap_or_else(|| TariffSchedule::builtin(self.default_region))
    }

    /// Distribution tariff for the local hour, excluding VAT.
    #[must_use]
    pub fn distribution_tariff(&self, hour: u32, region: Region) -> KilowattHourRate {
        self.schedule(region).rate(Band::at(hour))
    }

    /// Distribution tariff and fixed fees, including VAT.
    #[must_use]
    pub fn grid_cost(&self, hour: u32, region: Region) -> KilowattHourRate {
        (self.distribution_tariff(hour, region) + self.fees.total()) * self.vat
    }

    /// Consumer price for the spot price excluding VAT.
    #[must_use]
    pub fn total_price(&self, spot: KilowattHourRate, hour: u32, region: Region) -> KilowattHourRate {
        (spot + self.distribution_tariff(hour, region) + self.fees.total()) * self.vat
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn expected_grid_cost(region: Region, band: Band) -> f64 {
        match (region, band) {
            (Region::Dk1, Band::Low) => 0.3059,
            (Region::Dk1, Band::Medium) => 0.389_025,
            (Region::Dk1, Band::High) => 0.788_025,
            (Region::Dk2, Band::Low) => 0.372_525,
            (Region::Dk2, Band::Medium) => 0.824_275,
            (Region::Dk2, Band::High) => 1.829_65,
        }
    }

    #[test]
    fn test_grid_cost_matches_documented_markup() {
        let tariffs = Tariffs::default();
        for region in Region::ALL {
            for hour in 0..24 {
                assert_abs_diff_eq!(
                    tariffs.grid_cost(hour, region).0,
                    expected_grid_cost(region, Band::at(hour)),
                    epsilon = 1e-9,
                );
            }
        }
    }

    #[test]
    fn test_band_boundaries_on_both_sides() {
        let tariffs = Tariffs::default();
        for region in Region::ALL {
            let schedule = TariffSchedule::builtin(region);
            assert_eq!(tariffs.distribution_tariff(23, region), schedule.medium);
            assert_eq!(tariffs.distribution_tariff(0, region), schedule.low);
            assert_eq!(tariffs.distribution_tariff(5, region), schedule.low);
            assert_eq!(tariffs.distribution_tariff(6, region), schedule.medium);
            assert_eq!(tariffs.distribution_tariff(16, region), schedule.medium);
            assert_eq!(tariffs.distribution_tariff(17, region), schedule.high);
            assert_eq!(tariffs.distribution_tariff(20, region), schedule.high);
            assert_eq!(tariffs.distribution_tariff(21, region), schedule.medium);
        }
    }

    #[test]
    fn test_total_price() {
        let total = Tariffs::default().total_price(KilowattHourRate(0.5), 12, Region::Dk2);
        assert_abs_diff_eq!(total.0, 1.449_275, epsilon = 1e-9);
    }

    #[test]
    fn test_total_price_is_monotonic_in_spot() {
        let tariffs = Tariffs::default();
        for region in Region::ALL {
            for hour in 0..24 {
                let totals: Vec<_> = (-20..=60)
                    .map(|cents| tariffs.total_price(KilowattHourRate(f64::from(cents) / 10.0), hour, region))
                    .collect();
                assert!(totals.is_sorted(), "hour={hour} region={region}");
            }
        }
    }

    #[test]
    fn test_unconfigured_region_falls_back_to_default_schedule() {
        let tariffs = Tariffs {
            schedules: BTreeMap::from([("DK1".to_string(), TariffSchedule::DK1)]),
            ..Tariffs::default()
        };
        assert_eq!(tariffs.schedule(Region::Dk2), TariffSchedule::DK1);

        let empty = Tariffs { schedules: BTreeMap::new(), ..Tariffs::default() };
        assert_eq!(empty.schedule(Region::Dk2), TariffSchedule::DK1);
    }

    #[test]
    fn test_read_partial_file() -> Result {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tariffs.toml");
        // language=TOML
        fs::write(
            &path,
            r#"
                default_region = "DK2"

                [schedules.DK2]
                low = 0.1
                medium = 0.2
                high = 0.3
            "#,
        )?;
        let tariffs = Tariffs::read_from(&path)?;
        assert_abs_diff_eq!(tariffs.vat, 1.25);
        assert_eq!(tariffs.fees, FixedFees::default());
        assert_eq!(tariffs.schedules.len(), 1);
        assert_eq!(tariffs.schedule(Region::Dk1).high, KilowattHourRate(0.3));
        Ok(())
    }
}
