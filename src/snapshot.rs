use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::{fuel::FuelPrices, utilities::UtilityPrices},
    region::Region,
    series::PricePoint,
};

/// Everything the dashboard shows, replaced as a whole on every refresh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub region: Region,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PricePoint>,

    #[serde(default)]
    pub today: Vec<PricePoint>,

    #[serde(default)]
    pub tomorrow: Vec<PricePoint>,

    #[serde(default)]
    pub history: Vec<PricePoint>,

    #[serde(default)]
    pub fuel: FuelPrices,

    #[serde(default)]
    pub utilities: UtilityPrices,
}

impl Snapshot {
    /// Today followed by tomorrow.
    pub fn upcoming(&self) -> impl Iterator<Item = &PricePoint> {
        self.today.iter().chain(&self.tomorrow)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.today.is_empty() && self.tomorrow.is_empty()
    }
}
