//! Periodically updated utility prices published as a static JSON document.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::{
    api::provider::Provider,
    prelude::*,
    quantity::{rate::MegawattHourRate, volume::CubicMetrePrice},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtilityPrices {
    /// Natural gas.
    pub gas: CubicMetrePrice,

    /// Tap water including taxes.
    pub water: CubicMetrePrice,

    /// Variable district heating («fjernvarme») energy price including VAT.
    pub district_heating: MegawattHourRate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_heating_supplier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<NaiveDate>,
}

impl Default for UtilityPrices {
    fn default() -> Self {
        Self {
            gas: CubicMetrePrice(8.50),
            water: CubicMetrePrice(45.00),
            district_heating: MegawattHourRate(485.0),
            district_heating_supplier: None,
            updated_on: None,
        }
    }
}

pub struct Api {
    client: Client,

    /// Without the URL, the defaults are used as is.
    url: Option<Url>,
}

impl Api {
    #[must_use]
    pub const fn new(client: Client, url: Option<Url>) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Provider for Api {
    type Output = UtilityPrices;

    fn name(&self) -> &'static str {
        "utilities"
    }

    #[instrument(skip_all)]
    async fn fetch(&self) -> Result<UtilityPrices> {
        let Some(url) = &self.url else {
            debug!("no config URL, using the defaults");
            return Ok(UtilityPrices::default());
        };
        info!(%url, "fetching…");
        let document = self
            .client
            .get(url.clone())
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?
            .json::<Document>()
            .await
            .context("failed to deserialize the document")?;
        Ok(document.into())
    }
}

#[derive(Deserialize)]
struct Document {
    #[serde(rename = "lastUpdated")]
    last_updated: Option<NaiveDate>,

    #[serde(default)]
    gas: Option<Priced>,

    #[serde(default)]
    water: Option<Priced>,

    /// Suppliers keyed by their slug.
    #[serde(default)]
    fjernvarme: BTreeMap<String, DistrictHeatingSupplier>,
}

#[derive(Deserialize)]
struct Priced {
    price: f64,
}

#[derive(Deserialize)]
struct DistrictHeatingSupplier {
    name: Option<String>,
    prices: DistrictHeatingPrices,
}

#[derive(Deserialize)]
struct DistrictHeatingPrices {
    #[serde(rename = "variablePris")]
    variable: f64,
}

impl From<Document> for UtilityPrices {
    fn from(document: Document) -> Self {
        let defaults = Self::default();
        let supplier = document.fjernvarme.into_iter().next();
        Self {
            gas: document.gas.map_or(defaults.gas, |gas| CubicMetrePrice(gas.price)),
            water: document.water.map_or(defaults.water, |water| CubicMetrePrice(water.price)),
            district_heating: supplier
                .as_ref()
                .map_or(defaults.district_heating, |(_, supplier)| {
                    MegawattHourRate(supplier.prices.variable)
                }),
            district_heating_supplier: supplier
                .map(|(slug, supplier)| supplier.name.unwrap_or(slug)),
            updated_on: document.last_updated,
        }
    }
}
