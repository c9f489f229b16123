//! [OK](https://www.ok.dk) fuel prices at the pump.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::{api::provider::Provider, prelude::*, quantity::volume::LitrePrice};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelPrices {
    pub petrol: LitrePrice,
    pub diesel: LitrePrice,
}

impl Default for FuelPrices {
    fn default() -> Self {
        Self { petrol: LitrePrice(14.29), diesel: LitrePrice(12.69) }
    }
}

pub struct Api {
    client: Client,
    url: Url,

    /// CORS proxy that takes the target in the `url` query parameter.
    proxy_url: Option<Url>,

    facility_number: u32,
}

impl Api {
    pub const DEFAULT_URL: &'static str = "https://mobility-prices.ok.dk/api/v1/fuel-prices";
    pub const DEFAULT_FACILITY_NUMBER: u32 = 27;

    const PETROL: &'static str = "Blyfri 95";
    const DIESEL: &'static str = "Svovlfri Diesel";

    #[must_use]
    pub const fn new(client: Client, url: Url, proxy_url: Option<Url>, facility_number: u32) -> Self {
        Self { client, url, proxy_url, facility_number }
    }

    async fn get_facilities(&self) -> Result<Vec<Facility>> {
        match self.get_facilities_from(self.url.clone()).await {
            Ok(facilities) => Ok(facilities),
            Err(error) => {
                let Some(proxy_url) = &self.proxy_url else {
                    return Err(error);
                };
                warn!("retrying through the proxy: {error:#}");
                let mut proxied = proxy_url.clone();
                proxied.query_pairs_mut().append_pair("url", self.url.as_str());
                self.get_facilities_from(proxied).await
            }
        }
    }

    async fn get_facilities_from(&self, url: Url) -> Result<Vec<Facility>> {
        Ok(self
            .client
            .get(url)
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?
            .json::<Response>()
            .await
            .context("failed to deserialize the response")?
            .items)
    }
}

#[async_trait]
impl Provider for Api {
    type Output = FuelPrices;

    fn name(&self) -> &'static str {
        "fuel"
    }

    #[instrument(skip_all, fields(facility_number = self.facility_number))]
    async fn fetch(&self) -> Result<FuelPrices> {
        info!("fetching…");
        let facilities = self.get_facilities().await?;
        let facility = facilities
            .iter()
            .find(|facility| facility.facility_number == self.facility_number)
            .or_else(|| facilities.first())
            .context("no facilities returned")?;
        if facility.facility_number != self.facility_number {
            warn!(fallback = facility.facility_number, "facility not found");
        }
        let defaults = FuelPrices::default();
        let prices = FuelPrices {
            petrol: facility.price_of(Self::PETROL).unwrap_or(defaults.petrol),
            diesel: facility.price_of(Self::DIESEL).unwrap_or(defaults.diesel),
        };
        info!(%prices.petrol, %prices.diesel, "fetched");
        Ok(prices)
    }
}

#[derive(Deserialize)]
struct Response {
    items: Vec<Facility>,
}

#[derive(Deserialize)]
struct Facility {
    facility_number: u32,

    #[serde(default)]
    prices: Vec<Product>,
}

impl Facility {
    fn price_of(&self, product_name: &str) -> Option<LitrePrice> {
        self.prices.iter().find(|product| product.product_name == product_name).map(|product| product.price)
    }
}

#[derive(Deserialize)]
struct Product {
    product_name: String,
    price: LitrePrice,
}
