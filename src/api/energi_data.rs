//! [Energi Data Service](https://www.energidataservice.dk) day-ahead spot prices.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_with::serde_as;

use crate::{
    prelude::*,
    quantity::rate::{KilowattHourRate, MegawattHourRate},
    region::Region,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Dataset {
    /// Quarter-hourly prices of the current market.
    DayAheadPrices,

    /// Hourly prices with the legacy field names.
    Elspotprices,
}

impl Dataset {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DayAheadPrices => "DayAheadPrices",
            Self::Elspotprices => "Elspotprices",
        }
    }

    #[must_use]
    pub const fn resolution(self) -> TimeDelta {
        match self {
            Self::DayAheadPrices => TimeDelta::minutes(15),
            Self::Elspotprices => TimeDelta::hours(1),
        }
    }

    const fn time_field(self) -> &'static str {
        match self {
            Self::DayAheadPrices => "TimeUTC",
            Self::Elspotprices => "HourUTC",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Window {
    /// Danish calendar dates, end exclusive.
    Dates { start: NaiveDate, end: NaiveDate },

    /// Most recent records regardless of the date.
    Latest { limit: usize },
}

/// Spot price excluding VAT, converted to the display unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpotPrice {
    pub start: DateTime<Utc>,
    pub price: KilowattHourRate,
}

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.energidataservice.dk/dataset";

    /// Danish kroner per euro, used when a record lacks the DKK price.
    pub const EUR_TO_DKK: f64 = 7.45;

    #[must_use]
    pub const fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Fetch the spot prices in ascending time order.
    #[instrument(skip_all, fields(dataset = dataset.name(), region = %region, window = ?window))]
    pub async fn get_spot_prices(
        &self,
        dataset: Dataset,
        region: Region,
        window: Window,
    ) -> Result<Vec<SpotPrice>> {
        info!("fetching…");
        let response = self
            .client
            .get(self.build_url(dataset, region, window)?)
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?;
        let mut prices: Vec<SpotPrice> = match dataset {
            Dataset::DayAheadPrices => response
                .json::<Response<DayAheadRecord>>()
                .await
                .context("failed to deserialize the response")?
                .records
                .into_iter()
                .filter_map(DayAheadRecord::into_spot_price)
                .collect(),
            Dataset::Elspotprices => response
                .json::<Response<ElspotRecord>>()
                .await
                .context("failed to deserialize the response")?
                .records
                .into_iter()
                .filter_map(ElspotRecord::into_spot_price)
                .collect(),
        };
        prices.sort_by_key(|price| price.start);
        info!(n_prices = prices.len(), "fetched");
        Ok(prices)
    }

    fn build_url(&self, dataset: Dataset, region: Region, window: Window) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("invalid base URL"))?
            .pop_if_empty()
            .push(dataset.name());
        let filter = serde_json::json!({ "PriceArea": [region.code()] }).to_string();
        {
            let mut query = url.query_pairs_mut();
            match window {
                Window::Dates { start, end } => {
                    query
                        .append_pair("start", &start.format("%Y-%m-%d").to_string())
                        .append_pair("end", &end.format("%Y-%m-%d").to_string())
                        .append_pair("filter", &filter)
                        .append_pair("sort", &format!("{} asc", dataset.time_field()))
                        .append_pair("limit", "0");
                }
                Window::Latest { limit } => {
                    query
                        .append_pair("filter", &filter)
                        .append_pair("sort", &format!("{} desc", dataset.time_field()))
                        .append_pair("limit", &limit.to_string());
                }
            }
        }
        Ok(url)
    }
}

#[serde_as]
#[derive(Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
struct Response<R> {
    #[serde_as(as = "serde_with::VecSkipError<_>")]
    records: Vec<R>,
}

#[derive(Deserialize)]
struct DayAheadRecord {
    #[serde(rename = "TimeUTC")]
    time_utc: NaiveDateTime,

    #[serde(rename = "DayAheadPriceDKK")]
    price_dkk: Option<f64>,

    #[serde(rename = "DayAheadPriceEUR")]
    price_eur: Option<f64>,
}

impl DayAheadRecord {
    fn into_spot_price(self) -> Option<SpotPrice> {
        spot_price(self.time_utc, self.price_dkk, self.price_eur)
    }
}

#[derive(Deserialize)]
struct ElspotRecord {
    #[serde(rename = "HourUTC")]
    hour_utc: NaiveDateTime,

    #[serde(rename = "SpotPriceDKK")]
    price_dkk: Option<f64>,

    #[serde(rename = "SpotPriceEUR")]
    price_eur: Option<f64>,
}

impl ElspotRecord {
    fn into_spot_price(self) -> Option<SpotPrice> {
        spot_price(self.hour_utc, self.price_dkk, self.price_eur)
    }
}

fn spot_price(start: NaiveDateTime, dkk: Option<f64>, eur: Option<f64>) -> Option<SpotPrice> {
    let Some(per_megawatt_hour) = dkk.or_else(|| eur.map(|eur| eur * Api::EUR_TO_DKK)) else {
        warn!(%start, "skipped the record without a price");
        return None;
    };
    Some(SpotPrice { start: start.and_utc(), price: MegawattHourRate(per_megawatt_hour).into() })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;
    use mockito::{Matcher, Server};

    use super::*;
    use crate::api::client;

    fn api(base_url: &str) -> Result<Api> {
        Ok(Api::new(client::try_new(std::time::Duration::from_secs(5))?, base_url.parse()?))
    }

    #[test]
    fn test_build_url_dates() -> Result {
        let window = Window::Dates {
            start: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 10, 17).unwrap(),
        };
        let url = api(Api::DEFAULT_BASE_URL)?.build_url(Dataset::DayAheadPrices, Region::Dk2, window)?;
        assert_eq!(url.path(), "/dataset/DayAheadPrices");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [
                ("start".to_string(), "2025-10-15".to_string()),
                ("end".to_string(), "2025-10-17".to_string()),
                ("filter".to_string(), r#"{"PriceArea":["DK2"]}"#.to_string()),
                ("sort".to_string(), "TimeUTC asc".to_string()),
                ("limit".to_string(), "0".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_build_url_latest_legacy() -> Result {
        let url = api("https://example.com/")?.build_url(
            Dataset::Elspotprices,
            Region::Dk1,
            Window::Latest { limit: 48 },
        )?;
        assert_eq!(url.path(), "/Elspotprices");
        assert!(url.query_pairs().any(|(key, value)| key == "sort" && value == "HourUTC desc"));
        assert!(url.query_pairs().any(|(key, value)| key == "limit" && value == "48"));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_day_ahead_prices_ok() -> Result {
        let mut server = Server::new_async().await;
        // language=JSON
        let body = r#"
            {
                "total": 3,
                "records": [
                    { "TimeUTC": "2025-10-15T10:15:00", "TimeDK": "2025-10-15T12:15:00", "PriceArea": "DK1", "DayAheadPriceDKK": 812.5, "DayAheadPriceEUR": 109.06 },
                    { "TimeUTC": "2025-10-15T10:00:00", "TimeDK": "2025-10-15T12:00:00", "PriceArea": "DK1", "DayAheadPriceDKK": null, "DayAheadPriceEUR": 100.0 },
                    { "TimeUTC": "garbage", "PriceArea": "DK1", "DayAheadPriceDKK": 1.0 },
                    { "TimeUTC": "2025-10-15T10:30:00", "PriceArea": "DK1", "DayAheadPriceDKK": null, "DayAheadPriceEUR": null }
                ]
            }
        "#;
        let mock = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::UrlEncoded("sort".into(), "TimeUTC desc".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let prices = api(&server.url())?
            .get_spot_prices(Dataset::DayAheadPrices, Region::Dk1, Window::Latest { limit: 4 })
            .await?;
        mock.assert_async().await;

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].start, Utc.with_ymd_and_hms(2025, 10, 15, 10, 0, 0).unwrap());
        assert_abs_diff_eq!(prices[0].price.0, 0.745);
        assert_eq!(prices[1].start, Utc.with_ymd_and_hms(2025, 10, 15, 10, 15, 0).unwrap());
        assert_abs_diff_eq!(prices[1].price.0, 0.8125);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_spot_prices_server_error() -> Result {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/Elspotprices")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let window = Window::Latest { limit: 1 };
        let result =
            api(&server.url())?.get_spot_prices(Dataset::Elspotprices, Region::Dk1, window).await;
        assert!(result.is_err());
        Ok(())
    }
}
