//! Spot price series with the tariffs applied, assembled from whichever source answers.

use bon::Builder;
use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    api::energi_data::{Api, Dataset, SpotPrice, Window},
    calendar,
    interval::Interval,
    prelude::*,
    region::Region,
    series::{self, PricePoint},
    tariff::PricingStrategy,
};

/// Today and tomorrow, split by the Danish calendar.
#[derive(Clone, Debug, Default)]
pub struct Upcoming {
    pub today: Vec<PricePoint>,
    pub tomorrow: Vec<PricePoint>,
    pub current: Option<PricePoint>,
}

#[derive(Builder)]
pub struct Ingestion {
    api: Api,
    pricing: Box<dyn PricingStrategy>,

    /// Two days of quarter-hourly prices.
    #[builder(default = 192)]
    latest_limit: usize,
}

impl Ingestion {
    pub const HISTORY_DAYS: i64 = 7;

    /// Fetch today's and tomorrow's prices, falling back to older sources in turn.
    ///
    /// Never fails: when every source is exhausted, the series are empty.
    #[instrument(skip_all, fields(region = %region))]
    pub async fn fetch_upcoming(&self, region: Region, now: DateTime<Utc>) -> Upcoming {
        let today = calendar::local_date(now);
        let dates = Window::Dates { start: today, end: calendar::next_day(calendar::next_day(today)) };
        let sources = [
            (Dataset::DayAheadPrices, dates),
            (Dataset::DayAheadPrices, Window::Latest { limit: self.latest_limit }),
            (Dataset::Elspotprices, dates),
        ];

        let mut points = Vec::new();
        for (dataset, window) in sources {
            match self.fetch_points(dataset, region, window).await {
                Ok(fetched) => {
                    points = fetched;
                    break;
                }
                Err(error) => {
                    warn!(dataset = dataset.name(), ?window, "falling back: {error:#}");
                }
            }
        }
        if points.is_empty() {
            error!("all the price sources failed");
        }

        let (today, tomorrow) = series::split_days(&points, now);
        let current = series::current(&points, now);
        Upcoming { today, tomorrow, current }
    }

    /// Fetch the last week of prices for the history view.
    ///
    /// There is no fallback: any failure leaves the history empty.
    #[instrument(skip_all, fields(region = %region))]
    pub async fn fetch_history(&self, region: Region, now: DateTime<Utc>) -> Vec<PricePoint> {
        let window = Window::Dates {
            start: calendar::local_date(now - TimeDelta::days(Self::HISTORY_DAYS)),
            end: calendar::next_day(calendar::local_date(now)),
        };
        match self.fetch_points(Dataset::DayAheadPrices, region, window).await {
            Ok(points) => points.into_iter().filter(|point| point.start() <= now).collect(),
            Err(error) => {
                warn!("no history: {error:#}");
                Vec::new()
            }
        }
    }

    async fn fetch_points(
        &self,
        dataset: Dataset,
        region: Region,
        window: Window,
    ) -> Result<Vec<PricePoint>> {
        let prices = self.api.get_spot_prices(dataset, region, window).await?;
        ensure!(!prices.is_empty(), "no prices returned");
        Ok(prices
            .into_iter()
            .map(|SpotPrice { start, price }| {
                let interval = Interval::starting_at(start, dataset.resolution());
                PricePoint::priced(interval, price, region, self.pricing.as_ref())
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;
    use mockito::{Matcher, Server, ServerGuard};

    use super::*;
    use crate::{
        api::client,
        tariff::{Pricing, Tariffs},
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 15, 10, 5, 0).unwrap()
    }

    fn ingestion(server: &ServerGuard, pricing: Pricing) -> Result<Ingestion> {
        let api = Api::new(client::try_new(Duration::from_secs(5))?, server.url().parse()?);
        Ok(Ingestion::builder().api(api).pricing(pricing.into_strategy(Tariffs::default())).build())
    }

    const EMPTY: &str = r#"{ "total": 0, "records": [] }"#;

    #[tokio::test]
    async fn test_primary_window() -> Result {
        let mut server = Server::new_async().await;
        // language=JSON
        let body = r#"
            {
                "records": [
                    { "TimeUTC": "2025-10-15T10:00:00", "DayAheadPriceDKK": 400.0 },
                    { "TimeUTC": "2025-10-15T10:15:00", "DayAheadPriceDKK": 500.0 },
                    { "TimeUTC": "2025-10-15T22:00:00", "DayAheadPriceDKK": 600.0 }
                ]
            }
        "#;
        let primary = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("start".into(), "2025-10-15".into()),
                Matcher::UrlEncoded("end".into(), "2025-10-17".into()),
                Matcher::UrlEncoded("sort".into(), "TimeUTC asc".into()),
            ]))
            .with_body(body)
            .create_async()
            .await;

        let upcoming = ingestion(&server, Pricing::Flat)?.fetch_upcoming(Region::Dk1, now()).await;
        primary.assert_async().await;

        assert_eq!(upcoming.today.len(), 2);
        assert_eq!(upcoming.tomorrow.len(), 1);
        let current = upcoming.current.unwrap();
        assert_eq!(current.start(), Utc.with_ymd_and_hms(2025, 10, 15, 10, 0, 0).unwrap());
        assert_abs_diff_eq!(current.total.0, 0.4);
        assert_eq!(current.interval.end - current.start(), TimeDelta::minutes(15));
        Ok(())
    }

    #[tokio::test]
    async fn test_current_is_latest_available_point() -> Result {
        let mut server = Server::new_async().await;
        // language=JSON
        let body = r#"
            {
                "records": [
                    { "TimeUTC": "2025-10-15T06:00:00", "DayAheadPriceDKK": 400.0 },
                    { "TimeUTC": "2025-10-15T22:00:00", "DayAheadPriceDKK": 600.0 }
                ]
            }
        "#;
        let _primary = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::UrlEncoded("sort".into(), "TimeUTC asc".into()))
            .with_body(body)
            .create_async()
            .await;

        let upcoming = ingestion(&server, Pricing::Flat)?.fetch_upcoming(Region::Dk1, now()).await;
        assert_eq!(upcoming.today.len(), 1);
        assert_eq!(upcoming.tomorrow.len(), 1);
        assert_eq!(upcoming.current, Some(upcoming.tomorrow[0]));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_window_falls_back_to_latest() -> Result {
        let mut server = Server::new_async().await;
        let _primary = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::UrlEncoded("sort".into(), "TimeUTC asc".into()))
            .with_body(EMPTY)
            .create_async()
            .await;
        // language=JSON
        let body = r#"
            {
                "records": [
                    { "TimeUTC": "2025-10-15T10:15:00", "DayAheadPriceDKK": 500.0 },
                    { "TimeUTC": "2025-10-15T10:00:00", "DayAheadPriceDKK": 400.0 }
                ]
            }
        "#;
        let latest = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sort".into(), "TimeUTC desc".into()),
                Matcher::UrlEncoded("limit".into(), "192".into()),
            ]))
            .with_body(body)
            .create_async()
            .await;

        let upcoming = ingestion(&server, Pricing::Flat)?.fetch_upcoming(Region::Dk1, now()).await;
        latest.assert_async().await;

        assert_eq!(upcoming.today.len(), 2);
        assert!(upcoming.today[0].start() < upcoming.today[1].start());
        assert_abs_diff_eq!(upcoming.current.unwrap().total.0, 0.4);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() -> Result {
        let mut server = Server::new_async().await;
        let _primary = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::UrlEncoded("sort".into(), "TimeUTC asc".into()))
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;
        let _latest = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::UrlEncoded("sort".into(), "TimeUTC desc".into()))
            .with_body(r#"{ "records": [{ "TimeUTC": "2025-10-15T10:00:00", "DayAheadPriceDKK": 400.0 }] }"#)
            .create_async()
            .await;

        let upcoming = ingestion(&server, Pricing::Flat)?.fetch_upcoming(Region::Dk1, now()).await;
        assert_eq!(upcoming.today.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_legacy_dataset_fallback() -> Result {
        let mut server = Server::new_async().await;
        let _day_ahead = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(2)
            .create_async()
            .await;
        // language=JSON
        let body = r#"
            {
                "records": [
                    { "HourUTC": "2025-10-15T10:00:00", "HourDK": "2025-10-15T12:00:00", "PriceArea": "DK2", "SpotPriceDKK": 500.0, "SpotPriceEUR": 67.11 }
                ]
            }
        "#;
        let legacy = server
            .mock("GET", "/Elspotprices")
            .match_query(Matcher::UrlEncoded("sort".into(), "HourUTC asc".into()))
            .with_body(body)
            .create_async()
            .await;

        let upcoming = ingestion(&server, Pricing::Tariffs)?.fetch_upcoming(Region::Dk2, now()).await;
        legacy.assert_async().await;

        assert_eq!(upcoming.today.len(), 1);
        let point = upcoming.today[0];
        assert_eq!(point.interval.end - point.start(), TimeDelta::hours(1));
        assert_abs_diff_eq!(point.spot.0, 0.5);
        assert_abs_diff_eq!(point.total.0, 1.449_275, epsilon = 1e-9);
        assert_eq!(upcoming.current, Some(point));
        Ok(())
    }

    #[tokio::test]
    async fn test_all_sources_fail() -> Result {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let upcoming = ingestion(&server, Pricing::Tariffs)?.fetch_upcoming(Region::Dk1, now()).await;
        assert!(upcoming.today.is_empty());
        assert!(upcoming.tomorrow.is_empty());
        assert!(upcoming.current.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_history_failure_is_empty() -> Result {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/DayAheadPrices")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let history = ingestion(&server, Pricing::Tariffs)?.fetch_history(Region::Dk1, now()).await;
        assert!(history.is_empty());
        Ok(())
    }
}
