use std::time::Duration;

use clap::Parser;
use reqwest::{Client, Url};

use crate::{
    api::{client, energi_data, fuel, utilities},
    prelude::*,
};

#[derive(Parser)]
pub struct ApiArgs {
    #[clap(
        long = "energi-data-url",
        env = "ENERGI_DATA_URL",
        default_value = energi_data::Api::DEFAULT_BASE_URL
    )]
    pub energi_data_url: Url,

    #[clap(long = "fuel-url", env = "FUEL_URL", default_value = fuel::Api::DEFAULT_URL)]
    pub fuel_url: Url,

    /// CORS proxy to retry the fuel prices through, the target is passed in the `url` parameter.
    #[clap(long = "fuel-proxy-url", env = "FUEL_PROXY_URL")]
    pub fuel_proxy_url: Option<Url>,

    /// OK facility to read the pump prices from.
    #[clap(
        long = "fuel-facility-number",
        env = "FUEL_FACILITY_NUMBER",
        default_value_t = fuel::Api::DEFAULT_FACILITY_NUMBER
    )]
    pub fuel_facility_number: u32,

    /// Static `prices.json` with gas, water, and district heating prices.
    #[clap(long = "utilities-url", env = "UTILITIES_URL")]
    pub utilities_url: Option<Url>,

    #[clap(long = "http-timeout-secs", env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,
}

impl ApiArgs {
    pub fn new_client(&self) -> Result<Client> {
        client::try_new(Duration::from_secs(self.http_timeout_secs))
    }

    pub fn energi_data(&self, client: Client) -> energi_data::Api {
        energi_data::Api::new(client, self.energi_data_url.clone())
    }

    pub fn fuel(&self, client: Client) -> fuel::Api {
        fuel::Api::new(
            client,
            self.fuel_url.clone(),
            self.fuel_proxy_url.clone(),
            self.fuel_facility_number,
        )
    }

    pub fn utilities(&self, client: Client) -> utilities::Api {
        utilities::Api::new(client, self.utilities_url.clone())
    }
}
