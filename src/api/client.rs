use std::time::Duration;

use reqwest::Client;

use crate::prelude::*;

/// Build the client shared by all the APIs.
pub fn try_new(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
