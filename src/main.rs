#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cache;
mod calendar;
mod cli;
mod dashboard;
mod forecast;
mod i18n;
mod ingestion;
mod interval;
mod preferences;
mod prelude;
mod quantity;
mod region;
mod series;
mod snapshot;
mod tables;
mod tariff;

use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Show(show_args) => {
            cli::show(*show_args, &args.storage).await?;
        }
        Command::Watch(watch_args) => {
            cli::watch(*watch_args, &args.storage).await?;
        }
        Command::Prefs(prefs_args) => {
            cli::prefs(&prefs_args, &args.storage)?;
        }
    }

    info!("done!");
    Ok(())
}
