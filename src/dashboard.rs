//! Owner of the displayed snapshot: refreshes it, renders it, and keeps it fresh in watch mode.

use std::{
    io::{self, BufRead, BufReader},
    thread,
    time::Duration,
};

use bon::Builder;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use tokio::{
    pin,
    select,
    signal,
    sync::mpsc::{self, error::TrySendError},
    time::{self, MissedTickBehavior},
};

use crate::{
    api::{fuel, provider::Provider, utilities},
    cache::Cache,
    calendar,
    forecast::{Alert, BestWorst, Forecast, Summary, Trend},
    i18n::{Language, Text},
    ingestion::Ingestion,
    prelude::*,
    region::Region,
    series::{self, DailyAggregate},
    snapshot::Snapshot,
    tables::{
        alert_message,
        build_best_worst_table,
        build_history_table,
        build_legend_table,
        build_other_prices_table,
        build_prices_table,
        build_summary_table,
        build_week_table,
        forecast_message,
    },
};

#[derive(Builder)]
pub struct Dashboard {
    region: Region,
    language: Language,
    ingestion: Ingestion,
    fuel: fuel::Api,
    utilities: utilities::Api,
    cache: Cache,

    /// Include the downsampled week in the output.
    #[builder(default)]
    show_week: bool,

    #[builder(skip)]
    snapshot: Snapshot,
}

impl Dashboard {
    /// Every fourth point of the week, hourly for the quarter-hourly dataset.
    pub const WEEK_STEP: usize = 4;

    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Take the cached snapshot if it is fresh and for the same region.
    pub fn restore(&mut self, now: DateTime<Utc>) -> bool {
        match self.cache.load(now) {
            Some(snapshot) if snapshot.region == self.region => {
                self.snapshot = snapshot;
                true
            }
            Some(snapshot) => {
                info!(cached = %snapshot.region, requested = %self.region, "ignoring the cache for another region");
                false
            }
            None => false,
        }
    }

    /// Fetch everything and replace the snapshot.
    pub async fn refresh(&mut self) -> Option<Alert> {
        let now = Utc::now();
        let snapshot = self.fetch(now).await;
        self.replace(snapshot, now)
    }

    /// Build a new snapshot without touching the current one.
    #[instrument(skip_all, fields(region = %self.region))]
    pub async fn fetch(&self, now: DateTime<Utc>) -> Snapshot {
        info!("refreshing…");
        let (upcoming, history, fuel, utilities) = tokio::join!(
            self.ingestion.fetch_upcoming(self.region, now),
            self.ingestion.fetch_history(self.region, now),
            self.fuel.fetch_or_default(),
            self.utilities.fetch_or_default(),
        );
        info!(
            n_today = upcoming.today.len(),
            n_tomorrow = upcoming.tomorrow.len(),
            n_history = history.len(),
            "refreshed"
        );
        Snapshot {
            region: self.region,
            fetched_at: Some(now),
            current: upcoming.current,
            today: upcoming.today,
            tomorrow: upcoming.tomorrow,
            history,
            fuel,
            utilities,
        }
    }

    /// Swap in the new snapshot and report a crossed price threshold, if any.
    pub fn replace(&mut self, snapshot: Snapshot, now: DateTime<Utc>) -> Option<Alert> {
        let alert = Alert::detect(
            self.snapshot.current.map(|point| point.total),
            snapshot.current.map(|point| point.total),
        );
        if snapshot.is_empty() {
            warn!("not caching an empty snapshot");
        } else {
            self.cache.store(&snapshot, now);
        }
        self.snapshot = snapshot;
        alert
    }

    #[must_use]
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let language = self.language;
        let snapshot = &self.snapshot;
        let mut sections = Vec::new();

        let mut header = format!("{} · {}", language.get(Text::Title), snapshot.region);
        if let Some(fetched_at) = snapshot.fetched_at {
            let time = calendar::local(fetched_at).format("%Y-%m-%d %H:%M").to_string();
            header.push_str(" · ");
            header.push_str(&language.format(Text::Updated, &[("time", time.as_str())]));
        }
        sections.push(header);
        sections.push(language.get(Text::ElectricitySubtitle).to_string());

        let current = snapshot.current.as_ref();
        let summary = Summary::of(&snapshot.today);
        let next_step = Trend::next_step(&snapshot.today, now);
        sections.push(build_summary_table(summary, current, next_step, language).to_string());

        let upcoming = snapshot.upcoming().copied().collect_vec();
        let forecast = Forecast::new(&upcoming, current.map(|point| point.total), now);
        sections.push(String::new());
        sections.push(language.get(Text::ForecastTitle).to_string());
        sections.push(forecast_message(forecast, language));

        for (title, points) in [(Text::Today, &snapshot.today), (Text::Tomorrow, &snapshot.tomorrow)] {
            if !points.is_empty() {
                sections.push(String::new());
                sections.push(language.get(title).to_string());
                sections.push(build_prices_table(points, current, language).to_string());
            }
        }
        if !upcoming.is_empty() {
            sections.push(build_legend_table(language).to_string());
            sections.push(build_best_worst_table(&BestWorst::of(&upcoming), language).to_string());
        }

        if !snapshot.history.is_empty() {
            sections.push(String::new());
            sections.push(language.get(Text::HistoryTitle).to_string());
            let days = DailyAggregate::from_series(&snapshot.history);
            sections.push(build_history_table(&days, language).to_string());
            if self.show_week {
                let week = series::downsample(&snapshot.history, Self::WEEK_STEP);
                sections.push(build_week_table(&week, language).to_string());
            }
        }

        sections.push(build_other_prices_table(&snapshot.fuel, &snapshot.utilities, language).to_string());
        sections.join("\n")
    }

    fn notify(&self, alert: Option<Alert>) {
        if let Some(alert) = alert {
            let (title, body) = alert_message(alert, self.language);
            warn!(?alert, "price alert");
            println!("{title}\n{body}");
        }
    }

    /// Refresh periodically and on every line from the standard input, until Ctrl+C.
    pub async fn watch(&mut self, period: Duration) -> Result {
        let (trigger_sender, triggers) = mpsc::channel(1);
        spawn_trigger_reader(BufReader::new(io::stdin()), trigger_sender)?;
        self.run(period, triggers, signal::ctrl_c()).await
    }

    /// Refresh on ticks and triggers until `shutdown` resolves.
    ///
    /// Triggers that arrive while a refresh is running are dropped, so refreshes never overlap.
    async fn run(
        &mut self,
        period: Duration,
        mut triggers: mpsc::Receiver<()>,
        shutdown: impl Future<Output = std::io::Result<()>>,
    ) -> Result {
        pin!(shutdown);
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        if self.restore(Utc::now()) {
            println!("{}", self.render(Utc::now()));
            ticker.reset();
        }

        loop {
            select! {
                _ = ticker.tick() => debug!("scheduled refresh"),
                Some(()) = triggers.recv() => info!("manual refresh"),
                result = &mut shutdown => {
                    result.context("failed to listen for Ctrl+C")?;
                    info!("stopping…");
                    return Ok(());
                }
            }

            let now = Utc::now();
            let snapshot = {
                let fetch = self.fetch(now);
                pin!(fetch);
                loop {
                    select! {
                        snapshot = &mut fetch => break snapshot,
                        Some(()) = triggers.recv() => warn!("a refresh is already running, ignoring the trigger"),
                        result = &mut shutdown => {
                            result.context("failed to listen for Ctrl+C")?;
                            info!("stopping…");
                            return Ok(());
                        }
                    }
                }
            };
            let alert = self.replace(snapshot, now);
            println!("{}", self.render(Utc::now()));
            self.notify(alert);
        }
    }

    /// Print the cached or freshly fetched snapshot once.
    pub async fn show(&mut self) {
        if !self.restore(Utc::now()) {
            let alert = self.refresh().await;
            self.notify(alert);
        }
        println!("{}", self.render(Utc::now()));
    }
}

/// Read the input on a plain thread, which is abandoned on exit.
fn spawn_trigger_reader(input: impl BufRead + Send + 'static, sender: mpsc::Sender<()>) -> Result {
    thread::Builder::new()
        .name("triggers".into())
        .spawn(move || read_triggers(input, &sender))
        .context("failed to spawn the input reader")?;
    Ok(())
}

/// Forward a trigger for each input line; keep at most one pending.
fn read_triggers(input: impl BufRead, sender: &mpsc::Sender<()>) {
    for line in input.lines() {
        if let Err(error) = line {
            warn!("failed to read the standard input: {error:#}");
            return;
        }
        match sender.try_send(()) {
            Ok(()) => {}
            Err(TrySendError::Full(())) => debug!("a trigger is already pending"),
            Err(TrySendError::Closed(())) => return,
        }
    }
    debug!("standard input closed, manual triggers are off");
}
