use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    api::{fuel::FuelPrices, utilities::UtilityPrices},
    calendar,
    forecast::{Alert, BestWorst, Forecast, PriceClass, Summary, Trend},
    i18n::{Language, Text},
    quantity::rate::KilowattHourRate,
    series::{DailyAggregate, PricePoint},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn rate_cell(rate: KilowattHourRate) -> Cell {
    Cell::new(format!("{rate:.3}")).set_alignment(CellAlignment::Right).fg(PriceClass::of(rate).color())
}

const fn trend_symbol(trend: Trend) -> &'static str {
    match trend {
        Trend::Rising => "↑",
        Trend::Falling => "↓",
        Trend::Stable => "→",
    }
}

/// Price intervals with the spot and grid components, the current one highlighted.
#[must_use]
pub fn build_prices_table(
    points: &[PricePoint],
    current: Option<&PricePoint>,
    language: Language,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        language.get(Text::Time),
        language.get(Text::SpotPrice),
        language.get(Text::GridCost),
        language.get(Text::Total),
    ]);
    for point in points {
        let is_current = current.is_some_and(|current| current.interval == point.interval);
        let start = calendar::local(point.start());
        let mut time = Cell::new(format!(
            "{}{}",
            start.format("%a %H:%M"),
            if is_current { " ◀" } else { "" }
        ));
        if is_current {
            time = time.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            time,
            Cell::new(format!("{:.3}", point.spot))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(format!("{:.3}", point.grid))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            rate_cell(point.total),
        ]);
    }
    table
}

/// Color legend for the price tables.
#[must_use]
pub fn build_legend_table(language: Language) -> Table {
    let mut table = new_table();
    table.add_row(
        PriceClass::ALL
            .into_iter()
            .map(|class| Cell::new(language.get(class.text())).fg(class.color()))
            .collect::<Vec<_>>(),
    );
    table
}

#[must_use]
pub fn build_summary_table(
    summary: Option<Summary>,
    current: Option<&PricePoint>,
    next_step: Trend,
    language: Language,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        language.get(Text::Electricity),
        language.get(Text::TodayMin),
        language.get(Text::TodayMax),
        language.get(Text::Average),
        language.get(Text::NextStep),
    ]);
    let missing = || Cell::new("-").set_alignment(CellAlignment::Right);
    table.add_row(vec![
        current.map_or_else(missing, |current| {
            let class = PriceClass::of(current.total);
            Cell::new(format!("{:.3} · {}", current.total, language.get(class.text())))
                .set_alignment(CellAlignment::Right)
                .fg(class.color())
                .add_attribute(Attribute::Bold)
        }),
        summary.map_or_else(missing, |summary| rate_cell(summary.min)),
        summary.map_or_else(missing, |summary| rate_cell(summary.max)),
        summary.map_or_else(missing, |summary| rate_cell(summary.average)),
        Cell::new(trend_symbol(next_step)).set_alignment(CellAlignment::Center).fg(match next_step {
            Trend::Rising => Color::Red,
            Trend::Falling => Color::Green,
            Trend::Stable => Color::Reset,
        }),
    ]);
    table
}

#[must_use]
pub fn build_best_worst_table(best_worst: &BestWorst, language: Language) -> Table {
    let mut table = new_table();
    table.set_header(vec![language.get(Text::BestHours), language.get(Text::WorstHours)]);
    let format_point = |point: &PricePoint| {
        format!("{}  {:.3}", calendar::local(point.start()).format("%a %H:%M"), point.total)
    };
    for index in 0..BestWorst::N_POINTS {
        let best = best_worst.best.get(index);
        let worst = best_worst.worst.get(index);
        if best.is_none() && worst.is_none() {
            break;
        }
        table.add_row(vec![
            best.map_or_else(|| Cell::new(""), |point| {
                Cell::new(format_point(point)).fg(PriceClass::of(point.total).color())
            }),
            worst.map_or_else(|| Cell::new(""), |point| {
                Cell::new(format_point(point)).fg(PriceClass::of(point.total).color())
            }),
        ]);
    }
    table
}

#[must_use]
pub fn build_history_table(days: &[DailyAggregate], language: Language) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        language.get(Text::Date),
        language.get(Text::Average),
        language.get(Text::Min),
        language.get(Text::Max),
    ]);
    for day in days {
        table.add_row(vec![
            Cell::new(day.date.format("%a %Y-%m-%d")),
            rate_cell(day.average).add_attribute(Attribute::Bold),
            rate_cell(day.min),
            rate_cell(day.max),
        ]);
    }
    table
}

/// Sparse week overview: every downsampled point as a bar.
#[must_use]
pub fn build_week_table(points: &[PricePoint], language: Language) -> Table {
    const BAR_WIDTH: f64 = 30.0;

    let mut table = new_table();
    table.set_header(vec![language.get(Text::Week), language.get(Text::Total), ""]);
    let max = points.iter().map(|point| point.total).max().unwrap_or(KilowattHourRate::ZERO);
    for point in points {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = if max > KilowattHourRate::ZERO {
            (point.total.0.max(0.0) / max.0 * BAR_WIDTH).round() as usize
        } else {
            0
        };
        table.add_row(vec![
            Cell::new(calendar::local(point.start()).format("%a %H:%M")),
            rate_cell(point.total),
            Cell::new("█".repeat(width)).fg(PriceClass::of(point.total).color()),
        ]);
    }
    table
}

#[must_use]
pub fn build_other_prices_table(
    fuel: &FuelPrices,
    utilities: &UtilityPrices,
    language: Language,
) -> Table {
    let mut table = new_table();
    let district_heating = utilities.district_heating_supplier.as_ref().map_or_else(
        || language.get(Text::DistrictHeating).to_string(),
        |supplier| format!("{} ({supplier})", language.get(Text::DistrictHeating)),
    );
    let rows: [(String, String); 5] = [
        (language.get(Text::Petrol).to_string(), fuel.petrol.to_string()),
        (language.get(Text::Diesel).to_string(), fuel.diesel.to_string()),
        (language.get(Text::NaturalGas).to_string(), utilities.gas.to_string()),
        (language.get(Text::Water).to_string(), utilities.water.to_string()),
        (
            district_heating,
            format!(
                "{:.0} ({:.2})",
                utilities.district_heating,
                district_heating_per_kilowatt_hour(utilities)
            ),
        ),
    ];
    for (name, price) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(price).set_alignment(CellAlignment::Right)]);
    }
    if let Some(updated_on) = utilities.updated_on {
        let updated = language.format(Text::Updated, &[("time", updated_on.to_string().as_str())]);
        table.add_row(vec![Cell::new(updated).add_attribute(Attribute::Dim), Cell::new("")]);
    }
    table
}

/// District heating per kilowatt-hour, for comparing with electricity.
#[must_use]
pub fn district_heating_per_kilowatt_hour(utilities: &UtilityPrices) -> KilowattHourRate {
    utilities.district_heating.into()
}

#[must_use]
pub fn forecast_message(forecast: Forecast, language: Language) -> String {
    match forecast {
        Forecast::Unavailable => language.get(Text::Unable).to_string(),
        Forecast::Waiting => language.get(Text::Waiting).to_string(),
        Forecast::Trend { trend, current, upcoming_average } => {
            let text = match trend {
                Trend::Rising => Text::Rising,
                Trend::Falling => Text::Falling,
                Trend::Stable => Text::Stable,
            };
            language.format(
                text,
                &[
                    ("current", format!("{:.2}", current.0).as_str()),
                    ("avg", format!("{:.2}", upcoming_average.0).as_str()),
                ],
            )
        }
    }
}

/// Title and body of the notification.
#[must_use]
pub fn alert_message(alert: Alert, language: Language) -> (&'static str, String) {
    let (title, body, price) = match alert {
        Alert::HighPrice(price) => (Text::HighPriceTitle, Text::HighPriceBody, price),
        Alert::LowPrice(price) => (Text::LowPriceTitle, Text::LowPriceBody, price),
    };
    (language.get(title), language.format(body, &[("price", format!("{:.2}", price.0).as_str())]))
}
