//! English and Danish interface strings.

use std::env;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Da,
}

impl Language {
    /// Guess from the POSIX locale variables, Danish only when the locale says so.
    #[must_use]
    pub fn detect() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .into_iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty())
            .map_or_else(Self::default, |locale| Self::from_locale(&locale))
    }

    #[must_use]
    pub fn from_locale(locale: &str) -> Self {
        if locale.to_ascii_lowercase().starts_with("da") { Self::Da } else { Self::En }
    }

    #[must_use]
    pub const fn get(self, text: Text) -> &'static str {
        match self {
            Self::En => text.english(),
            Self::Da => text.danish(),
        }
    }

    /// Look up the template and replace each `{name}` with its value.
    #[must_use]
    pub fn format(self, text: Text, params: &[(&str, &str)]) -> String {
        params.iter().fold(self.get(text).to_string(), |template, (name, value)| {
            template.replace(&format!("{{{name}}}"), value)
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Text {
    Title,
    Electricity,
    ElectricitySubtitle,
    TodayMin,
    TodayMax,
    Average,
    Petrol,
    Diesel,
    NaturalGas,
    Water,
    DistrictHeating,
    Today,
    Tomorrow,
    Week,
    Time,
    SpotPrice,
    GridCost,
    Total,
    Cheap,
    Moderate,
    Expensive,
    ForecastTitle,
    BestHours,
    WorstHours,
    Waiting,
    Unable,
    Rising,
    Falling,
    Stable,
    NextStep,
    HistoryTitle,
    Date,
    Min,
    Max,
    Updated,
    HighPriceTitle,
    HighPriceBody,
    LowPriceTitle,
    LowPriceBody,
}

impl Text {
    const fn english(self) -> &'static str {
        match self {
            Self::Title => "🇩🇰 Energy Prices",
            Self::Electricity => "Electricity",
            Self::ElectricitySubtitle => "Spot price + Grid costs (incl. nettarif)",
            Self::TodayMin => "Today Min",
            Self::TodayMax => "Today Max",
            Self::Average => "Avg",
            Self::Petrol => "Benzin 95",
            Self::Diesel => "Diesel",
            Self::NaturalGas => "Natural Gas",
            Self::Water => "Water",
            Self::DistrictHeating => "Fjernvarme",
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::Week => "Week",
            Self::Time => "Time",
            Self::SpotPrice => "Spot Price",
            Self::GridCost => "Grid Cost (Net)",
            Self::Total => "Total",
            Self::Cheap => "Cheap (<1.5 DKK)",
            Self::Moderate => "Moderate (1.5-3 DKK)",
            Self::Expensive => "Expensive (>3 DKK)",
            Self::ForecastTitle => "🔮 Price Forecast",
            Self::BestHours => "Best Hours to Use Electricity",
            Self::WorstHours => "Avoid These Hours (Highest Prices)",
            Self::Waiting => "Waiting for tomorrow's prices...",
            Self::Unable => "Unable to load forecast data",
            Self::Rising => {
                "⚠️ Prices are expected to INCREASE in the next few hours. Current: {current} DKK → Average upcoming: {avg} DKK. Consider running high-consumption appliances now!"
            }
            Self::Falling => {
                "✅ Good news! Prices are expected to DECREASE. Current: {current} DKK → Average upcoming: {avg} DKK. Wait a bit for lower prices!"
            }
            Self::Stable => "ℹ️ Prices are stable. Current: {current} DKK → Average upcoming: {avg} DKK.",
            Self::NextStep => "Next",
            Self::HistoryTitle => "📈 Historical Trends",
            Self::Date => "Date",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Updated => "Updated: {time}",
            Self::HighPriceTitle => "⚡ High Electricity Price!",
            Self::HighPriceBody => {
                "Current price is {price} DKK/kWh, above 5 DKK. Consider reducing consumption."
            }
            Self::LowPriceTitle => "✅ Electricity Price Dropped!",
            Self::LowPriceBody => {
                "Price is now {price} DKK/kWh, below 3 DKK. Good time to use electricity!"
            }
        }
    }

    const fn danish(self) -> &'static str {
        match self {
            Self::Title => "🇩🇰 Energipriser",
            Self::Electricity => "Elektricitet",
            Self::ElectricitySubtitle => "Spotpris + Nettarif (inkl. afgifter)",
            Self::TodayMin => "I dag Min",
            Self::TodayMax => "I dag Maks",
            Self::Average => "Gns",
            Self::Petrol => "Benzin 95",
            Self::Diesel => "Diesel",
            Self::NaturalGas => "Naturgas",
            Self::Water => "Vand",
            Self::DistrictHeating => "Fjernvarme",
            Self::Today => "I dag",
            Self::Tomorrow => "I morgen",
            Self::Week => "Uge",
            Self::Time => "Tid",
            Self::SpotPrice => "Spotpris",
            Self::GridCost => "Nettarif",
            Self::Total => "I alt",
            Self::Cheap => "Billig (<1,5 DKK)",
            Self::Moderate => "Moderat (1,5-3 DKK)",
            Self::Expensive => "Dyr (>3 DKK)",
            Self::ForecastTitle => "🔮 Prisprognose",
            Self::BestHours => "Bedste timer til elforbrug",
            Self::WorstHours => "Undgå disse timer (højeste priser)",
            Self::Waiting => "Venter på morgendagens priser...",
            Self::Unable => "Kan ikke indlæse prognosedata",
            Self::Rising => {
                "⚠️ Priserne forventes at STIGE i de næste par timer. Nuværende: {current} DKK → Gennemsnitlig kommende: {avg} DKK. Overvej at køre højtforbrugende apparater nu!"
            }
            Self::Falling => {
                "✅ Godt nyt! Priserne forventes at FALDE. Nuværende: {current} DKK → Gennemsnitlig kommende: {avg} DKK. Vent lidt for lavere priser!"
            }
            Self::Stable => {
                "ℹ️ Priserne er stabile. Nuværende: {current} DKK → Gennemsnitlig kommende: {avg} DKK."
            }
            Self::NextStep => "Næste",
            Self::HistoryTitle => "📈 Historiske tendenser",
            Self::Date => "Dato",
            Self::Min => "Min",
            Self::Max => "Maks",
            Self::Updated => "Opdateret: {time}",
            Self::HighPriceTitle => "⚡ Høj elpris!",
            Self::HighPriceBody => {
                "Nuværende pris er {price} DKK/kWh, over 5 DKK. Overvej at reducere forbruget."
            }
            Self::LowPriceTitle => "✅ Elprisen er faldet!",
            Self::LowPriceBody => {
                "Prisen er nu {price} DKK/kWh, under 3 DKK. Godt tidspunkt at bruge strøm!"
            }
        }
    }
}
