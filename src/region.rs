use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::prelude::*;

/// Danish price area of the day-ahead market.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, clap::ValueEnum)]
pub enum Region {
    /// West of the Great Belt: Jutland and Funen.
    #[default]
    #[value(name = "dk1")]
    Dk1,

    /// East of the Great Belt: Zealand, Lolland-Falster, and Bornholm.
    #[value(name = "dk2")]
    Dk2,
}

impl Region {
    pub const ALL: [Self; 2] = [Self::Dk1, Self::Dk2];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Dk1 => "DK1",
            Self::Dk2 => "DK2",
        }
    }

    /// Parse the price area code, falling back to the default region for unknown codes.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let known = Self::ALL.into_iter().find(|region| region.code().eq_ignore_ascii_case(code));
        known.unwrap_or_else(|| {
            warn!(code, fallback = Self::default().code(), "unknown region");
            Self::default()
        })
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_code(&String::deserialize(deserializer)?))
    }
}
