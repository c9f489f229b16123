use comfy_table::Color;

use crate::{i18n::Text, quantity::rate::KilowattHourRate};

/// Severity bucket shared by the table colors and the message tone.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PriceClass {
    Cheap,
    Moderate,
    Expensive,
}

impl PriceClass {
    pub const ALL: [Self; 3] = [Self::Cheap, Self::Moderate, Self::Expensive];

    pub const CHEAP_BELOW: KilowattHourRate = KilowattHourRate(1.5);
    pub const MODERATE_BELOW: KilowattHourRate = KilowattHourRate(3.0);

    #[must_use]
    pub fn of(price: KilowattHourRate) -> Self {
        if price < Self::CHEAP_BELOW {
            Self::Cheap
        } else if price < Self::MODERATE_BELOW {
            Self::Moderate
        } else {
            Self::Expensive
        }
    }

    /// Legend label with the class bounds.
    #[must_use]
    pub const fn text(self) -> Text {
        match self {
            Self::Cheap => Text::Cheap,
            Self::Moderate => Text::Moderate,
            Self::Expensive => Text::Expensive,
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Cheap => Color::Green,
            Self::Moderate => Color::DarkYellow,
            Self::Expensive => Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of() {
        assert_eq!(PriceClass::of(KilowattHourRate(-0.2)), PriceClass::Cheap);
        assert_eq!(PriceClass::of(KilowattHourRate(1.499)), PriceClass::Cheap);
        assert_eq!(PriceClass::of(KilowattHourRate(1.5)), PriceClass::Moderate);
        assert_eq!(PriceClass::of(KilowattHourRate(2.999)), PriceClass::Moderate);
        assert_eq!(PriceClass::of(KilowattHourRate(3.0)), PriceClass::Expensive);
    }

    #[test]
    fn test_text_matches_bounds() {
        assert_eq!(PriceClass::Cheap.text(), Text::Cheap);
        assert_eq!(PriceClass::Expensive.text(), Text::Expensive);
    }
}
