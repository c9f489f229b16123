use crate::quantity::rate::KilowattHourRate;

/// Notification about the current price crossing a threshold between two refreshes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Alert {
    HighPrice(KilowattHourRate),
    LowPrice(KilowattHourRate),
}

impl Alert {
    pub const HIGH_ABOVE: KilowattHourRate = KilowattHourRate(5.0);
    pub const LOW_BELOW: KilowattHourRate = KilowattHourRate(3.0);

    /// Compare the previous and the new current price.
    ///
    /// Nothing is reported without a previous price, so that a fresh start stays quiet.
    #[must_use]
    pub fn detect(previous: Option<KilowattHourRate>, current: Option<KilowattHourRate>) -> Option<Self> {
        let (previous, current) = (previous?, current?);
        if previous <= Self::HIGH_ABOVE && current > Self::HIGH_ABOVE {
            Some(Self::HighPrice(current))
        } else if previous >= Self::LOW_BELOW && current < Self::LOW_BELOW {
            Some(Self::LowPrice(current))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_high_price() {
        let alert = Alert::detect(Some(KilowattHourRate(4.0)), Some(KilowattHourRate(5.5)));
        assert_eq!(alert, Some(Alert::HighPrice(KilowattHourRate(5.5))));
    }

    #[test]
    fn test_detect_low_price() {
        let alert = Alert::detect(Some(KilowattHourRate(3.0)), Some(KilowattHourRate(2.5)));
        assert_eq!(alert, Some(Alert::LowPrice(KilowattHourRate(2.5))));
    }

    #[test]
    fn test_detect_nothing() {
        assert_eq!(Alert::detect(Some(KilowattHourRate(6.0)), Some(KilowattHourRate(7.0))), None);
        assert_eq!(Alert::detect(Some(KilowattHourRate(2.0)), Some(KilowattHourRate(1.0))), None);
        assert_eq!(Alert::detect(None, Some(KilowattHourRate(9.0))), None);
    }
}
