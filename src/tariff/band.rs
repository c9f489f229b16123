/// Time-of-day band of the distribution tariff.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Band {
    /// Night, `[00:00, 06:00)`.
    Low,

    /// Everything outside the other two bands.
    Medium,

    /// Evening peak, `[17:00, 21:00)`.
    High,
}

impl Band {
    /// Select the band for the local hour of day.
    #[must_use]
    pub const fn at(hour: u32) -> Self {
        match hour {
            0..6 => Self::Low,
            17..21 => Self::High,
            _ => Self::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(Band::at(0), Band::Low);
        assert_eq!(Band::at(5), Band::Low);
        assert_eq!(Band::at(6), Band::Medium);
        assert_eq!(Band::at(16), Band::Medium);
        assert_eq!(Band::at(17), Band::High);
        assert_eq!(Band::at(20), Band::High);
        assert_eq!(Band::at(21), Band::Medium);
        assert_eq!(Band::at(23), Band::Medium);
    }

    #[test]
    fn test_bands_partition_the_day() {
        let low = (0..24).filter(|hour| Band::at(*hour) == Band::Low).count();
        let medium = (0..24).filter(|hour| Band::at(*hour) == Band::Medium).count();
        let high = (0..24).filter(|hour| Band::at(*hour) == Band::High).count();
        assert_eq!((low, medium, high), (6, 14, 4));
    }
}
