quantity!(
    /// Danish kroner per kilowatt-hour, the display unit.
    KilowattHourRate, suffix: "DKK/kWh"
);

quantity!(
    /// Danish kroner per megawatt-hour, the unit of the day-ahead market.
    MegawattHourRate, suffix: "DKK/MWh"
);

impl From<MegawattHourRate> for KilowattHourRate {
    fn from(rate: MegawattHourRate) -> Self {
        Self(rate.0 / 1000.0)
    }
}
