quantity!(
    /// Danish kroner per litre, used for motor fuels.
    LitrePrice, suffix: "DKK/l"
);

quantity!(
    /// Danish kroner per cubic metre, used for natural gas and water.
    CubicMetrePrice, suffix: "DKK/m³"
);
