//! Environmental and activity inputs to the PET model.

use uom::si::{
    f64::{Pressure, Ratio, ThermodynamicTemperature, Velocity},
    pressure::pascal,
    ratio::percent,
    thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use super::constants::{REFERENCE_AIR_SPEED, REFERENCE_CLO, REFERENCE_HUMIDITY, STANDARD_PRESSURE};

/// Thermal environment and activity of the subject.
///
/// Metabolic rate is in met and clothing insulation in clo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub air_temperature: ThermodynamicTemperature,
    pub radiant_temperature: ThermodynamicTemperature,
    pub air_speed: Velocity,
    pub relative_humidity: Ratio,
    pub met: f64,
    pub clo: f64,
    pub pressure: Pressure,
}

impl Conditions {
    /// Creates conditions at standard barometric pressure (101 325 Pa).
    #[must_use]
    pub fn new(
        air_temperature: ThermodynamicTemperature,
        radiant_temperature: ThermodynamicTemperature,
        air_speed: Velocity,
        relative_humidity: Ratio,
        met: f64,
        clo: f64,
    ) -> Self {
        Self {
            air_temperature,
            radiant_temperature,
            air_speed,
            relative_humidity,
            met,
            clo,
            pressure: Self::standard_pressure(),
        }
    }

    /// Standard sea-level barometric pressure, 101 325 Pa.
    #[must_use]
    pub fn standard_pressure() -> Pressure {
        Pressure::new::<pascal>(STANDARD_PRESSURE)
    }

    /// Returns a copy at the given barometric pressure.
    #[must_use]
    pub fn with_pressure(self, pressure: Pressure) -> Self {
        Self { pressure, ..self }
    }

    /// The PET reference environment at `temperature`.
    ///
    /// Air and radiant temperature are equal, humidity is 50 %, air speed is
    /// 0.1 m/s and clothing is 0.9 clo. Activity and pressure are the subject's.
    #[must_use]
    pub fn reference(temperature: ThermodynamicTemperature, met: f64, pressure: Pressure) -> Self {
        Self {
            air_temperature: temperature,
            radiant_temperature: temperature,
            air_speed: Velocity::new::<meter_per_second>(REFERENCE_AIR_SPEED),
            relative_humidity: Ratio::new::<percent>(REFERENCE_HUMIDITY),
            met,
            clo: REFERENCE_CLO,
            pressure,
        }
    }

    /// Mean of air and radiant temperature.
    #[must_use]
    pub fn operative_temperature(&self) -> ThermodynamicTemperature {
        let ta = self.air_temperature.get::<degree_celsius>();
        let tr = self.radiant_temperature.get::<degree_celsius>();
        ThermodynamicTemperature::new::<degree_celsius>((ta + tr) / 2.0)
    }
}
