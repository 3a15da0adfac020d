use uom::si::f64::ThermodynamicTemperature;

use super::{CategoryScale, CoreTemperatureCategory, PetCategory};

/// Outcome of a PET calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetResults {
    /// Physiological equivalent temperature.
    pub pet: ThermodynamicTemperature,

    /// Steady-state core temperature in the actual environment.
    pub t_core: ThermodynamicTemperature,

    /// Steady-state mean skin temperature in the actual environment.
    pub t_skin: ThermodynamicTemperature,

    /// Steady-state clothing surface temperature in the actual environment.
    pub t_clo: ThermodynamicTemperature,

    /// `pet` is an end of the reference search range, not a balanced root.
    ///
    /// Set when the body state is too hot or too cold for any reference
    /// temperature in the range to balance it.
    pub at_limit: bool,
}

impl PetResults {
    #[must_use]
    pub fn pet_category(&self, scale: CategoryScale) -> PetCategory {
        PetCategory::from_pet(self.pet, scale)
    }

    #[must_use]
    pub fn core_temperature_category(&self) -> CoreTemperatureCategory {
        CoreTemperatureCategory::from_core_temperature(self.t_core)
    }
}
