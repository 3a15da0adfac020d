//! Physiological Equivalent Temperature (PET) model.
//!
//! [`Pet`] is a [`twine_core::Model`] that maps the thermal environment of a
//! subject to their PET and steady-state body temperatures. The computational
//! core is internal; its public types are re-exported here.
//!
//! Use [`series::PetSeries`] to evaluate many time steps for one subject and
//! summarize how often they are comfortable.
//!
//! # Example
//!
//! ```
//! use twine_comfort::models::comfort::pet::{CategoryScale, Conditions, Pet, PetCategory};
//! use twine_core::Model;
//! use uom::si::{
//!     f64::{Ratio, ThermodynamicTemperature, Velocity},
//!     ratio::percent,
//!     thermodynamic_temperature::degree_celsius,
//!     velocity::meter_per_second,
//! };
//!
//! let conditions = Conditions::new(
//!     ThermodynamicTemperature::new::<degree_celsius>(20.0),
//!     ThermodynamicTemperature::new::<degree_celsius>(30.0),
//!     Velocity::new::<meter_per_second>(1.0),
//!     Ratio::new::<percent>(50.0),
//!     2.3,
//!     1.0,
//! );
//!
//! let results = Pet::default().call(&conditions).unwrap();
//!
//! assert!((results.pet.get::<degree_celsius>() - 22.3).abs() < 0.1);
//! assert_eq!(
//!     results.pet_category(CategoryScale::Temperate),
//!     PetCategory::Comfortable
//! );
//! ```

mod core;
pub mod series;

pub use self::core::{
    BodyParameter, BodyParameterError, BodyTemperatures, CategoryScale, Conditions,
    CoreTemperatureCategory, Environment, HeatBalance, PetCategory, PetConfig, PetError,
    PetResults, Posture, ThermalCondition, memi_balance, physiologic_equivalent_temperature,
    sweat_volume, vaso_circulation,
};

use twine_core::Model;

/// PET model for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pet {
    body: BodyParameter,
    config: PetConfig,
}

impl Pet {
    #[must_use]
    pub fn new(body: BodyParameter, config: PetConfig) -> Self {
        Self { body, config }
    }

    #[must_use]
    pub fn body(&self) -> &BodyParameter {
        &self.body
    }

    #[must_use]
    pub fn config(&self) -> &PetConfig {
        &self.config
    }
}

impl Model for Pet {
    type Input = Conditions;
    type Output = PetResults;
    type Error = PetError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        physiologic_equivalent_temperature(input, &self.body, &self.config)
    }
}
