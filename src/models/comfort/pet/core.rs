//! Physiological Equivalent Temperature (PET) computation.
//!
//! PET is the air temperature of a standardized indoor setting in which the
//! heat balance of a person is maintained with the same core and skin
//! temperatures as under the actual, often outdoor, conditions. The human
//! heat balance is the MEMI three-node model.

mod body;
mod category;
mod conditions;
mod config;
mod constants;
mod memi;
mod physiology;
mod results;
mod solve;

pub use body::{BodyParameter, BodyParameterError, Posture};
pub use category::{CategoryScale, CoreTemperatureCategory, PetCategory, ThermalCondition};
pub use conditions::Conditions;
pub use config::PetConfig;
pub use memi::{BodyTemperatures, Environment, HeatBalance, memi_balance};
pub use physiology::{sweat_volume, vaso_circulation};
pub use results::PetResults;
pub use solve::{PetError, physiologic_equivalent_temperature};
