use twine_solvers::equation::bisection;
use uom::si::{
    f64::{HeatFluxDensity, TemperatureInterval},
    heat_flux_density::watt_per_square_meter,
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::newton;

use super::BodyTemperatures;

/// Solver configuration for the PET calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetConfig {
    /// Largest node heat flux accepted as a steady state.
    pub balance_tol: HeatFluxDensity,

    /// Bracket width at which the reference temperature search stops.
    pub temp_tol: TemperatureInterval,

    /// Maximum iteration count for each solver stage.
    pub max_iters: usize,

    /// Coldest plausible body state.
    pub hypothermia: BodyTemperatures,

    /// Hottest plausible body state.
    pub hyperthermia: BodyTemperatures,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            balance_tol: HeatFluxDensity::new::<watt_per_square_meter>(0.01),
            temp_tol: TemperatureInterval::new::<delta_kelvin>(0.01),
            max_iters: 100,
            hypothermia: BodyTemperatures::new(35.0, -10.0, -40.0),
            hyperthermia: BodyTemperatures::new(41.0, 60.0, 64.0),
        }
    }
}

impl PetConfig {
    /// Alternate Newton start, halfway between the body state bounds.
    pub(super) fn fallback_start(&self) -> BodyTemperatures {
        self.hypothermia.midpoint(&self.hyperthermia)
    }

    /// Reference temperature search interval in °C.
    ///
    /// The PET cannot lie outside the clothing temperature bounds.
    pub(super) fn reference_bracket(&self) -> [f64; 2] {
        [self.hypothermia.clothing, self.hyperthermia.clothing]
    }

    pub(super) fn newton(&self) -> newton::Config {
        newton::Config {
            max_iters: self.max_iters,
            residual_tol: self.balance_tol.get::<watt_per_square_meter>(),
            jacobian_step: 1e-6,
            max_step: 10.0,
            max_halvings: 30,
        }
    }

    /// Configuration for the outer reference temperature bisection.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.temp_tol.get::<delta_kelvin>(),
            x_rel_tol: 0.0,
            residual_tol: 0.0,
        }
    }

    /// Configuration for each level of the nested body state bisection.
    pub(super) fn nested_bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: 1e-6,
            x_rel_tol: 0.0,
            residual_tol: 0.0,
        }
    }
}
