use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::HeatFluxDensity;

use crate::models::comfort::pet::core::HeatBalance;

/// Errors that can occur while calculating PET.
#[derive(Debug, Error)]
pub enum PetError {
    /// No steady-state body temperatures were found in the actual environment.
    #[error("body temperatures did not reach a steady state: residuals={residuals:?}")]
    BodyState {
        /// Node fluxes at the best candidate, if any candidate was finite.
        residuals: Option<HeatBalance>,
    },

    /// The reference balance is not finite at an end of the search bracket.
    #[error("reference balance is undefined at the search bracket [{lo} °C, {hi} °C]")]
    Reference {
        /// Lower end of the search bracket in °C.
        lo: f64,

        /// Upper end of the search bracket in °C.
        hi: f64,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Net heat flux of the reference environment at the final estimate.
        residual: HeatFluxDensity,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
