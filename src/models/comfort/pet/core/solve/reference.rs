//! Reference environment search for a fixed body state.

use std::convert::Infallible;

use thiserror::Error;
use tracing::{debug, warn};
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{HeatFluxDensity, Pressure, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    thermodynamic_temperature::degree_celsius,
};

use super::PetError;
use crate::models::comfort::pet::core::{
    BodyParameter, BodyTemperatures, Conditions, HeatBalance, PetConfig,
    memi::{Environment, memi_balance},
};

/// Reference air temperature found for a body state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ReferenceTemperature {
    pub(super) temperature: ThermodynamicTemperature,

    /// The net flux kept one sign over the bracket and `temperature` is the
    /// end the root lies beyond.
    pub(super) at_limit: bool,
}

/// Finds the reference air temperature that balances `body_state`.
///
/// The reference net flux rises with air temperature. When it does not
/// change sign over the bracket, the end nearest the root is returned with
/// `at_limit` set.
///
/// # Errors
///
/// Returns [`PetError::Reference`] if the reference net flux is not finite at
/// either end of the bracket, or a solver error if bisection fails.
pub(super) fn solve(
    body_state: BodyTemperatures,
    conditions: &Conditions,
    body: &BodyParameter,
    config: &PetConfig,
) -> Result<ReferenceTemperature, PetError> {
    let model = ReferenceModel::new(body_state, body, conditions.met, conditions.pressure);
    let [lo, hi] = config.reference_bracket();

    let net_lo = model.net_at(lo);
    let net_hi = model.net_at(hi);
    if !(net_lo.is_finite() && net_hi.is_finite()) {
        warn!(
            ?body_state,
            net_lo, net_hi, "reference balance is not finite at the bracket ends"
        );
        return Err(PetError::Reference { lo, hi });
    }

    if net_lo * net_hi > 0.0 {
        // Losing heat even at `hi` puts the root above it, gaining at `lo` below.
        let limit = if net_hi < 0.0 { hi } else { lo };
        debug!(
            ?body_state,
            net_lo, net_hi, limit, "reference balance has no sign change, using bracket end"
        );
        return Ok(ReferenceTemperature {
            temperature: ThermodynamicTemperature::new::<degree_celsius>(limit),
            at_limit: true,
        });
    }

    let solution = bisection::solve(
        &model,
        &ReferenceProblem,
        [lo, hi],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(PetError::MaxIters {
            residual: HeatFluxDensity::new::<watt_per_square_meter>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(ReferenceTemperature {
        temperature: solution.snapshot.output.temperature,
        at_limit: false,
    })
}

/// Body state in the reference environment at a trial temperature.
#[derive(Debug, Clone, Copy)]
pub(super) struct ReferenceState {
    pub(super) temperature: ThermodynamicTemperature,
    pub(super) balance: HeatBalance,
}

/// Returned where the reference balance is not finite.
#[derive(Debug, Clone, Copy, Error)]
#[error("reference balance is not finite at {temperature:?}")]
pub(super) struct NonFiniteBalance {
    temperature: ThermodynamicTemperature,
}

/// Model adapter evaluating a fixed body state in the reference environment.
///
/// The subject, activity and barometric pressure are those of the actual
/// environment; only the reference air temperature varies.
pub(super) struct ReferenceModel<'a> {
    body_state: BodyTemperatures,
    body: &'a BodyParameter,
    met: f64,
    pressure: Pressure,
}

impl<'a> ReferenceModel<'a> {
    pub(super) fn new(
        body_state: BodyTemperatures,
        body: &'a BodyParameter,
        met: f64,
        pressure: Pressure,
    ) -> Self {
        Self {
            body_state,
            body,
            met,
            pressure,
        }
    }

    /// Net reference flux in W/m² at `temperature` °C, NaN if undefined.
    pub(super) fn net_at(&self, temperature: f64) -> f64 {
        self.call(&ThermodynamicTemperature::new::<degree_celsius>(temperature))
            .map_or(f64::NAN, |state| {
                state.balance.net().get::<watt_per_square_meter>()
            })
    }
}

impl Model for ReferenceModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = ReferenceState;
    type Error = NonFiniteBalance;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let conditions = Conditions::reference(*input, self.met, self.pressure);
        let balance = memi_balance(
            &self.body_state,
            &conditions,
            self.body,
            Environment::Reference,
        );

        if !balance.net().get::<watt_per_square_meter>().is_finite() {
            return Err(NonFiniteBalance {
                temperature: *input,
            });
        }

        Ok(ReferenceState {
            temperature: *input,
            balance,
        })
    }
}

/// Equation problem for the reference search.
///
/// The residual is the whole-body net flux, in W/m², at a reference air
/// temperature given in °C.
pub(super) struct ReferenceProblem;

impl EquationProblem<1> for ReferenceProblem {
    type Input = ThermodynamicTemperature;
    type Output = ReferenceState;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<degree_celsius>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.balance.net().get::<watt_per_square_meter>()])
    }
}
