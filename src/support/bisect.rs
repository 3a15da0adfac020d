//! Scalar bisection over plain closures.
//!
//! Adapts a `Fn(f64) -> Option<f64>` into the [`Model`] and
//! [`EquationProblem`] pair expected by the `twine-solvers` bisection
//! solver. Points where the closure returns `None` (or a non-finite value)
//! are treated as lying on the positive side of the root.

use std::convert::Infallible;

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

/// A closure evaluation at a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Point at which the closure was evaluated.
    pub x: f64,

    /// Closure value at `x`.
    pub value: f64,
}

/// Returned by the closure adapter where the function is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("function is undefined at the evaluated point")]
pub struct Undefined;

/// Errors that can occur while bisecting a closure.
#[derive(Debug, Error)]
pub enum Error {
    /// The closure is undefined at one of the bracket endpoints.
    #[error("function is undefined at bracket endpoint {x}")]
    UndefinedEndpoint { x: f64 },

    /// The closure has the same sign at both bracket endpoints.
    #[error("no sign change over [{lo}, {hi}]: f(lo)={f_lo}, f(hi)={f_hi}")]
    NoSignChange {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual}")]
    MaxIters {
        /// Best residual achieved.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

/// Finds a root of `f` inside `bracket`.
///
/// # Errors
///
/// Returns an [`Error`] if `f` is undefined at an endpoint, does not change
/// sign over the bracket, or the solver fails to converge.
///
/// # Example
///
/// ```
/// use twine_comfort::support::bisect;
/// use twine_solvers::equation::bisection;
///
/// let config = bisection::Config {
///     max_iters: 100,
///     x_abs_tol: 1e-10,
///     x_rel_tol: 0.0,
///     residual_tol: 0.0,
/// };
///
/// let root = bisect::find_root(|x| Some(x * x - 2.0), [0.0, 2.0], &config).unwrap();
/// assert!((root.x - 2.0_f64.sqrt()).abs() < 1e-8);
/// ```
pub fn find_root<F>(
    f: F,
    bracket: [f64; 2],
    config: &bisection::Config,
) -> Result<Evaluation, Error>
where
    F: Fn(f64) -> Option<f64>,
{
    let model = FnModel(f);
    let [lo, hi] = bracket;

    let f_lo = model
        .call(&lo)
        .map_err(|_| Error::UndefinedEndpoint { x: lo })?
        .value;
    let f_hi = model
        .call(&hi)
        .map_err(|_| Error::UndefinedEndpoint { x: hi })?
        .value;

    if f_lo == 0.0 {
        return Ok(Evaluation { x: lo, value: f_lo });
    }
    if f_hi == 0.0 {
        return Ok(Evaluation { x: hi, value: f_hi });
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(Error::NoSignChange { lo, hi, f_lo, f_hi });
    }

    let solution = bisection::solve(
        &model,
        &RootProblem,
        bracket,
        config,
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(Error::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output)
}

/// Model adapter exposing a closure as a [`Model`].
struct FnModel<F>(F);

impl<F> Model for FnModel<F>
where
    F: Fn(f64) -> Option<f64>,
{
    type Input = f64;
    type Output = Evaluation;
    type Error = Undefined;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let x = *input;
        (self.0)(x)
            .filter(|value| value.is_finite())
            .map(|value| Evaluation { x, value })
            .ok_or(Undefined)
    }
}

/// Residual is the closure value itself.
struct RootProblem;

impl EquationProblem<1> for RootProblem {
    type Input = f64;
    type Output = Evaluation;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.value])
    }
}
