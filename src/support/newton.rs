//! Damped Newton-Raphson solver for small square systems of equations.
//!
//! The Jacobian is approximated by forward differences, so the residual
//! function only needs to be evaluable, not differentiable in closed form.
//! Each step is capped in size and backtracked until the residual norm
//! decreases, which keeps the iteration stable around the kinks that
//! piecewise physical models tend to have.
//!
//! # Example
//!
//! ```
//! use twine_comfort::support::newton;
//!
//! // Intersection of the unit circle with the line y = x.
//! let residuals = |x: &[f64; 2]| [x[0] * x[0] + x[1] * x[1] - 1.0, x[0] - x[1]];
//!
//! let solution = newton::solve(residuals, [1.0, 0.5], &newton::Config::default()).unwrap();
//! let expected = 0.5_f64.sqrt();
//! assert!((solution.x[0] - expected).abs() < 1e-6);
//! assert!((solution.x[1] - expected).abs() < 1e-6);
//! ```

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// Solver configuration for [`solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum number of Newton iterations.
    pub max_iters: usize,

    /// Absolute tolerance applied to every residual component.
    pub residual_tol: f64,

    /// Forward-difference perturbation used to build the Jacobian.
    pub jacobian_step: f64,

    /// Largest allowed change of any unknown in a single iteration.
    pub max_step: f64,

    /// Maximum number of step halvings in the backtracking line search.
    pub max_halvings: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: 1e-9,
            jacobian_step: 1e-6,
            max_step: f64::INFINITY,
            max_halvings: 30,
        }
    }
}

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution<const N: usize> {
    /// Unknowns at the root.
    pub x: [f64; N],

    /// Residuals at `x`, each within [`Config::residual_tol`] of zero.
    pub residuals: [f64; N],

    /// Newton iterations performed.
    pub iters: usize,
}

/// Errors that can occur while solving.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// The residual function returned a non-finite value at the starting point.
    #[error("residuals are not finite at the starting point")]
    NonFinite,

    /// The Jacobian could not be inverted.
    #[error("singular Jacobian at iteration {iters}")]
    SingularJacobian { iters: usize },

    /// No step along the Newton direction reduced the residual norm.
    #[error("line search stalled at iteration {iters}: residual norm={norm}")]
    Stalled {
        /// Residual norm at the point where the search stalled.
        norm: f64,

        /// Iteration at which the search stalled.
        iters: usize,
    },

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual norm={norm}")]
    MaxIters {
        /// Residual norm after the final iteration.
        norm: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

/// Finds `x` such that every component of `f(x)` is within tolerance of zero.
///
/// # Errors
///
/// Returns an [`Error`] if the residuals are not finite at `x0`, the
/// Jacobian is singular, the line search stalls, or the iteration limit
/// is reached.
pub fn solve<const N: usize>(
    f: impl Fn(&[f64; N]) -> [f64; N],
    x0: [f64; N],
    config: &Config,
) -> Result<Solution<N>, Error> {
    let mut x = x0;
    let mut fx = f(&x);
    if !all_finite(&fx) {
        return Err(Error::NonFinite);
    }

    for iters in 0..config.max_iters {
        if converged(&fx, config.residual_tol) {
            return Ok(Solution {
                x,
                residuals: fx,
                iters,
            });
        }

        let step = newton_step(&f, &x, &fx, config).ok_or(Error::SingularJacobian { iters })?;
        let norm = norm(&fx);
        (x, fx) = line_search(&f, &x, &step, norm, config.max_halvings)
            .ok_or(Error::Stalled { norm, iters })?;
    }

    if converged(&fx, config.residual_tol) {
        return Ok(Solution {
            x,
            residuals: fx,
            iters: config.max_iters,
        });
    }

    Err(Error::MaxIters {
        norm: norm(&fx),
        iters: config.max_iters,
    })
}

/// Solves `J · dx = -f(x)` and caps the largest component at `max_step`.
fn newton_step<const N: usize>(
    f: &impl Fn(&[f64; N]) -> [f64; N],
    x: &[f64; N],
    fx: &[f64; N],
    config: &Config,
) -> Option<[f64; N]> {
    let h = config.jacobian_step;
    let mut jacobian = DMatrix::<f64>::zeros(N, N);
    for j in 0..N {
        let mut perturbed = *x;
        perturbed[j] += h;
        let fp = f(&perturbed);
        for i in 0..N {
            jacobian[(i, j)] = (fp[i] - fx[i]) / h;
        }
    }

    let rhs = DVector::from_iterator(N, fx.iter().map(|v| -v));
    let mut delta = jacobian.lu().solve(&rhs)?;
    if delta.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let largest = delta.amax();
    if largest > config.max_step {
        delta *= config.max_step / largest;
    }

    let mut step = [0.0; N];
    step.iter_mut().zip(delta.iter()).for_each(|(s, d)| *s = *d);
    Some(step)
}

/// Backtracks along `step` until the residual norm drops below `norm`.
fn line_search<const N: usize>(
    f: &impl Fn(&[f64; N]) -> [f64; N],
    x: &[f64; N],
    step: &[f64; N],
    norm_0: f64,
    max_halvings: usize,
) -> Option<([f64; N], [f64; N])> {
    let mut alpha = 1.0;
    for _ in 0..max_halvings {
        let mut candidate = *x;
        candidate
            .iter_mut()
            .zip(step)
            .for_each(|(c, s)| *c += alpha * s);

        let fc = f(&candidate);
        if all_finite(&fc) && norm(&fc) < norm_0 {
            return Some((candidate, fc));
        }
        alpha *= 0.5;
    }
    None
}

fn converged(residuals: &[f64], tol: f64) -> bool {
    residuals.iter().all(|r| r.abs() < tol)
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn solves_linear_system_in_one_step() {
        let residuals = |x: &[f64; 3]| {
            [
                2.0 * x[0] + x[1] - 5.0,
                x[1] - x[2] - 1.0,
                x[0] + x[2] - 2.0,
            ]
        };

        let solution = solve(residuals, [0.0; 3], &Config::default()).unwrap();

        assert_relative_eq!(solution.x[0], 1.5, epsilon = 1e-6);
        assert_relative_eq!(solution.x[1], 2.0, epsilon = 1e-6);
        assert_relative_eq!(solution.x[2], 0.5, epsilon = 1e-6);
        assert!(solution.iters <= 2);
    }

    #[test]
    fn capped_steps_still_converge() {
        let residuals = |x: &[f64; 1]| [x[0].powi(3) - 27.0];
        let config = Config {
            max_step: 0.5,
            ..Config::default()
        };

        let solution = solve(residuals, [10.0], &config).unwrap();

        assert_relative_eq!(solution.x[0], 3.0, epsilon = 1e-6);
        assert!(solution.residuals[0].abs() < config.residual_tol);
    }

    #[test]
    fn returns_immediately_at_root() {
        let residuals = |x: &[f64; 2]| [x[0] - 1.0, x[1] + 1.0];
        let solution = solve(residuals, [1.0, -1.0], &Config::default()).unwrap();
        assert_eq!(solution.iters, 0);
    }

    #[test]
    fn rejects_non_finite_start() {
        let residuals = |x: &[f64; 1]| [x[0].ln()];
        assert_eq!(
            solve(residuals, [-1.0], &Config::default()),
            Err(Error::NonFinite)
        );
    }

    #[test]
    fn reports_singular_jacobian() {
        // Neither equation depends on the second unknown.
        let residuals = |x: &[f64; 2]| [x[0] - 1.0, x[0] + 1.0];
        assert!(matches!(
            solve(residuals, [0.0, 0.0], &Config::default()),
            Err(Error::SingularJacobian { iters: 0 })
        ));
    }

    #[test]
    fn stalls_without_a_root() {
        // x² + 1 has no real root; the minimum norm is reached at x = 0.
        let residuals = |x: &[f64; 1]| [x[0] * x[0] + 1.0];
        assert!(matches!(
            solve(residuals, [2.0], &Config::default()),
            Err(Error::Stalled { .. } | Error::SingularJacobian { .. } | Error::MaxIters { .. })
        ));
    }
}
