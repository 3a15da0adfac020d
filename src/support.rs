//! Supporting utilities used by models.
//!
//! - [`constraint`]: Type-level numeric constraints for validated inputs.
//! - [`newton`]: Damped Newton solver for small square systems of equations.
//! - [`bisect`]: Scalar bisection over plain closures.

pub mod bisect;
pub mod constraint;
pub mod newton;
