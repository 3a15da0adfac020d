//! Type-level numeric constraints with zero runtime cost.
//!
//! A [`Constrained<T, C>`] value can only be built through a check performed
//! by the marker type `C`, so code holding one never has to re-validate it.
//! Models in this crate use these wrappers to validate subject and
//! environment parameters once, at the public boundary.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1`
//!
//! Bounds that are not known at the type level can be checked with
//! [`check_range`] and [`check_at_most`], which report violations with the
//! same [`ConstraintError`].
//!
//! # Extending
//!
//! You can define custom numeric invariants by implementing [`Constraint<T>`]
//! for your own zero-sized marker types.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::{cmp::Ordering, marker::PhantomData};

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::UnitInterval;

/// A trait for enforcing numeric invariants at construction time.
///
/// Implement this trait for any marker type representing a numeric constraint,
/// such as [`NonNegative`] or [`StrictlyPositive`].
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use twine_comfort::support::constraint::{Constrained, UnitInterval};
///
/// let sex = Constrained::<f64, UnitInterval>::new(0.5).unwrap();
/// assert_eq!(sex.into_inner(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Returns a reference to the inner unconstrained value.
impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Checks that `min ≤ value ≤ max`.
///
/// # Errors
///
/// - [`ConstraintError::BelowMinimum`] if `value < min`.
/// - [`ConstraintError::AboveMaximum`] if `value > max`.
/// - [`ConstraintError::NotANumber`] if either comparison is undefined.
pub fn check_range<T: PartialOrd>(value: &T, min: &T, max: &T) -> ConstraintResult<()> {
    match (value.partial_cmp(min), value.partial_cmp(max)) {
        (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
        (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
        (Some(_), Some(_)) => Ok(()),
        _ => Err(ConstraintError::NotANumber),
    }
}

/// Checks that `value ≤ max`.
///
/// Pairs with a lower-bound marker such as [`NonNegative`] or
/// [`StrictlyPositive`].
///
/// # Errors
///
/// - [`ConstraintError::AboveMaximum`] if `value > max`.
/// - [`ConstraintError::NotANumber`] if the comparison is undefined.
pub fn check_at_most<T: PartialOrd>(value: &T, max: &T) -> ConstraintResult<()> {
    match value.partial_cmp(max) {
        Some(Ordering::Greater) => Err(ConstraintError::AboveMaximum),
        Some(_) => Ok(()),
        None => Err(ConstraintError::NotANumber),
    }
}
