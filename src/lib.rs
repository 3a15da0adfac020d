//! # Twine Comfort
//!
//! Human thermal comfort models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations,
//!   currently the Physiological Equivalent Temperature (PET) model.
//! - [`support`]: Supporting utilities used by models, such as numeric
//!   constraints and root finders.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once it is useful outside that model. The Newton solver, for
//! example, knows nothing about human physiology and lives in
//! [`support::newton`].

pub mod models;
pub mod support;
