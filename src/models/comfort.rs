//! Human thermal comfort models.
//!
//! This module contains models that relate the thermal environment to the
//! physiological response of a human subject.

pub mod pet;
