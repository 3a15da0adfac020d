//! Thermoregulatory responses driven by body temperature.

use super::constants::{
    BODY_SET_POINT, CORE_SET_POINT, MAX_BLOOD_FLOW, MAX_SWEAT_RATE, SKIN_SET_POINT,
};

/// Skin blood flow in L/(m²·h).
///
/// Dilation grows with core warming above 36.6 °C and constriction with
/// skin cooling below 34 °C. Flow never exceeds 90 L/(m²·h).
#[must_use]
pub fn vaso_circulation(core: f64, skin: f64) -> f64 {
    let constriction = (SKIN_SET_POINT - skin).max(0.0);
    let dilation = (core - CORE_SET_POINT).max(0.0);
    let flow = (6.3 + 75.0 * dilation) / (1.0 + 0.5 * constriction);
    flow.min(MAX_BLOOD_FLOW)
}

/// Sweat rate in g/(m²·h) for a mean body temperature in °C.
///
/// Zero at or below the 36.34 °C set point and capped at 500 g/(m²·h).
#[must_use]
pub fn sweat_volume(body: f64) -> f64 {
    let rate = 304.94e-3 * (body - BODY_SET_POINT).max(0.0);
    rate.min(MAX_SWEAT_RATE)
}
