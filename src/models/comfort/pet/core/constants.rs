//! Physical constants and physiological set points of the MEMI balance.

/// Stefan-Boltzmann constant, W/(m²·K⁴).
pub(super) const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Emissivity of bare skin.
pub(super) const EMISSIVITY_SKIN: f64 = 0.99;

/// Emissivity of clothing.
pub(super) const EMISSIVITY_CLOTHING: f64 = 0.95;

/// Specific heat of air, J/(kg·K).
pub(super) const SPECIFIC_HEAT_AIR: f64 = 1010.0;

/// Latent heat of vaporization of water, J/kg.
pub(super) const LATENT_HEAT_VAPORIZATION: f64 = 2.42e6;

/// Volumetric specific heat of blood, J/(L·K).
pub(super) const SPECIFIC_HEAT_BLOOD: f64 = 3640.0;

/// Pressure used to scale convection and respiration, Pa.
pub(super) const STANDARD_PRESSURE: f64 = 101_325.0;

/// Offset between Celsius and Kelvin.
pub(super) const KELVIN_OFFSET: f64 = 273.15;

/// Lewis factor relating evaporative and convective transfer, K/hPa.
pub(super) const LEWIS_FACTOR: f64 = 1.67;

/// Woodcock permeability index of clothing.
pub(super) const PERMEABILITY_INDEX: f64 = 0.38;

/// Core temperature set point, °C.
pub(super) const CORE_SET_POINT: f64 = 36.6;

/// Skin temperature set point, °C.
pub(super) const SKIN_SET_POINT: f64 = 34.0;

/// Skin weight in the mean body temperature.
pub(super) const SKIN_WEIGHT: f64 = 0.1;

/// Mean body temperature set point, °C.
pub(super) const BODY_SET_POINT: f64 =
    SKIN_WEIGHT * SKIN_SET_POINT + (1.0 - SKIN_WEIGHT) * CORE_SET_POINT;

/// Upper limit on skin blood flow, L/(m²·h).
pub(super) const MAX_BLOOD_FLOW: f64 = 90.0;

/// Upper limit on sweat rate, g/(m²·h).
pub(super) const MAX_SWEAT_RATE: f64 = 500.0;

/// Water vapor pressure of the reference environment, hPa.
pub(super) const REFERENCE_VAPOR_PRESSURE: f64 = 12.0;

/// Relative humidity of the reference environment, %.
pub(super) const REFERENCE_HUMIDITY: f64 = 50.0;

/// Air speed of the reference environment, m/s.
pub(super) const REFERENCE_AIR_SPEED: f64 = 0.1;

/// Clothing insulation of the reference environment, clo.
pub(super) const REFERENCE_CLO: f64 = 0.9;

/// Extra metabolic heat of the reference activity, W.
pub(super) const REFERENCE_ACTIVITY: f64 = 80.0;
