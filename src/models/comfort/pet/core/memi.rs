//! MEMI three-node energy balance.
//!
//! The Munich Energy-balance Model for Individuals splits the body into a
//! core, a skin layer and a clothing layer. For given node temperatures the
//! balance returns the net heat flux into each node per unit body surface.
//! A steady state is reached when all three fluxes vanish.

use uom::si::{
    f64::HeatFluxDensity, heat_flux_density::watt_per_square_meter, length::meter,
    mass::kilogram, pressure::pascal, ratio::percent, thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use super::{
    BodyParameter, Conditions,
    constants::{
        EMISSIVITY_CLOTHING, EMISSIVITY_SKIN, KELVIN_OFFSET, LATENT_HEAT_VAPORIZATION,
        LEWIS_FACTOR, PERMEABILITY_INDEX, REFERENCE_ACTIVITY, REFERENCE_VAPOR_PRESSURE,
        SKIN_WEIGHT, SPECIFIC_HEAT_AIR, SPECIFIC_HEAT_BLOOD, STANDARD_PRESSURE, STEFAN_BOLTZMANN,
    },
    physiology::{sweat_volume, vaso_circulation},
};

/// Core, skin and clothing temperatures in °C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTemperatures {
    pub core: f64,
    pub skin: f64,
    pub clothing: f64,
}

impl BodyTemperatures {
    #[must_use]
    pub fn new(core: f64, skin: f64, clothing: f64) -> Self {
        Self {
            core,
            skin,
            clothing,
        }
    }

    /// Component-wise midpoint between two states.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(
            (self.core + other.core) / 2.0,
            (self.skin + other.skin) / 2.0,
            (self.clothing + other.clothing) / 2.0,
        )
    }

    pub(crate) fn to_array(self) -> [f64; 3] {
        [self.core, self.skin, self.clothing]
    }

    pub(crate) fn from_array([core, skin, clothing]: [f64; 3]) -> Self {
        Self::new(core, skin, clothing)
    }
}

/// Net heat flux into each body node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBalance {
    pub core: HeatFluxDensity,
    pub skin: HeatFluxDensity,
    pub clothing: HeatFluxDensity,
}

impl HeatBalance {
    /// Whole-body imbalance, the sum of the three node fluxes.
    #[must_use]
    pub fn net(&self) -> HeatFluxDensity {
        self.core + self.skin + self.clothing
    }

    /// Whether every node flux is strictly within `tolerance` of zero.
    #[must_use]
    pub fn is_balanced(&self, tolerance: HeatFluxDensity) -> bool {
        [self.core, self.skin, self.clothing]
            .iter()
            .all(|flux| flux.abs() < tolerance)
    }

    pub(crate) fn from_array([core, skin, clothing]: [f64; 3]) -> Self {
        Self {
            core: HeatFluxDensity::new::<watt_per_square_meter>(core),
            skin: HeatFluxDensity::new::<watt_per_square_meter>(skin),
            clothing: HeatFluxDensity::new::<watt_per_square_meter>(clothing),
        }
    }
}

/// Which environment the balance describes.
///
/// In the actual environment vapor pressure follows the given humidity and
/// metabolism scales with the activity level. The PET reference environment
/// fixes vapor pressure at 12 hPa and adds 80 W of light activity to the
/// basal metabolism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Actual,
    Reference,
}

/// Evaluates the MEMI balance for one set of node temperatures.
///
/// Inputs are not validated. Implausible values such as zero clothing
/// insulation produce non-finite fluxes.
#[must_use]
pub fn memi_balance(
    temperatures: &BodyTemperatures,
    conditions: &Conditions,
    body: &BodyParameter,
    environment: Environment,
) -> HeatBalance {
    MemiModel::new(conditions, body, environment).balance(temperatures)
}

/// MEMI balance with all temperature-independent terms evaluated once.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MemiModel {
    air_temperature: f64,
    radiant_temperature: f64,
    dubois_area: f64,
    clothed_area: f64,
    radiating_area: f64,
    radiative_efficiency: f64,
    convection: f64,
    clothing_area_factor: f64,
    clothed_fraction: f64,
    clothing_resistance: f64,
    clothing_conductance: f64,
    vapor_pressure: f64,
    metabolism: f64,
    respiration: f64,
}

impl MemiModel {
    pub(crate) fn new(conditions: &Conditions, body: &BodyParameter, environment: Environment) -> Self {
        let ta = conditions.air_temperature.get::<degree_celsius>();
        let tr = conditions.radiant_temperature.get::<degree_celsius>();
        let air_speed = conditions.air_speed.get::<meter_per_second>();
        let rh = conditions.relative_humidity.get::<percent>();
        let pressure = conditions.pressure.get::<pascal>();
        let clo = conditions.clo;
        let met = conditions.met;

        let height = body.height().get::<meter>();
        let mass = body.body_mass().get::<kilogram>();
        let age = body.age();
        let sex = body.sex();

        let dubois_area = 0.203 * mass.powf(0.425) * height.powf(0.725);
        let radiative_efficiency = body.posture().radiative_efficiency();

        // Clothed area, from the clothed fraction before it is clipped to one.
        let clothing_area_factor = 1.0 + 0.31 * clo;
        let clothed_fraction =
            (173.51 * clo - 2.36 - 100.76 * clo * clo + 19.28 * clo.powi(3)) / 100.0;
        let clothed_area =
            dubois_area * clothed_fraction + dubois_area * (clothing_area_factor - 1.0);
        let radiating_area = dubois_area * radiative_efficiency;
        let clothed_fraction = clothed_fraction.min(1.0);

        let vapor_pressure = match environment {
            Environment::Actual => rh / 100.0 * saturation_vapor_pressure(ta),
            Environment::Reference => REFERENCE_VAPOR_PRESSURE,
        };

        let convection = body.posture().convection_coefficient(air_speed)
            * (pressure / STANDARD_PRESSURE).powf(0.55);

        let basal_female = 3.19
            * mass.powf(0.75)
            * (1.0 + 0.004 * (30.0 - age) + 0.018 * (height * 100.0 / mass.cbrt() - 42.1));
        let basal_male = 3.45
            * mass.powf(0.75)
            * (1.0 + 0.004 * (30.0 - age) + 0.01 * (height * 100.0 / mass.cbrt() - 43.4));
        let (male, female) = match environment {
            Environment::Actual => (basal_male * 1.17 * met, basal_female * 1.22 * met),
            Environment::Reference => (
                basal_male + REFERENCE_ACTIVITY,
                basal_female + REFERENCE_ACTIVITY,
            ),
        };
        let metabolism = ((1.0 - sex) * male + sex * female) / dubois_area;

        let exhaled = 0.47 * ta + 21.0;
        let ventilation = metabolism * 1.44e-6;
        let exhaled_vapor_pressure = 6.11 * 10_f64.powf(7.45 * exhaled / (235.0 + exhaled));
        let sensible = SPECIFIC_HEAT_AIR * (ta - exhaled) * ventilation;
        let latent = 0.623 * LATENT_HEAT_VAPORIZATION / (pressure / 100.0)
            * (vapor_pressure - exhaled_vapor_pressure)
            * ventilation;
        let respiration = sensible + latent;

        let clothing_resistance = clo / 6.45;
        let clothing_conductance = clothing_conductance(
            dubois_area,
            clothed_area,
            clothing_area_factor,
            clothed_fraction,
            clothing_resistance,
            height,
            clothing_thickness(clo, height),
        );

        Self {
            air_temperature: ta,
            radiant_temperature: tr,
            dubois_area,
            clothed_area,
            radiating_area,
            radiative_efficiency,
            convection,
            clothing_area_factor,
            clothed_fraction,
            clothing_resistance,
            clothing_conductance,
            vapor_pressure,
            metabolism,
            respiration,
        }
    }

    /// Node heat fluxes in W/m² for `[core, skin, clothing]` in °C.
    pub(crate) fn residuals(&self, &[core, skin, clothing]: &[f64; 3]) -> [f64; 3] {
        let ta = self.air_temperature;
        let hc = self.convection;
        let facl = self.clothed_fraction;
        let rcl = self.clothing_resistance;

        let body = SKIN_WEIGHT * skin + (1.0 - SKIN_WEIGHT) * core;

        // Evaporation of sweat and diffusion through the skin.
        let sweat = LATENT_HEAT_VAPORIZATION / 1000.0 * sweat_volume(body) / 3600.0;
        let skin_vapor_pressure =
            6.105 * ((17.27 * (skin + KELVIN_OFFSET) - 4717.03) / (237.7 + skin)).exp();
        let burton = 1.0 / (1.0 + 0.92 * hc * rcl);
        let max_evaporation =
            hc * LEWIS_FACTOR * burton * (skin_vapor_pressure - self.vapor_pressure);
        let mut wettedness = sweat / max_evaporation;
        if wettedness > 1.0 {
            wettedness = 1.0;
        }
        let vapor_resistance = (1.0 / (self.clothing_area_factor * hc) + rcl)
            / (LEWIS_FACTOR * PERMEABILITY_INDEX);
        let diffusion =
            (1.0 - wettedness) * (skin_vapor_pressure - self.vapor_pressure) / vapor_resistance;
        let evaporation = -(diffusion + sweat);

        // Radiation and convection for the bare and clothed fractions.
        let tr4 = (self.radiant_temperature + KELVIN_OFFSET).powi(4);
        let skin4 = (skin + KELVIN_OFFSET).powi(4);
        let clothing4 = (clothing + KELVIN_OFFSET).powi(4);
        let radiation_bare = self.radiating_area * (1.0 - facl) * EMISSIVITY_SKIN * STEFAN_BOLTZMANN
            * (tr4 - skin4)
            / self.dubois_area;
        let radiation_clothed = self.radiative_efficiency
            * self.clothed_area
            * EMISSIVITY_CLOTHING
            * STEFAN_BOLTZMANN
            * (tr4 - clothing4)
            / self.dubois_area;
        let convection_bare = hc * (ta - skin) * (1.0 - facl);
        let convection_clothed = hc * (ta - clothing) * self.clothed_area / self.dubois_area;

        // Conduction from core to skin by blood flow and tissue, and through clothing.
        let blood = (vaso_circulation(core, skin) / 3600.0 * SPECIFIC_HEAT_BLOOD + 5.28)
            * (core - skin);
        let through_clothing = self.clothing_conductance * (skin - clothing);

        [
            self.metabolism + self.respiration - blood,
            radiation_bare + convection_bare + evaporation + blood - through_clothing,
            convection_clothed + radiation_clothed + through_clothing,
        ]
    }

    pub(crate) fn balance(&self, temperatures: &BodyTemperatures) -> HeatBalance {
        HeatBalance::from_array(self.residuals(&temperatures.to_array()))
    }

    /// Physiological starting point for the steady-state solve.
    ///
    /// Core starts at its set point and skin splits the gap to the operative
    /// temperature by the tissue and clothing resistances.
    pub(crate) fn initial_guess(&self) -> BodyTemperatures {
        let core = 36.6;
        let operative = (self.air_temperature + self.radiant_temperature) / 2.0;
        let tissue = 1.0 / self.clothing_conductance - self.clothing_resistance;
        let total = tissue + self.clothing_resistance;
        let skin = core * (self.clothing_resistance / total) + operative * (tissue / total);
        let clothing = (self.air_temperature + self.radiant_temperature + skin) / 3.0;
        BodyTemperatures::new(core, skin, clothing)
    }
}

/// Saturation vapor pressure over water in hPa for a temperature in °C.
fn saturation_vapor_pressure(temperature: f64) -> f64 {
    6.105 * (17.27 * temperature / (237.7 + temperature)).exp()
}

/// Radial clothing thickness factor for the cylinder body model.
fn clothing_thickness(clo: f64, height: f64) -> f64 {
    if clo >= 2.0 {
        1.0
    } else if clo > 0.6 {
        (height - 0.2) / height
    } else if clo > 0.3 {
        0.5
    } else if clo > 0.0 {
        0.1
    } else {
        0.0
    }
}

/// Heat conductance of the clothing layer in W/(m²·K).
///
/// The body is treated as a cylinder of the subject's height whose clothed
/// part is wrapped in a coaxial shell.
fn clothing_conductance(
    dubois_area: f64,
    clothed_area: f64,
    area_factor: f64,
    clothed_fraction: f64,
    resistance: f64,
    height: f64,
    thickness: f64,
) -> f64 {
    // 2π, rounded as in the published model.
    let two_pi = 6.28;
    let outer = dubois_area * (area_factor - 1.0 + clothed_fraction) / (two_pi * height * thickness);
    let inner = clothed_fraction * dubois_area / (two_pi * height * thickness);
    (two_pi * height * thickness * (outer - inner))
        / (resistance * (outer / inner).ln() * clothed_area)
}
