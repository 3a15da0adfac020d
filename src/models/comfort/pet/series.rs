//! PET over a series of time steps for one subject.
//!
//! Every input other than air temperature may be a full series or a single
//! constant applied to all steps. Missing inputs take the defaults of an
//! outdoor walking subject: radiant temperature equal to air temperature,
//! 0.1 m/s air speed, 2.4 met, 0.7 clo and standard pressure.
//!
//! With the `parallel` feature the steps are evaluated on the rayon thread
//! pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;
use twine_core::Model;
use uom::si::{
    f64::{Pressure, Ratio, ThermodynamicTemperature, Velocity},
    ratio::percent,
    velocity::meter_per_second,
};

use super::{
    BodyParameter, CategoryScale, Conditions, CoreTemperatureCategory, Pet, PetCategory,
    PetConfig, PetError, PetResults, ThermalCondition,
};

/// A series input, either one value per step or a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Values<T> {
    Constant(T),
    Series(Vec<T>),
}

impl<T: Copy> Values<T> {
    fn len(&self) -> Option<usize> {
        match self {
            Self::Constant(_) => None,
            Self::Series(values) => Some(values.len()),
        }
    }

    fn at(&self, index: usize) -> T {
        match self {
            Self::Constant(value) => *value,
            Self::Series(values) => values[index],
        }
    }
}

/// Inputs to a [`PetSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInputs {
    pub air_temperature: Vec<ThermodynamicTemperature>,
    pub relative_humidity: Values<Ratio>,

    /// Mean radiant temperature, or `None` to use the air temperature.
    pub radiant_temperature: Option<Values<ThermodynamicTemperature>>,
    pub air_speed: Values<Velocity>,
    pub met: Values<f64>,
    pub clo: Values<f64>,
    pub pressure: Values<Pressure>,
}

impl SeriesInputs {
    /// Creates inputs with default values for everything but air temperature
    /// and humidity.
    #[must_use]
    pub fn new(
        air_temperature: Vec<ThermodynamicTemperature>,
        relative_humidity: Values<Ratio>,
    ) -> Self {
        Self {
            air_temperature,
            relative_humidity,
            radiant_temperature: None,
            air_speed: Values::Constant(Velocity::new::<meter_per_second>(0.1)),
            met: Values::Constant(2.4),
            clo: Values::Constant(0.7),
            pressure: Values::Constant(Conditions::standard_pressure()),
        }
    }

    /// Number of steps, after checking that every series is aligned.
    fn steps(&self) -> Result<usize, SeriesError> {
        let expected = self.air_temperature.len();
        if expected == 0 {
            return Err(SeriesError::Empty);
        }

        let lengths = [
            ("relative_humidity", self.relative_humidity.len()),
            (
                "radiant_temperature",
                self.radiant_temperature.as_ref().and_then(Values::len),
            ),
            ("air_speed", self.air_speed.len()),
            ("met", self.met.len()),
            ("clo", self.clo.len()),
            ("pressure", self.pressure.len()),
        ];

        for (input, found) in lengths {
            match found {
                Some(found) if found != expected => {
                    return Err(SeriesError::Misaligned {
                        input,
                        expected,
                        found,
                    });
                }
                _ => {}
            }
        }

        Ok(expected)
    }

    fn conditions_at(&self, index: usize) -> Conditions {
        let air = self.air_temperature[index];
        let radiant = self
            .radiant_temperature
            .as_ref()
            .map_or(air, |values| values.at(index));

        Conditions::new(
            air,
            radiant,
            self.air_speed.at(index),
            self.relative_humidity.at(index),
            self.met.at(index),
            self.clo.at(index),
        )
        .with_pressure(self.pressure.at(index))
    }
}

/// Errors that can occur while computing a [`PetSeries`].
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("air temperature series is empty")]
    Empty,

    #[error("`{input}` has {found} values but air temperature has {expected}")]
    Misaligned {
        input: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("PET calculation failed at step {index}")]
    Step {
        index: usize,
        #[source]
        source: PetError,
    },
}

/// Results and comfort assessment of one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStep {
    pub conditions: Conditions,
    pub results: PetResults,
    pub pet_category: PetCategory,
    pub core_temperature_category: CoreTemperatureCategory,
}

impl SeriesStep {
    fn new(conditions: Conditions, results: PetResults, scale: CategoryScale) -> Self {
        Self {
            conditions,
            results,
            pet_category: results.pet_category(scale),
            core_temperature_category: results.core_temperature_category(),
        }
    }

    #[must_use]
    pub fn operative_temperature(&self) -> ThermodynamicTemperature {
        self.conditions.operative_temperature()
    }

    #[must_use]
    pub fn is_comfortable(&self) -> bool {
        self.pet_category.is_comfortable()
    }

    #[must_use]
    pub fn thermal_condition(&self) -> ThermalCondition {
        self.pet_category.thermal_condition()
    }
}

/// PET results for every step of a series.
///
/// Categories use the scale matching the subject's climate acclimation.
#[derive(Debug, Clone, PartialEq)]
pub struct PetSeries {
    body: BodyParameter,
    steps: Vec<SeriesStep>,
}

impl PetSeries {
    /// Computes PET for every step.
    ///
    /// # Errors
    ///
    /// Returns a [`SeriesError`] if the inputs are empty or misaligned, or
    /// if any step fails to solve.
    pub fn compute(
        inputs: &SeriesInputs,
        body: &BodyParameter,
        config: &PetConfig,
    ) -> Result<Self, SeriesError> {
        let len = inputs.steps()?;
        let conditions: Vec<Conditions> = (0..len).map(|i| inputs.conditions_at(i)).collect();
        let model = Pet::new(*body, *config);
        let scale = body.category_scale();

        let steps = conditions
            .iter()
            .zip(evaluate(&model, &conditions))
            .enumerate()
            .map(|(index, (conditions, result))| {
                result
                    .map(|results| SeriesStep::new(*conditions, results, scale))
                    .map_err(|source| SeriesError::Step { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { body: *body, steps })
    }

    #[must_use]
    pub fn body(&self) -> &BodyParameter {
        &self.body
    }

    #[must_use]
    pub fn steps(&self) -> &[SeriesStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn pet(&self) -> impl Iterator<Item = ThermodynamicTemperature> + '_ {
        self.steps.iter().map(|step| step.results.pet)
    }

    pub fn core_temperature(&self) -> impl Iterator<Item = ThermodynamicTemperature> + '_ {
        self.steps.iter().map(|step| step.results.t_core)
    }

    pub fn skin_temperature(&self) -> impl Iterator<Item = ThermodynamicTemperature> + '_ {
        self.steps.iter().map(|step| step.results.t_skin)
    }

    pub fn clothing_temperature(&self) -> impl Iterator<Item = ThermodynamicTemperature> + '_ {
        self.steps.iter().map(|step| step.results.t_clo)
    }

    pub fn operative_temperature(&self) -> impl Iterator<Item = ThermodynamicTemperature> + '_ {
        self.steps.iter().map(SeriesStep::operative_temperature)
    }

    pub fn is_comfortable(&self) -> impl Iterator<Item = bool> + '_ {
        self.steps.iter().map(SeriesStep::is_comfortable)
    }

    pub fn thermal_condition(&self) -> impl Iterator<Item = ThermalCondition> + '_ {
        self.steps.iter().map(SeriesStep::thermal_condition)
    }

    pub fn pet_category(&self) -> impl Iterator<Item = PetCategory> + '_ {
        self.steps.iter().map(|step| step.pet_category)
    }

    pub fn core_temperature_category(&self) -> impl Iterator<Item = CoreTemperatureCategory> + '_ {
        self.steps.iter().map(|step| step.core_temperature_category)
    }

    /// Whether each PET is an end of the reference search range.
    pub fn at_limit(&self) -> impl Iterator<Item = bool> + '_ {
        self.steps.iter().map(|step| step.results.at_limit)
    }

    /// Share of steps in the comfortable PET category.
    #[must_use]
    pub fn percent_comfortable(&self) -> Ratio {
        self.share(SeriesStep::is_comfortable)
    }

    #[must_use]
    pub fn percent_uncomfortable(&self) -> Ratio {
        Ratio::new::<percent>(100.0) - self.percent_comfortable()
    }

    #[must_use]
    pub fn percent_neutral(&self) -> Ratio {
        self.share(|step| step.thermal_condition() == ThermalCondition::Neutral)
    }

    #[must_use]
    pub fn percent_hot(&self) -> Ratio {
        self.share(|step| step.thermal_condition() == ThermalCondition::Hot)
    }

    #[must_use]
    pub fn percent_cold(&self) -> Ratio {
        self.share(|step| step.thermal_condition() == ThermalCondition::Cold)
    }

    #[allow(clippy::cast_precision_loss)]
    fn share(&self, predicate: impl Fn(&SeriesStep) -> bool) -> Ratio {
        let count = self.steps.iter().filter(|step| predicate(step)).count();
        Ratio::new::<percent>(100.0 * count as f64 / self.steps.len() as f64)
    }
}

#[cfg(feature = "parallel")]
fn evaluate(model: &Pet, conditions: &[Conditions]) -> Vec<Result<PetResults, PetError>> {
    conditions.par_iter().map(|c| model.call(c)).collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate(model: &Pet, conditions: &[Conditions]) -> Vec<Result<PetResults, PetError>> {
    conditions.iter().map(|c| model.call(c)).collect()
}
