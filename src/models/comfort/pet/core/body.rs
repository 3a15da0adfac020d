//! Personal parameters of the PET subject.

use std::{fmt, str::FromStr};

use thiserror::Error;
use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::kilogram,
};

use crate::support::constraint::{
    ConstraintError, NonNegative, StrictlyPositive, UnitInterval, check_at_most, check_range,
};

use super::category::CategoryScale;

/// Body posture of the subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Posture {
    #[default]
    Standing,
    Seated,
    Crouching,
}

impl Posture {
    /// Fraction of the body surface that exchanges radiation with the surroundings.
    #[must_use]
    pub fn radiative_efficiency(self) -> f64 {
        match self {
            Self::Standing | Self::Crouching => 0.725,
            Self::Seated => 0.696,
        }
    }

    /// Convective heat transfer coefficient at standard pressure, W/(m²·K).
    ///
    /// `air_speed` is in m/s.
    #[must_use]
    pub fn convection_coefficient(self, air_speed: f64) -> f64 {
        match self {
            Self::Standing => 2.67 + 6.5 * air_speed.powf(0.67),
            Self::Seated => 2.26 + 7.42 * air_speed.powf(0.67),
            Self::Crouching => 8.6 * air_speed.powf(0.513),
        }
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standing => "standing",
            Self::Seated => "seated",
            Self::Crouching => "crouching",
        })
    }
}

impl FromStr for Posture {
    type Err = BodyParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standing" => Ok(Self::Standing),
            "seated" => Ok(Self::Seated),
            "crouching" => Ok(Self::Crouching),
            _ => Err(BodyParameterError::UnknownPosture(s.to_owned())),
        }
    }
}

/// Errors from building or parsing a [`BodyParameter`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyParameterError {
    #[error("age must be between 0 and 120 years: got {value}")]
    Age {
        value: f64,
        #[source]
        source: ConstraintError,
    },

    #[error("sex must be between 0 (male) and 1 (female): got {value}")]
    Sex {
        value: f64,
        #[source]
        source: ConstraintError,
    },

    #[error("height must be between 0.6 and 3 m: got {value} m")]
    Height {
        value: f64,
        #[source]
        source: ConstraintError,
    },

    #[error("body mass must be greater than 0 and at most 300 kg: got {value} kg")]
    BodyMass {
        value: f64,
        #[source]
        source: ConstraintError,
    },

    #[error("unknown posture `{0}`, expected standing, seated or crouching")]
    UnknownPosture(String),

    #[error("unknown acclimation `{0}`, expected temperate or humid")]
    UnknownAcclimation(String),

    #[error("unknown body parameter flag `{0}`")]
    UnknownFlag(String),

    #[error("missing value for `--{0}`")]
    MissingValue(String),

    #[error("invalid number `{value}` for `--{flag}`")]
    InvalidNumber { flag: String, value: String },
}

/// Personal parameters of the PET subject.
///
/// The default subject is 36 years old, of blended sex (0.5), 1.65 m tall,
/// weighs 62 kg, stands, and is acclimated to a temperate climate.
///
/// The string form mirrors a command line:
///
/// ```
/// use twine_comfort::models::comfort::pet::BodyParameter;
///
/// let body: BodyParameter = "--age 30 --sex 1 --height 1.55 --body-mass 45 \
///     --posture seated --acclimated humid"
///     .parse()
///     .unwrap();
///
/// assert!(body.humid_acclimated());
/// assert_eq!(
///     body.to_string(),
///     "--age 30 --sex 1 --height 1.55 --body-mass 45 --posture seated --acclimated humid"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyParameter {
    age: f64,
    sex: f64,
    height: Length,
    body_mass: Mass,
    posture: Posture,
    humid_acclimated: bool,
}

impl BodyParameter {
    /// Creates validated body parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`BodyParameterError`] if age is outside 0 to 120 years, sex
    /// is outside 0 to 1, height is outside 0.6 to 3 m, or body mass is not
    /// in (0, 300] kg.
    pub fn new(
        age: f64,
        sex: f64,
        height: Length,
        body_mass: Mass,
        posture: Posture,
        humid_acclimated: bool,
    ) -> Result<Self, BodyParameterError> {
        NonNegative::new(age)
            .and_then(|_| check_at_most(&age, &120.0))
            .map_err(|source| BodyParameterError::Age { value: age, source })?;

        UnitInterval::new(sex).map_err(|source| BodyParameterError::Sex { value: sex, source })?;

        let h = height.get::<meter>();
        check_range(&h, &0.6, &3.0)
            .map_err(|source| BodyParameterError::Height { value: h, source })?;

        let m = body_mass.get::<kilogram>();
        StrictlyPositive::new(m)
            .and_then(|_| check_at_most(&m, &300.0))
            .map_err(|source| BodyParameterError::BodyMass { value: m, source })?;

        Ok(Self::new_unchecked(
            age,
            sex,
            height,
            body_mass,
            posture,
            humid_acclimated,
        ))
    }

    /// Creates body parameters without validation.
    ///
    /// Out-of-range values are passed straight to the energy balance.
    #[must_use]
    pub fn new_unchecked(
        age: f64,
        sex: f64,
        height: Length,
        body_mass: Mass,
        posture: Posture,
        humid_acclimated: bool,
    ) -> Self {
        Self {
            age,
            sex,
            height,
            body_mass,
            posture,
            humid_acclimated,
        }
    }

    /// Returns a copy with the given posture.
    #[must_use]
    pub fn with_posture(self, posture: Posture) -> Self {
        Self { posture, ..self }
    }

    /// Returns a copy with the given climate acclimation.
    #[must_use]
    pub fn with_humid_acclimation(self, humid_acclimated: bool) -> Self {
        Self {
            humid_acclimated,
            ..self
        }
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> f64 {
        self.age
    }

    /// Sex as a blend between male (0) and female (1).
    #[must_use]
    pub fn sex(&self) -> f64 {
        self.sex
    }

    #[must_use]
    pub fn height(&self) -> Length {
        self.height
    }

    #[must_use]
    pub fn body_mass(&self) -> Mass {
        self.body_mass
    }

    #[must_use]
    pub fn posture(&self) -> Posture {
        self.posture
    }

    /// Whether the subject is acclimated to a humid (sub)tropical climate.
    #[must_use]
    pub fn humid_acclimated(&self) -> bool {
        self.humid_acclimated
    }

    /// Category scale that matches the subject's climate acclimation.
    #[must_use]
    pub fn category_scale(&self) -> CategoryScale {
        if self.humid_acclimated {
            CategoryScale::Humid
        } else {
            CategoryScale::Temperate
        }
    }
}

impl Default for BodyParameter {
    fn default() -> Self {
        Self::new_unchecked(
            36.0,
            0.5,
            Length::new::<meter>(1.65),
            Mass::new::<kilogram>(62.0),
            Posture::Standing,
            false,
        )
    }
}

impl fmt::Display for BodyParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "--age {} --sex {} --height {} --body-mass {} --posture {}",
            self.age,
            self.sex,
            self.height.get::<meter>(),
            self.body_mass.get::<kilogram>(),
            self.posture,
        )?;
        if self.humid_acclimated {
            f.write_str(" --acclimated humid")?;
        }
        Ok(())
    }
}

impl FromStr for BodyParameter {
    type Err = BodyParameterError;

    /// Parses `--flag value` pairs. Missing flags take their default values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let defaults = Self::default();
        let mut age = defaults.age;
        let mut sex = defaults.sex;
        let mut height = defaults.height.get::<meter>();
        let mut body_mass = defaults.body_mass.get::<kilogram>();
        let mut posture = defaults.posture;
        let mut humid_acclimated = defaults.humid_acclimated;

        let mut tokens = s.split_whitespace();
        while let Some(token) = tokens.next() {
            let flag = token
                .strip_prefix("--")
                .ok_or_else(|| BodyParameterError::UnknownFlag(token.to_owned()))?;
            let value = tokens
                .next()
                .ok_or_else(|| BodyParameterError::MissingValue(flag.to_owned()))?;

            match flag {
                "age" => age = parse_number(flag, value)?,
                "sex" => sex = parse_number(flag, value)?,
                "height" => height = parse_number(flag, value)?,
                "body-mass" => body_mass = parse_number(flag, value)?,
                "posture" => posture = value.parse()?,
                "acclimated" => {
                    humid_acclimated = match value.to_ascii_lowercase().as_str() {
                        "humid" => true,
                        "temperate" => false,
                        _ => {
                            return Err(BodyParameterError::UnknownAcclimation(value.to_owned()));
                        }
                    };
                }
                _ => return Err(BodyParameterError::UnknownFlag(token.to_owned())),
            }
        }

        Self::new(
            age,
            sex,
            Length::new::<meter>(height),
            Mass::new::<kilogram>(body_mass),
            posture,
            humid_acclimated,
        )
    }
}

fn parse_number(flag: &str, value: &str) -> Result<f64, BodyParameterError> {
    value
        .parse()
        .map_err(|_| BodyParameterError::InvalidNumber {
            flag: flag.to_owned(),
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn body(age: f64, sex: f64, height: f64, mass: f64) -> Result<BodyParameter, BodyParameterError> {
        BodyParameter::new(
            age,
            sex,
            Length::new::<meter>(height),
            Mass::new::<kilogram>(mass),
            Posture::Standing,
            false,
        )
    }

    #[test]
    fn default_subject() {
        let body = BodyParameter::default();
        assert_eq!(body.age(), 36.0);
        assert_eq!(body.sex(), 0.5);
        assert_eq!(body.height().get::<meter>(), 1.65);
        assert_eq!(body.body_mass().get::<kilogram>(), 62.0);
        assert_eq!(body.posture(), Posture::Standing);
        assert!(!body.humid_acclimated());
        assert_eq!(body.category_scale(), CategoryScale::Temperate);
    }

    #[test]
    fn accepts_range_endpoints() {
        assert!(body(0.0, 0.0, 0.6, 0.1).is_ok());
        assert!(body(120.0, 1.0, 3.0, 300.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            body(121.0, 0.5, 1.65, 62.0),
            Err(BodyParameterError::Age {
                source: ConstraintError::AboveMaximum,
                ..
            })
        ));
        assert!(matches!(
            body(36.0, -0.1, 1.65, 62.0),
            Err(BodyParameterError::Sex {
                source: ConstraintError::BelowMinimum,
                ..
            })
        ));
        assert!(matches!(
            body(36.0, 0.5, 0.5, 62.0),
            Err(BodyParameterError::Height { .. })
        ));
        assert!(matches!(
            body(36.0, 0.5, 1.65, 0.0),
            Err(BodyParameterError::BodyMass {
                source: ConstraintError::Zero,
                ..
            })
        ));
        assert!(matches!(
            body(36.0, 0.5, 1.65, 301.0),
            Err(BodyParameterError::BodyMass {
                source: ConstraintError::AboveMaximum,
                ..
            })
        ));
        assert!(matches!(
            body(-1.0, 0.5, 1.65, 62.0),
            Err(BodyParameterError::Age {
                source: ConstraintError::Negative,
                ..
            })
        ));
        assert!(matches!(
            body(36.0, 0.5, 1.65, -5.0),
            Err(BodyParameterError::BodyMass {
                source: ConstraintError::Negative,
                ..
            })
        ));
        assert!(matches!(
            body(f64::NAN, 0.5, 1.65, 62.0),
            Err(BodyParameterError::Age {
                source: ConstraintError::NotANumber,
                ..
            })
        ));
    }

    #[test]
    fn posture_strings() {
        assert_eq!("Seated".parse::<Posture>().unwrap(), Posture::Seated);
        assert_eq!(Posture::Crouching.to_string(), "crouching");
        assert!(matches!(
            "lying".parse::<Posture>(),
            Err(BodyParameterError::UnknownPosture(p)) if p == "lying"
        ));
    }

    #[test]
    fn posture_coefficients() {
        assert_eq!(Posture::Standing.radiative_efficiency(), 0.725);
        assert_eq!(Posture::Crouching.radiative_efficiency(), 0.725);
        assert_eq!(Posture::Seated.radiative_efficiency(), 0.696);

        assert_relative_eq!(Posture::Standing.convection_coefficient(1.0), 9.17);
        assert_relative_eq!(Posture::Seated.convection_coefficient(1.0), 9.68);
        assert_relative_eq!(Posture::Crouching.convection_coefficient(1.0), 8.6);
        assert_relative_eq!(
            Posture::Standing.convection_coefficient(0.1),
            4.0597,
            epsilon = 1e-4
        );
    }

    #[test]
    fn default_string_form() {
        assert_eq!(
            BodyParameter::default().to_string(),
            "--age 36 --sex 0.5 --height 1.65 --body-mass 62 --posture standing"
        );
    }

    #[test]
    fn parses_partial_strings_with_defaults() {
        let body: BodyParameter = "--sex 1 --body-mass 45".parse().unwrap();
        assert_eq!(body.sex(), 1.0);
        assert_eq!(body.body_mass().get::<kilogram>(), 45.0);
        assert_eq!(body.age(), 36.0);
        assert_eq!(body.posture(), Posture::Standing);

        let empty: BodyParameter = "".parse().unwrap();
        assert_eq!(empty, BodyParameter::default());
    }

    #[test]
    fn string_form_round_trips() {
        let body = BodyParameter::default()
            .with_posture(Posture::Crouching)
            .with_humid_acclimation(true);
        let parsed: BodyParameter = body.to_string().parse().unwrap();
        assert_eq!(parsed, body);
        assert_eq!(parsed.category_scale(), CategoryScale::Humid);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(matches!(
            "--age".parse::<BodyParameter>(),
            Err(BodyParameterError::MissingValue(flag)) if flag == "age"
        ));
        assert!(matches!(
            "--age old".parse::<BodyParameter>(),
            Err(BodyParameterError::InvalidNumber { .. })
        ));
        assert!(matches!(
            "--weight 70".parse::<BodyParameter>(),
            Err(BodyParameterError::UnknownFlag(_))
        ));
        assert!(matches!(
            "--acclimated arctic".parse::<BodyParameter>(),
            Err(BodyParameterError::UnknownAcclimation(_))
        ));
        assert!(matches!(
            "--age 200".parse::<BodyParameter>(),
            Err(BodyParameterError::Age { .. })
        ));
    }
}
