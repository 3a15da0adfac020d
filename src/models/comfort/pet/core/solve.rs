//! Two-stage PET solve.
//!
//! The first stage finds the steady-state body temperatures of the subject
//! in the actual environment. The second stage holds those temperatures
//! fixed and searches for the air temperature of the reference environment
//! in which the same body state is in balance. That temperature is the PET.

mod body_state;
mod error;
mod reference;

pub use error::PetError;

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

use super::{BodyParameter, Conditions, PetConfig, PetResults, memi::Environment, memi::MemiModel};

/// Calculates the physiological equivalent temperature.
///
/// # Errors
///
/// Returns [`PetError::BodyState`] if no steady state exists for the actual
/// environment, [`PetError::Reference`] if the reference balance is not
/// finite at the ends of the search range, or a solver error if bisection
/// fails.
///
/// A body state that no reference temperature in the range can balance is
/// not an error. The nearest end of the range is returned as the PET with
/// [`PetResults::at_limit`] set.
pub fn physiologic_equivalent_temperature(
    conditions: &Conditions,
    body: &BodyParameter,
    config: &PetConfig,
) -> Result<PetResults, PetError> {
    let actual = MemiModel::new(conditions, body, Environment::Actual);
    let state = body_state::solve(&actual, config)?;
    let reference = reference::solve(state, conditions, body, config)?;

    Ok(PetResults {
        pet: reference.temperature,
        t_core: celsius(state.core),
        t_skin: celsius(state.skin),
        t_clo: celsius(state.clothing),
        at_limit: reference.at_limit,
    })
}

fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{
        f64::{Length, Mass, Pressure, Ratio, Velocity},
        length::meter,
        mass::kilogram,
        pressure::pascal,
        ratio::percent,
        velocity::meter_per_second,
    };

    use crate::models::comfort::pet::core::{BodyTemperatures, Posture, memi::memi_balance};

    fn conditions(ta: f64, tr: f64, air_speed: f64, rh: f64, met: f64, clo: f64) -> Conditions {
        Conditions::new(
            celsius(ta),
            celsius(tr),
            Velocity::new::<meter_per_second>(air_speed),
            Ratio::new::<percent>(rh),
            met,
            clo,
        )
    }

    fn pet(conditions: &Conditions) -> Result<PetResults, PetError> {
        physiologic_equivalent_temperature(conditions, &BodyParameter::default(), &PetConfig::default())
    }

    fn c(t: ThermodynamicTemperature) -> f64 {
        t.get::<degree_celsius>()
    }

    #[test]
    fn published_validation_cases() {
        let cases = [
            ((-20.0, 10.0), (-16.9, 22.8, 4.04, -7.78)),
            ((20.0, 30.0), (22.3, 36.88, 28.8, 24.6)),
            ((30.0, 60.0), (42.5, 39.28, 38.18, 40.29)),
        ];

        for ((ta, tr), (expected_pet, core, skin, clothing)) in cases {
            let results = pet(&conditions(ta, tr, 1.0, 50.0, 2.3, 1.0)).unwrap();
            assert_relative_eq!(c(results.pet), expected_pet, max_relative = 1e-2);
            assert_relative_eq!(c(results.t_core), core, max_relative = 1e-2);
            assert_relative_eq!(c(results.t_skin), skin, max_relative = 1e-2);
            assert_relative_eq!(c(results.t_clo), clothing, max_relative = 1e-2);
        }
    }

    #[test]
    fn returned_body_state_is_balanced() {
        let body = BodyParameter::default();
        let config = PetConfig::default();
        for (ta, tr) in [(-20.0, 10.0), (20.0, 30.0), (30.0, 60.0)] {
            let conditions = conditions(ta, tr, 1.0, 50.0, 2.3, 1.0);
            let results = physiologic_equivalent_temperature(&conditions, &body, &config).unwrap();
            let state =
                BodyTemperatures::new(c(results.t_core), c(results.t_skin), c(results.t_clo));
            let balance = memi_balance(&state, &conditions, &body, Environment::Actual);
            assert!(balance.is_balanced(config.balance_tol), "{balance:?}");
        }
    }

    #[test]
    fn reference_balance_changes_sign_at_pet() {
        let body = BodyParameter::default();
        let config = PetConfig::default();
        let conditions = conditions(20.0, 30.0, 1.0, 50.0, 2.3, 1.0);
        let results = physiologic_equivalent_temperature(&conditions, &body, &config).unwrap();
        let state = BodyTemperatures::new(c(results.t_core), c(results.t_skin), c(results.t_clo));

        let net = |t: f64| {
            let reference = Conditions::reference(celsius(t), conditions.met, conditions.pressure);
            memi_balance(&state, &reference, &body, Environment::Reference)
                .net()
                .value
        };

        let margin = 2.0 * config.temp_tol.value;
        assert!(net(c(results.pet) - margin) <= 0.0);
        assert!(net(c(results.pet) + margin) >= 0.0);
    }

    #[test]
    fn personal_and_site_parameters_matter() {
        let base = conditions(20.0, 30.0, 1.0, 50.0, 2.3, 1.0);
        let config = PetConfig::default();
        let solve = |body: &BodyParameter, conditions: &Conditions| {
            c(physiologic_equivalent_temperature(conditions, body, &config)
                .unwrap()
                .pet)
        };

        let standing = BodyParameter::default();
        let seated = standing.with_posture(Posture::Seated);
        let crouching = standing.with_posture(Posture::Crouching);
        let female = BodyParameter::new(
            36.0,
            1.0,
            Length::new::<meter>(1.55),
            Mass::new::<kilogram>(45.0),
            Posture::Standing,
            false,
        )
        .unwrap();
        let high_site = base.with_pressure(Pressure::new::<pascal>(80_000.0));

        assert_relative_eq!(solve(&seated, &base), 21.64, max_relative = 1e-2);
        assert_relative_eq!(solve(&crouching, &base), 20.55, max_relative = 1e-2);
        assert_relative_eq!(solve(&female, &base), 21.41, max_relative = 1e-2);
        assert_relative_eq!(solve(&standing, &high_site), 22.46, max_relative = 1e-2);
    }

    #[test]
    fn neutral_indoor_conditions() {
        let results = pet(&conditions(24.0, 24.0, 0.1, 50.0, 2.4, 0.7)).unwrap();
        assert_relative_eq!(c(results.pet), 26.79, max_relative = 1e-2);
    }

    #[test]
    fn body_state_bounds_terminate() {
        let cold = pet(&conditions(35.0, -10.0, 1.0, 50.0, 2.3, 1.0)).unwrap();
        assert_relative_eq!(c(cold.pet), 24.79, max_relative = 1e-2);
        assert!(!cold.at_limit);

        let hot = pet(&conditions(41.0, 60.0, 1.0, 50.0, 2.3, 1.0)).unwrap();
        assert_relative_eq!(c(hot.pet), 52.73, max_relative = 1e-2);
        assert!(!hot.at_limit);
    }

    #[test]
    fn extreme_environments_saturate_at_search_limits() {
        let [lo, hi] = PetConfig::default().reference_bracket();

        let frozen = pet(&conditions(-40.0, -40.0, 12.0, 50.0, 1.0, 0.1)).unwrap();
        assert!(frozen.at_limit);
        assert_relative_eq!(c(frozen.pet), lo, epsilon = 1e-9);

        for (ta, tr, rh, met, clo) in [
            (40.0, 70.0, 50.0, 2.3, 1.0),
            (45.0, 45.0, 95.0, 2.3, 2.0),
            (50.0, 80.0, 95.0, 4.0, 2.5),
        ] {
            let results = pet(&conditions(ta, tr, 0.1, rh, met, clo)).unwrap();
            assert!(results.at_limit);
            assert_relative_eq!(c(results.pet), hi, epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_clothing_is_an_error() {
        assert!(matches!(
            pet(&conditions(20.0, 20.0, 0.1, 50.0, 2.3, 0.0)),
            Err(PetError::BodyState { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn pet_does_not_decrease_with_temperature(
            ta in -10.0..35.0_f64,
            dt in 0.0..20.0_f64,
            air_speed in 0.1..5.0_f64,
            rh in 20.0..80.0_f64,
            met in 0.8..3.0_f64,
            clo in 0.3..1.5_f64,
            step in 1.0..5.0_f64,
        ) {
            let tr = ta + dt;
            let base = pet(&conditions(ta, tr, air_speed, rh, met, clo));
            let warmer_air = pet(&conditions(ta + step, tr, air_speed, rh, met, clo));
            let warmer_radiant = pet(&conditions(ta, tr + step, air_speed, rh, met, clo));

            let (Ok(base), Ok(warmer_air), Ok(warmer_radiant)) = (base, warmer_air, warmer_radiant) else {
                return Err(TestCaseError::reject("no solution"));
            };

            let slack = 2.0 * PetConfig::default().temp_tol.value;
            prop_assert!(c(warmer_air.pet) >= c(base.pet) - slack);
            prop_assert!(c(warmer_radiant.pet) >= c(base.pet) - slack);
        }
    }
}
