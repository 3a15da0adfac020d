//! Steady-state body temperatures in the actual environment.

use tracing::{debug, warn};

use crate::support::{bisect, newton};

use super::PetError;
use crate::models::comfort::pet::core::{BodyTemperatures, PetConfig, memi::MemiModel};

/// Search interval in °C for each level of the nested bisection.
const NESTED_BRACKET: [f64; 2] = [-100.0, 100.0];

/// Finds node temperatures at which every MEMI flux vanishes.
///
/// Newton iteration starts from the physiological guess, then from the
/// midpoint of the body state bounds. If both fail, the nodes are solved one
/// at a time by nested bisection and the result is checked against the
/// balance tolerance.
pub(super) fn solve(model: &MemiModel, config: &PetConfig) -> Result<BodyTemperatures, PetError> {
    let newton_config = config.newton();

    for start in [model.initial_guess(), config.fallback_start()] {
        match newton::solve(|t| model.residuals(t), start.to_array(), &newton_config) {
            Ok(solution) => return Ok(BodyTemperatures::from_array(solution.x)),
            Err(error) => debug!(?start, %error, "newton solve of body temperatures failed"),
        }
    }

    nested(model, config)
}

/// Solves clothing inside skin inside core by scalar bisection.
fn nested(model: &MemiModel, config: &PetConfig) -> Result<BodyTemperatures, PetError> {
    let bisection = config.nested_bisection();

    let clothing_for = |core: f64, skin: f64| {
        bisect::find_root(
            |clothing| Some(model.residuals(&[core, skin, clothing])[2]),
            NESTED_BRACKET,
            &bisection,
        )
        .ok()
        .map(|root| root.x)
    };

    let skin_for = |core: f64| {
        bisect::find_root(
            |skin| {
                let clothing = clothing_for(core, skin)?;
                Some(model.residuals(&[core, skin, clothing])[1])
            },
            NESTED_BRACKET,
            &bisection,
        )
        .ok()
        .map(|root| root.x)
    };

    let state_for = |core: f64| {
        let skin = skin_for(core)?;
        let clothing = clothing_for(core, skin)?;
        Some(BodyTemperatures::new(core, skin, clothing))
    };

    let core = bisect::find_root(
        |core| {
            let state = state_for(core)?;
            Some(model.residuals(&state.to_array())[0])
        },
        NESTED_BRACKET,
        &bisection,
    );

    let Some(state) = core.as_ref().ok().and_then(|root| state_for(root.x)) else {
        if let Err(error) = core {
            warn!(%error, "nested bisection of body temperatures failed");
        }
        return Err(PetError::BodyState { residuals: None });
    };

    let balance = model.balance(&state);
    if !balance.is_balanced(config.balance_tol) {
        warn!(?balance, "nested bisection left an unbalanced body state");
        return Err(PetError::BodyState {
            residuals: Some(balance),
        });
    }

    debug!(?state, "body temperatures found by nested bisection");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Ratio, ThermodynamicTemperature, Velocity},
        ratio::percent,
        thermodynamic_temperature::degree_celsius,
        velocity::meter_per_second,
    };

    use crate::models::comfort::pet::core::{BodyParameter, Conditions, memi::Environment};

    fn model(ta: f64, tr: f64, air_speed: f64, clo: f64) -> MemiModel {
        let conditions = Conditions::new(
            ThermodynamicTemperature::new::<degree_celsius>(ta),
            ThermodynamicTemperature::new::<degree_celsius>(tr),
            Velocity::new::<meter_per_second>(air_speed),
            Ratio::new::<percent>(50.0),
            2.3,
            clo,
        );
        MemiModel::new(&conditions, &BodyParameter::default(), Environment::Actual)
    }

    #[test]
    fn newton_finds_published_state() {
        let state = solve(&model(20.0, 30.0, 1.0, 1.0), &PetConfig::default()).unwrap();
        assert_relative_eq!(state.core, 36.885, max_relative = 1e-3);
        assert_relative_eq!(state.skin, 28.81, max_relative = 1e-3);
        assert_relative_eq!(state.clothing, 24.61, max_relative = 1e-3);
    }

    #[test]
    fn nested_bisection_agrees_with_newton() {
        let config = PetConfig::default();
        for model in [
            model(20.0, 30.0, 1.0, 1.0),
            model(-20.0, 10.0, 1.0, 1.0),
            model(30.0, 60.0, 1.0, 1.0),
        ] {
            let newton = solve(&model, &config).unwrap();
            let nested = nested(&model, &config).unwrap();
            assert_relative_eq!(nested.core, newton.core, epsilon = 1e-2);
            assert_relative_eq!(nested.skin, newton.skin, epsilon = 1e-2);
            assert_relative_eq!(nested.clothing, newton.clothing, epsilon = 1e-2);
        }
    }

    #[test]
    fn solutions_are_balanced() {
        let config = PetConfig::default();
        let model = model(-20.0, 10.0, 1.0, 1.0);
        let state = solve(&model, &config).unwrap();
        assert!(model.balance(&state).is_balanced(config.balance_tol));
    }

    #[test]
    fn zero_clothing_fails_every_stage() {
        let result = solve(&model(20.0, 20.0, 0.1, 0.0), &PetConfig::default());
        assert!(matches!(result, Err(PetError::BodyState { .. })));
    }
}
