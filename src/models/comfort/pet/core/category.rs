//! Thermal stress categories derived from PET and core temperature.

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

/// Assessment scale used to classify PET.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryScale {
    /// Matzarakis and Mayer (1996), for temperate climates.
    #[default]
    Temperate,

    /// Lin and Matzarakis (2008), for humid tropical and subtropical climates.
    Humid,
}

impl CategoryScale {
    /// Upper PET bounds in °C of the first eight categories.
    ///
    /// The four cold bounds are exclusive and the four warm bounds inclusive.
    fn bounds(self) -> [f64; 8] {
        match self {
            Self::Temperate => [4.0, 8.0, 13.0, 18.0, 23.0, 29.0, 35.0, 41.0],
            Self::Humid => [14.0, 18.0, 22.0, 26.0, 30.0, 34.0, 38.0, 42.0],
        }
    }
}

/// Level of heat or cold stress associated with a PET value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum PetCategory {
    ExtremeCold = -4,
    StrongCold = -3,
    ModerateCold = -2,
    SlightCold = -1,
    Comfortable = 0,
    SlightHeat = 1,
    ModerateHeat = 2,
    StrongHeat = 3,
    ExtremeHeat = 4,
}

impl PetCategory {
    const ALL: [Self; 9] = [
        Self::ExtremeCold,
        Self::StrongCold,
        Self::ModerateCold,
        Self::SlightCold,
        Self::Comfortable,
        Self::SlightHeat,
        Self::ModerateHeat,
        Self::StrongHeat,
        Self::ExtremeHeat,
    ];

    /// Classifies a PET value on the given scale.
    #[must_use]
    pub fn from_pet(pet: ThermodynamicTemperature, scale: CategoryScale) -> Self {
        let pet = pet.get::<degree_celsius>();
        let index = scale
            .bounds()
            .iter()
            .enumerate()
            .position(|(i, &bound)| if i < 4 { pet < bound } else { pet <= bound })
            .unwrap_or(8);
        Self::ALL[index]
    }

    /// Signed level from -4 (extreme cold) to +4 (extreme heat).
    #[must_use]
    pub fn level(self) -> i8 {
        self as i8
    }

    #[must_use]
    pub fn is_comfortable(self) -> bool {
        self == Self::Comfortable
    }

    #[must_use]
    pub fn thermal_condition(self) -> ThermalCondition {
        match self.level() {
            level if level < 0 => ThermalCondition::Cold,
            0 => ThermalCondition::Neutral,
            _ => ThermalCondition::Hot,
        }
    }
}

/// Whether the subject feels too cold, neutral or too hot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum ThermalCondition {
    Cold = -1,
    Neutral = 0,
    Hot = 1,
}

impl ThermalCondition {
    #[must_use]
    pub fn level(self) -> i8 {
        self as i8
    }
}

/// Clinical classification of core body temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum CoreTemperatureCategory {
    /// Below 35 °C.
    Hypothermia = -2,
    /// From 35 °C up to 36.5 °C.
    Cold = -1,
    /// From 36.5 °C up to 37.5 °C.
    Normal = 0,
    /// From 37.5 °C up to 38.3 °C.
    Hot = 1,
    /// 38.3 °C and above.
    Hyperthermia = 2,
}

impl CoreTemperatureCategory {
    #[must_use]
    pub fn from_core_temperature(core: ThermodynamicTemperature) -> Self {
        let core = core.get::<degree_celsius>();
        if core < 35.0 {
            Self::Hypothermia
        } else if core < 36.5 {
            Self::Cold
        } else if core < 37.5 {
            Self::Normal
        } else if core < 38.3 {
            Self::Hot
        } else {
            Self::Hyperthermia
        }
    }

    #[must_use]
    pub fn level(self) -> i8 {
        self as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn temperate(pet: f64) -> i8 {
        PetCategory::from_pet(celsius(pet), CategoryScale::Temperate).level()
    }

    fn humid(pet: f64) -> i8 {
        PetCategory::from_pet(celsius(pet), CategoryScale::Humid).level()
    }

    #[test]
    fn temperate_scale() {
        let cases = [
            (-10.0, -4),
            (4.0, -3),
            (7.9, -3),
            (8.0, -2),
            (13.0, -1),
            (17.9, -1),
            (18.0, 0),
            (22.3, 0),
            (23.5, 1),
            (29.5, 2),
            (35.5, 3),
            (41.5, 4),
            (60.0, 4),
        ];
        for (pet, level) in cases {
            assert_eq!(temperate(pet), level, "PET {pet}");
        }
    }

    #[test]
    fn humid_scale() {
        let cases = [
            (13.9, -4),
            (14.0, -3),
            (18.0, -2),
            (22.0, -1),
            (26.0, 0),
            (29.9, 0),
            (31.0, 1),
            (35.0, 2),
            (39.0, 3),
            (42.5, 4),
        ];
        for (pet, level) in cases {
            assert_eq!(humid(pet), level, "PET {pet}");
        }
    }

    #[test]
    fn warm_bounds_are_inclusive() {
        assert_eq!(temperate(23.0), 0);
        assert_eq!(temperate(29.0), 1);
        assert_eq!(temperate(35.0), 2);
        assert_eq!(temperate(41.0), 3);
        assert_eq!(humid(30.0), 0);
        assert_eq!(humid(42.0), 3);
    }

    #[test]
    fn conditions_follow_the_sign() {
        assert_eq!(
            PetCategory::SlightCold.thermal_condition(),
            ThermalCondition::Cold
        );
        assert_eq!(
            PetCategory::Comfortable.thermal_condition(),
            ThermalCondition::Neutral
        );
        assert_eq!(
            PetCategory::ExtremeHeat.thermal_condition(),
            ThermalCondition::Hot
        );
        assert!(PetCategory::Comfortable.is_comfortable());
        assert!(!PetCategory::SlightHeat.is_comfortable());
        assert_eq!(ThermalCondition::Hot.level(), 1);
    }

    #[test]
    fn core_temperature_categories() {
        let cases = [
            (22.8, CoreTemperatureCategory::Hypothermia),
            (35.0, CoreTemperatureCategory::Cold),
            (36.5, CoreTemperatureCategory::Normal),
            (36.9, CoreTemperatureCategory::Normal),
            (37.5, CoreTemperatureCategory::Hot),
            (38.4, CoreTemperatureCategory::Hyperthermia),
            (39.3, CoreTemperatureCategory::Hyperthermia),
        ];
        for (core, category) in cases {
            assert_eq!(
                CoreTemperatureCategory::from_core_temperature(celsius(core)),
                category,
                "core {core}"
            );
        }
        assert_eq!(CoreTemperatureCategory::Hyperthermia.level(), 2);
    }
}
