use crate::CompassError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Levels a card status is recorded at.
pub const STATUS_LEVELS: [u32; 6] = [1, 20, 30, 40, 50, 60];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub attack: f64,
    pub defense: f64,
    pub physical: f64,
}

impl Parameter {
    pub fn new(attack: f64, defense: f64, physical: f64) -> Self {
        Self {
            attack,
            defense,
            physical,
        }
    }
}

impl Add for Parameter {
    type Output = Parameter;

    fn add(self, rhs: Self) -> Self::Output {
        Parameter::new(
            self.attack + rhs.attack,
            self.defense + rhs.defense,
            self.physical + rhs.physical,
        )
    }
}

impl AddAssign for Parameter {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Parameter {
    type Output = Parameter;

    fn sub(self, rhs: Self) -> Self::Output {
        Parameter::new(
            self.attack - rhs.attack,
            self.defense - rhs.defense,
            self.physical - rhs.physical,
        )
    }
}

/// Component-wise, used to apply card multipliers to a hero's base stats.
impl Mul for Parameter {
    type Output = Parameter;

    fn mul(self, rhs: Self) -> Self::Output {
        Parameter::new(
            self.attack * rhs.attack,
            self.defense * rhs.defense,
            self.physical * rhs.physical,
        )
    }
}

impl Div for Parameter {
    type Output = Parameter;

    fn div(self, rhs: Self) -> Self::Output {
        Parameter::new(
            self.attack / rhs.attack,
            self.defense / rhs.defense,
            self.physical / rhs.physical,
        )
    }
}

impl std::iter::Sum for Parameter {
    fn sum<I: Iterator<Item = Parameter>>(iter: I) -> Self {
        iter.fold(Parameter::default(), Add::add)
    }
}

/// A card's parameters at each of [`STATUS_LEVELS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    levels: [Parameter; 6],
}

impl Status {
    /// Builds from per-stat maps keyed by level (`"1"`, `"20"`, ...).
    pub fn from_level_maps(
        attack: &BTreeMap<String, f64>,
        defense: &BTreeMap<String, f64>,
        physical: &BTreeMap<String, f64>,
    ) -> Result<Self, CompassError> {
        let mut levels = [Parameter::default(); 6];
        for (slot, level) in STATUS_LEVELS.iter().enumerate() {
            let key = level.to_string();
            let stat = |map: &BTreeMap<String, f64>, name: &'static str| {
                map.get(&key)
                    .copied()
                    .ok_or_else(|| CompassError::unknown(name, format!("level {key}")))
            };
            levels[slot] = Parameter::new(
                stat(attack, "attack")?,
                stat(defense, "defense")?,
                stat(physical, "physical")?,
            );
        }
        Ok(Self { levels })
    }

    pub fn uniform(parameter: Parameter) -> Self {
        Self {
            levels: [parameter; 6],
        }
    }

    pub fn at(&self, level: u32) -> Result<Parameter, CompassError> {
        STATUS_LEVELS
            .iter()
            .position(|known| *known == level)
            .map(|slot| self.levels[slot])
            .ok_or_else(|| CompassError::unknown("level", level.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_map(values: [f64; 6]) -> BTreeMap<String, f64> {
        STATUS_LEVELS
            .iter()
            .zip(values)
            .map(|(level, value)| (level.to_string(), value))
            .collect()
    }

    #[test]
    fn parameter_arithmetic_is_component_wise() {
        let a = Parameter::new(10.0, 20.0, 30.0);
        let b = Parameter::new(1.0, 2.0, 3.0);
        assert_eq!(a + b, Parameter::new(11.0, 22.0, 33.0));
        assert_eq!(a - b, Parameter::new(9.0, 18.0, 27.0));
        assert_eq!(a * b, Parameter::new(10.0, 40.0, 90.0));
        assert_eq!(a / b, Parameter::new(10.0, 10.0, 10.0));
        let total: Parameter = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Parameter::new(12.0, 24.0, 36.0));
    }

    #[test]
    fn status_reads_each_recorded_level() {
        let status = Status::from_level_maps(
            &level_map([1.0, 20.0, 30.0, 40.0, 50.0, 60.0]),
            &level_map([0.0; 6]),
            &level_map([100.0; 6]),
        )
        .expect("status");
        assert_eq!(status.at(40).expect("level").attack, 40.0);
        assert_eq!(status.at(1).expect("level").physical, 100.0);
        assert!(status.at(45).is_err());
    }

    #[test]
    fn missing_level_is_reported() {
        let mut attack = level_map([1.0; 6]);
        attack.remove("50");
        let err = Status::from_level_maps(&attack, &level_map([0.0; 6]), &level_map([0.0; 6]))
            .expect_err("missing level");
        assert!(err.to_string().contains("level 50"));
    }
}
