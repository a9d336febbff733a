//! Angle type to robustly represent angles in either degrees or radians.
use std::{error::Error, fmt::Display};

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, PartialEq)]
pub enum AngleError {
    OutOfRangeRadians(f64),
    OutOfRangeDegrees(f64),
}

impl Display for AngleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AngleError::OutOfRangeRadians(value) => {
                write!(f, "Angle value {} is not inside [0,2π]", value)
            }
            AngleError::OutOfRangeDegrees(value) => {
                write!(f, "Angle value {} is not inside [0,360]", value)
            }
        }
    }
}

impl Error for AngleError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Angle(f64);

pub type Result<T> = std::result::Result<T, AngleError>;

impl Angle {
    pub fn new(value: f64) -> Result<Self> {
        if value < 0.0 || value > 2.0 * std::f64::consts::PI {
            return Err(AngleError::OutOfRangeRadians(value));
        }
        Ok(Self(value))
    }

    pub fn from_degrees(value: f64) -> Result<Self> {
        if value < 0.0 || value > 360.0 {
            return Err(AngleError::OutOfRangeDegrees(value));
        }
        Ok(Self(value.to_radians()))
    }

    pub fn as_radians(&self) -> f64 {
        self.0
    }

    pub fn as_degrees(&self) -> f64 {
        self.0.to_degrees()
    }

    /// Wraps a raw degree value into the half-open interval [0, 360), the
    /// convention `alpha_beta_from_xy` uses for the shoulder angle.
    pub fn wrap_degrees(value: f64) -> f64 {
        let wrapped = value % 360.0;
        if wrapped < 0.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Adds two angles together
    /// wraps the result to the interval [0, 2π]
    pub fn add(&self, other: Angle) -> Self {
        let sum = self.0 + other.0;
        let wrapped = sum % (2.0 * std::f64::consts::PI);
        Self(wrapped)
    }

    /// Subtracts two angles
    /// wraps the result to the interval [0, 2π]
    pub fn sub(&self, other: Angle) -> Self {
        let diff = self.0 - other.0;
        let wrapped = (diff + 2.0 * std::f64::consts::PI) % (2.0 * std::f64::consts::PI);
        Self(wrapped)
    }
}

impl std::ops::Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Angle::add(&self, rhs)
    }
}

impl std::ops::Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Angle::sub(&self, rhs)
    }
}

/// Convert a floating point number (radians) to an [`Angle`].
/// Returns an error if the value is not in the interval [0, 2π].
/// Explicity call `Angle::from_degrees` if you want to input degrees.
impl TryFrom<f64> for Angle {
    type Error = AngleError;

    fn try_from(value: f64) -> Result<Self> {
        Angle::new(value)
    }
}

impl<'de> Deserialize<'de> for Angle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Angle, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Angle::try_from(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_new() {
        assert!(Angle::new(-1.0).is_err());
        assert!(Angle::new(0.0).is_ok());
        assert!(Angle::new(2.0 * std::f64::consts::PI).is_ok());
        assert!(Angle::new(2.0 * std::f64::consts::PI + 1.0).is_err());
    }

    #[test]
    fn test_from_degrees() {
        assert!(Angle::from_degrees(-1.0).is_err());
        assert!(Angle::from_degrees(0.0).is_ok());
        assert!(Angle::from_degrees(360.0).is_ok());
        assert!(Angle::from_degrees(361.0).is_err());
    }

    #[test]
    fn test_as_degrees_roundtrip() {
        let angle = Angle::from_degrees(180.0).unwrap();
        assert_abs_diff_eq!(angle.as_degrees(), 180.0, epsilon = 1e-6);
    }

    #[test]
    fn test_add_sub() {
        let a = Angle::from_degrees(180.0).unwrap();
        let b = Angle::from_degrees(270.0).unwrap();
        assert_abs_diff_eq!((a + b).as_degrees(), 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!((a - b).as_degrees(), 270.0, epsilon = 1e-6);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_abs_diff_eq!(Angle::wrap_degrees(-10.0), 350.0, epsilon = 1e-9);
        assert_abs_diff_eq!(Angle::wrap_degrees(370.0), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(Angle::wrap_degrees(0.0), 0.0, epsilon = 1e-9);
    }
}
