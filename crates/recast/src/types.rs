use crate::{traits::FieldValue, value::Value};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// FloatError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FloatError {
    #[error("non-finite float value")]
    NonFinite,
}

///
/// Float32
///
/// Finite f32 only; -0.0 canonically stored as 0.0
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Display, Serialize)]
pub struct Float32(f32);

impl Float32 {
    /// Fallible constructor that rejects non-finite values and normalizes -0.0.
    #[must_use]
    pub fn try_new(v: f32) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }

        // canonicalize -0.0 to 0.0 so Eq stays consistent
        Some(Self(if v == 0.0 { 0.0 } else { v }))
    }

    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Eq for Float32 {}

impl PartialEq for Float32 {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl FieldValue for Float32 {
    fn to_value(&self) -> Value {
        Value::Float32(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float32(v) => Some(*v),
            _ => None,
        }
    }
}

impl TryFrom<f32> for Float32 {
    type Error = FloatError;

    fn try_from(v: f32) -> Result<Self, Self::Error> {
        Self::try_new(v).ok_or(FloatError::NonFinite)
    }
}

impl From<Float32> for f32 {
    fn from(x: Float32) -> Self {
        x.0
    }
}

impl<'de> Deserialize<'de> for Float32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = f32::deserialize(deserializer)?;
        Self::try_new(v).ok_or_else(|| serde::de::Error::custom(FloatError::NonFinite))
    }
}

///
/// Float64
///
/// Finite f64 only; -0.0 canonically stored as 0.0
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Display, Serialize)]
pub struct Float64(f64);

impl Float64 {
    /// Fallible constructor that rejects non-finite values and normalizes -0.0.
    #[must_use]
    pub fn try_new(v: f64) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }

        // canonicalize -0.0 to 0.0 so Eq stays consistent
        Some(Self(if v == 0.0 { 0.0 } else { v }))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Eq for Float64 {}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl FieldValue for Float64 {
    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i32> for Float64 {
    fn from(n: i32) -> Self {
        Self(f64::from(n))
    }
}

impl TryFrom<f64> for Float64 {
    type Error = FloatError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::try_new(v).ok_or(FloatError::NonFinite)
    }
}

impl From<Float64> for f64 {
    fn from(x: Float64) -> Self {
        x.0
    }
}

impl<'de> Deserialize<'de> for Float64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Self::try_new(v).ok_or_else(|| serde::de::Error::custom(FloatError::NonFinite))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_non_finite() {
        assert!(Float64::try_new(f64::NAN).is_none());
        assert!(Float64::try_new(f64::INFINITY).is_none());
        assert!(Float32::try_new(f32::NEG_INFINITY).is_none());
    }

    #[test]
    fn negative_zero_is_canonicalized() {
        let z = Float64::try_new(-0.0).unwrap();
        assert_eq!(z.get().to_bits(), 0.0f64.to_bits());
        assert_eq!(z, Float64::try_new(0.0).unwrap());
    }

    #[test]
    fn try_from_reports_non_finite() {
        assert_eq!(Float64::try_from(f64::NAN), Err(FloatError::NonFinite));
        assert_eq!(
            Float64::try_from(2.5).map(Float64::get),
            Ok(2.5),
        );
    }
}
