//! Core types for the wavelet filterbank
//!
//! This module defines the fundamental types used throughout the crate:
//! numeric aliases, the crate-wide error type, and the tagged value used by
//! the string-keyed attribute surface.
//!
//! ## Attribute values
//!
//! Every tunable parameter of the engine is addressable by name through
//! [`crate::filterbank::Filterbank::set_attribute`]. The [`Value`] enum is
//! the typed carrier for those writes: a name that exists but is fed the
//! wrong variant fails with [`CwtError::TypeMismatch`], an unknown name
//! fails with [`CwtError::NotFound`].

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::filterbank::Optimisation;
use crate::wavelet::{Family, Mode};

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// A floating point sample (for real-valued signals)
pub type Sample = f64;

/// Result type for wavelet transform operations
pub type CwtResult<T> = Result<T, CwtError>;

/// Errors that can occur while configuring or running the transform
#[derive(Debug, Clone, thiserror::Error)]
pub enum CwtError {
    /// An attribute write violated its bounds. The previous value is kept.
    #[error("attribute value {value} out of range [{min} ; {max}]")]
    OutOfRange {
        value: String,
        min: String,
        max: String,
    },

    /// An argument is intrinsically invalid (e.g. a filter cutoff of zero)
    #[error("invalid argument: {0}")]
    Invalid(String),

    /// The attribute name is unknown for the current configuration
    #[error("attribute '{0}' does not exist or is not shared among bands")]
    NotFound(String),

    /// The attribute name is known but the supplied value has the wrong kind
    #[error("attribute '{name}' expects a {expected} value")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },

    /// Reserved for configurations without a defined computation path
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

/// Tagged attribute value for the string-keyed configuration surface.
///
/// Conversions from the underlying Rust types are provided so call sites can
/// write `fb.set_attribute("frequency_max", 30.0.into())`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Real-valued parameter (frequencies, delays, ripple, ...)
    Real(f64),
    /// Unsigned integer parameter (window size, Paul order)
    Unsigned(usize),
    /// Boolean switch
    Bool(bool),
    /// Wavelet family selector
    Family(Family),
    /// Filterbank optimisation level
    Optimisation(Optimisation),
    /// Kernel domain (time or frequency)
    Mode(Mode),
}

impl Value {
    /// Human-readable name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Real(_) => "real",
            Value::Unsigned(_) => "unsigned",
            Value::Bool(_) => "bool",
            Value::Family(_) => "family",
            Value::Optimisation(_) => "optimisation",
            Value::Mode(_) => "mode",
        }
    }

    /// Extract a real value, or fail with [`CwtError::TypeMismatch`].
    pub fn as_real(&self, name: &str) -> CwtResult<f64> {
        match self {
            Value::Real(v) => Ok(*v),
            _ => Err(CwtError::TypeMismatch {
                name: name.to_string(),
                expected: "real",
            }),
        }
    }

    /// Extract an unsigned value, or fail with [`CwtError::TypeMismatch`].
    pub fn as_unsigned(&self, name: &str) -> CwtResult<usize> {
        match self {
            Value::Unsigned(v) => Ok(*v),
            _ => Err(CwtError::TypeMismatch {
                name: name.to_string(),
                expected: "unsigned",
            }),
        }
    }

    /// Extract a boolean, or fail with [`CwtError::TypeMismatch`].
    pub fn as_bool(&self, name: &str) -> CwtResult<bool> {
        match self {
            Value::Bool(v) => Ok(*v),
            _ => Err(CwtError::TypeMismatch {
                name: name.to_string(),
                expected: "bool",
            }),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Unsigned(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Family> for Value {
    fn from(v: Family) -> Self {
        Value::Family(v)
    }
}

impl From<Optimisation> for Value {
    fn from(v: Optimisation) -> Self {
        Value::Optimisation(v)
    }
}

impl From<Mode> for Value {
    fn from(v: Mode) -> Self {
        Value::Mode(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(3.5), Value::Real(3.5));
        assert_eq!(Value::from(7usize), Value::Unsigned(7));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(Family::Paul), Value::Family(Family::Paul));
    }

    #[test]
    fn test_value_kind_names() {
        assert_eq!(Value::Real(0.0).kind(), "real");
        assert_eq!(Value::Unsigned(0).kind(), "unsigned");
        assert_eq!(Value::Optimisation(Optimisation::None).kind(), "optimisation");
    }

    #[test]
    fn test_value_extraction_mismatch() {
        let err = Value::Bool(true).as_real("delay").unwrap_err();
        match err {
            CwtError::TypeMismatch { name, expected } => {
                assert_eq!(name, "delay");
                assert_eq!(expected, "real");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
