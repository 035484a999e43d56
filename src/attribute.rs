//! Bounded attributes
//!
//! Every tunable parameter of the engine lives in an [`Attribute`]: a typed
//! cell with inclusive lower/upper limits and a dirty flag. A write that
//! violates the limits fails with [`CwtError::OutOfRange`] and leaves the
//! previous value intact; a successful write marks the attribute as changed
//! so its owner knows a rebuild is due.
//!
//! Owners (wavelets, filters, the filterbank) react to writes themselves:
//! their public setters validate through the attribute, then re-run their own
//! initialization before returning. There is no observer wiring between an
//! attribute and its owner.

use std::fmt::Debug;

use crate::types::{CwtError, CwtResult};

/// Types that provide representable extremes usable as default limits.
pub trait Bounded {
    /// Smallest representable value of the type.
    fn min_bound() -> Self;
    /// Largest representable value of the type.
    fn max_bound() -> Self;
}

impl Bounded for f64 {
    fn min_bound() -> Self {
        f64::MIN
    }
    fn max_bound() -> Self {
        f64::MAX
    }
}

impl Bounded for usize {
    fn min_bound() -> Self {
        usize::MIN
    }
    fn max_bound() -> Self {
        usize::MAX
    }
}

impl Bounded for bool {
    fn min_bound() -> Self {
        false
    }
    fn max_bound() -> Self {
        true
    }
}

/// A named-by-its-owner, range-checked parameter cell.
///
/// Limits are inclusive on both ends. Enumerated types must supply explicit
/// limits through [`Attribute::with_limits`]; numeric types default to the
/// representable extremes.
#[derive(Debug, Clone)]
pub struct Attribute<T: Copy + PartialOrd + Debug> {
    value: T,
    limit_min: T,
    limit_max: T,
    /// Set on every accepted non-silent write, cleared by the owner.
    pub changed: bool,
}

impl<T: Copy + PartialOrd + Debug + Bounded> Attribute<T> {
    /// Create an attribute spanning the full range of the type.
    pub fn new(value: T) -> Self {
        Self {
            value,
            limit_min: T::min_bound(),
            limit_max: T::max_bound(),
            changed: false,
        }
    }

    /// Create an attribute with a lower limit only.
    pub fn with_min(value: T, limit_min: T) -> CwtResult<Self> {
        Self::with_limits(value, limit_min, T::max_bound())
    }
}

impl<T: Copy + PartialOrd + Debug> Attribute<T> {
    /// Create an attribute with explicit limits, validating the initial value.
    pub fn with_limits(value: T, limit_min: T, limit_max: T) -> CwtResult<Self> {
        check_limits(&value, &limit_min, &limit_max)?;
        Ok(Self {
            value,
            limit_min,
            limit_max,
            changed: false,
        })
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.value
    }

    /// Write a new value, marking the attribute as changed.
    ///
    /// Fails with [`CwtError::OutOfRange`] without mutating when the value
    /// falls outside the limits.
    pub fn set(&mut self, value: T) -> CwtResult<()> {
        check_limits(&value, &self.limit_min, &self.limit_max)?;
        self.value = value;
        self.changed = true;
        Ok(())
    }

    /// Write a new value without marking the attribute as changed.
    pub fn set_silent(&mut self, value: T) -> CwtResult<()> {
        check_limits(&value, &self.limit_min, &self.limit_max)?;
        self.value = value;
        Ok(())
    }

    /// Lower limit.
    pub fn limit_min(&self) -> T {
        self.limit_min
    }

    /// Upper limit.
    pub fn limit_max(&self) -> T {
        self.limit_max
    }

    /// Replace the lower limit. The current value is not re-checked.
    pub fn set_limit_min(&mut self, limit_min: T) {
        self.limit_min = limit_min;
    }

    /// Replace the upper limit. The current value is not re-checked.
    pub fn set_limit_max(&mut self, limit_max: T) {
        self.limit_max = limit_max;
    }
}

/// Check `limit_min <= value <= limit_max`, failing with
/// [`CwtError::OutOfRange`] otherwise.
fn check_limits<T: PartialOrd + Debug>(value: &T, limit_min: &T, limit_max: &T) -> CwtResult<()> {
    if value < limit_min || value > limit_max {
        return Err(CwtError::OutOfRange {
            value: format!("{value:?}"),
            min: format!("{limit_min:?}"),
            max: format!("{limit_max:?}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_attribute() {
        let mut attr = Attribute::new(0.5_f64);
        assert_eq!(attr.get(), 0.5);
        attr.set(-1e300).unwrap();
        attr.set(1e300).unwrap();
        assert!(attr.changed);
    }

    #[test]
    fn test_rejected_write_keeps_value() {
        let mut attr = Attribute::with_limits(5.0_f64, 0.0, 10.0).unwrap();
        let err = attr.set(11.0).unwrap_err();
        assert!(matches!(err, CwtError::OutOfRange { .. }));
        assert_eq!(attr.get(), 5.0);
        assert!(!attr.changed);
    }

    #[test]
    fn test_limits_are_inclusive() {
        let mut attr = Attribute::with_limits(5.0_f64, 0.0, 10.0).unwrap();
        attr.set(0.0).unwrap();
        attr.set(10.0).unwrap();
        assert_eq!(attr.get(), 10.0);
    }

    #[test]
    fn test_silent_write_does_not_mark() {
        let mut attr = Attribute::with_min(2_usize, 1).unwrap();
        attr.set_silent(4).unwrap();
        assert_eq!(attr.get(), 4);
        assert!(!attr.changed);
    }

    #[test]
    fn test_invalid_initial_value() {
        assert!(Attribute::with_limits(-1.0_f64, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_bool_attribute() {
        let mut attr = Attribute::new(false);
        attr.set(true).unwrap();
        assert!(attr.get());
    }

    #[test]
    fn test_limit_updates() {
        let mut attr = Attribute::with_limits(5.0_f64, 0.0, 10.0).unwrap();
        attr.set_limit_min(4.0);
        assert!(attr.set(3.0).is_err());
        attr.set_limit_max(20.0);
        attr.set(15.0).unwrap();
        assert_eq!(attr.get(), 15.0);
    }
}
