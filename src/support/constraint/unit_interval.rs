use std::cmp::Ordering;

use super::{Constrained, Constraint, ConstraintError};

/// Supplies 0 and 1 for types used in the closed unit interval [0, 1].
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

/// Marker type enforcing that a value lies in the closed unit interval: `0 ≤ x ≤ 1`.
///
/// Mass and mole fractions of a binary mixture are the intended use, so
/// both pure-component endpoints are valid.
///
/// # Examples
///
/// ```
/// use pervaporation_models::support::constraint::UnitInterval;
///
/// assert!(UnitInterval::new(0.0).is_ok());
/// assert!(UnitInterval::new(1.0).is_ok());
/// assert!(UnitInterval::new(1.0001).is_err());
/// assert!(UnitInterval::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs `Constrained<T, UnitInterval>` if 0 ≤ value ≤ 1.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(value: T) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::<T, UnitInterval>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_component_limits_are_valid() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
        assert!(UnitInterval::new(0.1).is_ok());
    }

    #[test]
    fn out_of_range_fractions() {
        assert_eq!(
            UnitInterval::new(-1e-15).map(Constrained::into_inner),
            Err(ConstraintError::BelowMinimum)
        );
        assert_eq!(
            UnitInterval::new(1.0 + 1e-15).map(Constrained::into_inner),
            Err(ConstraintError::AboveMaximum)
        );
        assert_eq!(
            UnitInterval::new(f64::INFINITY).map(Constrained::into_inner),
            Err(ConstraintError::AboveMaximum)
        );
        assert_eq!(
            UnitInterval::new(f64::NAN).map(Constrained::into_inner),
            Err(ConstraintError::NotANumber)
        );
    }
}
