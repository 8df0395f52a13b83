use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is zero or greater.
///
/// A permeate pressure is the typical case: zero is a perfect vacuum and
/// anything below it is meaningless.
///
/// # Examples
///
/// ```
/// use pervaporation_models::support::constraint::NonNegative;
/// use uom::si::{f64::Pressure, pressure::kilopascal};
///
/// assert!(NonNegative::new(Pressure::new::<kilopascal>(0.0)).is_ok());
/// assert!(NonNegative::new(Pressure::new::<kilopascal>(-0.1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Pressure, pressure::kilopascal};

    #[test]
    fn permeate_pressures() {
        let vacuum = NonNegative::new(Pressure::new::<kilopascal>(0.0)).unwrap();
        assert_eq!(vacuum.into_inner().get::<kilopascal>(), 0.0);

        assert!(NonNegative::new(Pressure::new::<kilopascal>(2.5)).is_ok());
        assert_eq!(
            NonNegative::new(Pressure::new::<kilopascal>(-1.0)),
            Err(ConstraintError::Negative)
        );
        assert_eq!(
            NonNegative::new(Pressure::new::<kilopascal>(f64::NAN)),
            Err(ConstraintError::NotANumber)
        );
    }
}
