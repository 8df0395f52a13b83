use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive.
///
/// Used for feed masses, membrane areas, time steps, molar masses and
/// permeances, none of which have a meaningful zero.
///
/// # Examples
///
/// ```
/// use pervaporation_models::support::constraint::StrictlyPositive;
/// use uom::si::{f64::Area, area::square_meter};
///
/// let area = StrictlyPositive::new(Area::new::<square_meter>(0.5)).unwrap();
/// assert_eq!(area.into_inner().get::<square_meter>(), 0.5);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is greater than zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Mass, Time},
        mass::kilogram,
        time::hour,
    };

    #[test]
    fn feed_mass() {
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(10.0)).is_ok());
        assert_eq!(
            StrictlyPositive::new(Mass::new::<kilogram>(0.0)),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            StrictlyPositive::new(Mass::new::<kilogram>(-1e-9)),
            Err(ConstraintError::Negative)
        );
    }

    #[test]
    fn time_step() {
        let dt = StrictlyPositive::new(Time::new::<hour>(0.25)).unwrap();
        assert_eq!(dt.as_ref().get::<hour>(), 0.25);
        assert!(StrictlyPositive::new(Time::new::<hour>(f64::NAN)).is_err());
    }
}
