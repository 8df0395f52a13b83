use uom::si::molar_mass::gram_per_mole;

use crate::support::constraint::{Constrained, ConstraintResult, UnitInterval};

use super::Mixture;

/// Whether a [`Composition`] is expressed as mass or mole fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionBasis {
    Weight,
    Mole,
}

/// The composition of a binary mixture.
///
/// Stores the fraction of the first component; the second is always
/// `1 - first`. Both pure-component endpoints are valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composition {
    first: f64,
    basis: CompositionBasis,
}

impl Composition {
    /// Creates a composition from the first component's fraction.
    ///
    /// # Errors
    ///
    /// Returns an error if `first` is outside `[0, 1]` or is `NaN`.
    pub fn new(first: f64, basis: CompositionBasis) -> ConstraintResult<Self> {
        let first = UnitInterval::new(first)?;
        Ok(Self::from_constrained(first, basis))
    }

    /// Creates a mass-fraction composition.
    ///
    /// # Errors
    ///
    /// Returns an error if `first` is outside `[0, 1]` or is `NaN`.
    pub fn weight(first: f64) -> ConstraintResult<Self> {
        Self::new(first, CompositionBasis::Weight)
    }

    /// Creates a mole-fraction composition.
    ///
    /// # Errors
    ///
    /// Returns an error if `first` is outside `[0, 1]` or is `NaN`.
    pub fn mole(first: f64) -> ConstraintResult<Self> {
        Self::new(first, CompositionBasis::Mole)
    }

    /// Creates a composition from an already validated fraction.
    #[must_use]
    pub fn from_constrained(first: Constrained<f64, UnitInterval>, basis: CompositionBasis) -> Self {
        Self {
            first: first.into_inner(),
            basis,
        }
    }

    /// Creates a composition without validating the fraction.
    ///
    /// The caller must guarantee `0 ≤ first ≤ 1`.
    #[must_use]
    pub(crate) fn new_unchecked(first: f64, basis: CompositionBasis) -> Self {
        Self { first, basis }
    }

    /// Fraction of the first component.
    #[must_use]
    pub fn first(&self) -> f64 {
        self.first
    }

    /// Fraction of the second component.
    #[must_use]
    pub fn second(&self) -> f64 {
        1.0 - self.first
    }

    #[must_use]
    pub fn basis(&self) -> CompositionBasis {
        self.basis
    }

    /// Returns this composition as mass fractions of `mixture`.
    #[must_use]
    pub fn to_weight(self, mixture: &Mixture) -> Self {
        match self.basis {
            CompositionBasis::Weight => self,
            CompositionBasis::Mole => {
                let [m1, m2] = molar_masses(mixture);
                let first = self.first * m1;
                let second = self.second() * m2;
                Self::new_unchecked(ratio(first, second), CompositionBasis::Weight)
            }
        }
    }

    /// Returns this composition as mole fractions of `mixture`.
    #[must_use]
    pub fn to_mole(self, mixture: &Mixture) -> Self {
        match self.basis {
            CompositionBasis::Mole => self,
            CompositionBasis::Weight => {
                let [m1, m2] = molar_masses(mixture);
                let first = self.first / m1;
                let second = self.second() / m2;
                Self::new_unchecked(ratio(first, second), CompositionBasis::Mole)
            }
        }
    }
}

fn molar_masses(mixture: &Mixture) -> [f64; 2] {
    [
        mixture.first().molar_mass().get::<gram_per_mole>(),
        mixture.second().molar_mass().get::<gram_per_mole>(),
    ]
}

/// `a / (a + b)` for non-negative amounts, which stays within `[0, 1]`.
fn ratio(a: f64, b: f64) -> f64 {
    let total = a + b;
    if total > 0.0 { a / total } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{constraint::ConstraintError, thermo::fluid::water_ethanol};

    #[test]
    fn ten_percent_water_by_weight() {
        let mixture = water_ethanol();
        let w = Composition::weight(0.1).unwrap();
        let x = w.to_mole(&mixture);

        assert_eq!(x.basis(), CompositionBasis::Mole);
        assert_relative_eq!(x.first(), 0.2213, epsilon = 1e-4);
        assert_relative_eq!(x.first() + x.second(), 1.0);

        let back = x.to_weight(&mixture);
        assert_relative_eq!(back.first(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn pure_components_stay_pure() {
        let mixture = water_ethanol();
        for first in [0.0, 1.0] {
            let x = Composition::weight(first).unwrap().to_mole(&mixture);
            assert_eq!(x.first(), first);
        }
    }

    #[test]
    fn same_basis_is_unchanged() {
        let mixture = water_ethanol();
        let x = Composition::mole(0.4).unwrap();
        assert_eq!(x.to_mole(&mixture), x);
    }

    #[test]
    fn rejects_fractions_outside_unit_interval() {
        assert_eq!(Composition::weight(-0.01), Err(ConstraintError::BelowMinimum));
        assert_eq!(Composition::mole(1.5), Err(ConstraintError::AboveMaximum));
        assert_eq!(Composition::weight(f64::NAN), Err(ConstraintError::NotANumber));
    }
}
