use crate::support::{
    constraint::{ConstraintResult, StrictlyPositive},
    membrane::{Permeance, PermeanceUnits},
    thermo::{Composition, CompositionBasis, Mixture},
};

use super::FluxError;

/// Partial fluxes of the first and second component in kg/(m²·h).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialFluxes {
    pub first: f64,
    pub second: f64,
}

impl PartialFluxes {
    #[must_use]
    pub fn new(first: f64, second: f64) -> Self {
        Self { first, second }
    }

    /// Total flux in kg/(m²·h).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.first + self.second
    }

    /// Permeate mass fraction of the first component, `J1 / (J1 + J2)`.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::Undefined`] unless the total flux is positive and
    /// the fraction lies in `[0, 1]`.
    pub fn permeate_composition(&self) -> Result<Composition, FluxError> {
        let total = self.total();
        let y = self.first / total;
        if !(total > 0.0) || !(0.0..=1.0).contains(&y) {
            return Err(FluxError::Undefined {
                context: format!(
                    "permeate composition from fluxes ({:e}, {:e}) kg/(m2 h)",
                    self.first, self.second
                ),
            });
        }
        Ok(Composition::new_unchecked(y, CompositionBasis::Weight))
    }
}

/// Permeances of both components in kg/(m²·h·kPa), each strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PermeancePair {
    first: f64,
    second: f64,
}

impl PermeancePair {
    /// # Errors
    ///
    /// Returns an error if either permeance is not strictly positive.
    pub fn new(first: f64, second: f64) -> ConstraintResult<Self> {
        let first = StrictlyPositive::new(first)?.into_inner();
        let second = StrictlyPositive::new(second)?.into_inner();
        Ok(Self { first, second })
    }

    /// Converts permeances of any unit using the mixture's molar masses.
    #[must_use]
    pub fn from_permeances(first: Permeance, second: Permeance, mixture: &Mixture) -> Self {
        Self {
            first: first.canonical(mixture.first()),
            second: second.canonical(mixture.second()),
        }
    }

    #[must_use]
    pub fn first(&self) -> f64 {
        self.first
    }

    #[must_use]
    pub fn second(&self) -> f64 {
        self.second
    }

    /// Both values as [`Permeance`]s in kg/(m²·h·kPa).
    #[must_use]
    pub fn to_permeances(self) -> [Permeance; 2] {
        [
            Permeance::new_unchecked(self.first, PermeanceUnits::KgPerM2HKpa),
            Permeance::new_unchecked(self.second, PermeanceUnits::KgPerM2HKpa),
        ]
    }
}
