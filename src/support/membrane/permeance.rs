use uom::si::molar_mass::kilogram_per_mole;

use crate::support::{
    constraint::{ConstraintResult, StrictlyPositive},
    thermo::Component,
};

/// One gas permeation unit in mol/(m²·s·Pa).
pub const GPU_MOL_PER_M2_S_PA: f64 = 3.35e-10;

const SECONDS_PER_HOUR: f64 = 3600.0;
const PASCALS_PER_KILOPASCAL: f64 = 1000.0;

/// The unit a [`Permeance`] value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermeanceUnits {
    /// kg/(m²·h·kPa), the canonical unit used by the flux solver.
    #[default]
    KgPerM2HKpa,
    /// mol/(m²·s·Pa).
    MolPerM2SPa,
    /// Gas permeation units, `1 GPU = 3.35e-10 mol/(m²·s·Pa)`.
    Gpu,
}

/// A strictly positive membrane permeance tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Permeance {
    value: f64,
    units: PermeanceUnits,
}

impl Permeance {
    /// # Errors
    ///
    /// Returns an error if `value` is not strictly positive.
    pub fn new(value: f64, units: PermeanceUnits) -> ConstraintResult<Self> {
        let value = StrictlyPositive::new(value)?.into_inner();
        Ok(Self { value, units })
    }

    /// Creates a permeance without validation.
    ///
    /// The caller must ensure `value` is strictly positive.
    #[must_use]
    pub(crate) fn new_unchecked(value: f64, units: PermeanceUnits) -> Self {
        Self { value, units }
    }

    /// A permeance in kg/(m²·h·kPa).
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not strictly positive.
    pub fn kg_per_m2_h_kpa(value: f64) -> ConstraintResult<Self> {
        Self::new(value, PermeanceUnits::KgPerM2HKpa)
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn units(&self) -> PermeanceUnits {
        self.units
    }

    /// Converts to `units`, using the molar mass of `component` between
    /// mass and molar bases.
    #[must_use]
    pub fn convert(self, units: PermeanceUnits, component: &Component) -> Self {
        if self.units == units {
            return self;
        }
        let molar_mass = component.molar_mass().get::<kilogram_per_mole>();
        let canonical = match self.units {
            PermeanceUnits::KgPerM2HKpa => self.value,
            PermeanceUnits::MolPerM2SPa => {
                self.value * molar_mass * SECONDS_PER_HOUR * PASCALS_PER_KILOPASCAL
            }
            PermeanceUnits::Gpu => {
                self.value
                    * GPU_MOL_PER_M2_S_PA
                    * molar_mass
                    * SECONDS_PER_HOUR
                    * PASCALS_PER_KILOPASCAL
            }
        };
        let value = match units {
            PermeanceUnits::KgPerM2HKpa => canonical,
            PermeanceUnits::MolPerM2SPa => {
                canonical / molar_mass / SECONDS_PER_HOUR / PASCALS_PER_KILOPASCAL
            }
            PermeanceUnits::Gpu => {
                canonical
                    / molar_mass
                    / SECONDS_PER_HOUR
                    / PASCALS_PER_KILOPASCAL
                    / GPU_MOL_PER_M2_S_PA
            }
        };
        Self { value, units }
    }

    /// The value in kg/(m²·h·kPa).
    #[must_use]
    pub fn canonical(self, component: &Component) -> f64 {
        self.convert(PermeanceUnits::KgPerM2HKpa, component).value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::thermo::fluid;

    #[test]
    fn molar_to_mass_basis() {
        let water = fluid::water();
        let p = Permeance::new(1e-7, PermeanceUnits::MolPerM2SPa).unwrap();
        let kg = p.convert(PermeanceUnits::KgPerM2HKpa, &water);

        assert_eq!(kg.units(), PermeanceUnits::KgPerM2HKpa);
        assert_relative_eq!(kg.value(), 1e-7 * 0.018_015 * 3.6e6, max_relative = 1e-12);
    }

    #[test]
    fn gpu_round_trip() {
        let ethanol = fluid::ethanol();
        let p = Permeance::new(500.0, PermeanceUnits::Gpu).unwrap();
        let back = p
            .convert(PermeanceUnits::KgPerM2HKpa, &ethanol)
            .convert(PermeanceUnits::Gpu, &ethanol);
        assert_relative_eq!(back.value(), 500.0, max_relative = 1e-12);
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(Permeance::kg_per_m2_h_kpa(0.0).is_err());
        assert!(Permeance::kg_per_m2_h_kpa(-0.01).is_err());
    }
}
