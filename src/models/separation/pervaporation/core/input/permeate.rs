use uom::si::f64::{Pressure, ThermodynamicTemperature};

use crate::models::separation::pervaporation::core::FluxError;

/// The state of the permeate side of the membrane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PermeateCondition {
    /// Zero permeate pressure.
    #[default]
    Vacuum,

    /// The permeate condenses at this temperature, so its partial pressures
    /// are the equilibrium pressures of the permeate composition.
    Temperature(ThermodynamicTemperature),

    /// A fixed total permeate pressure, split by permeate mass fraction.
    Pressure(Pressure),
}

impl PermeateCondition {
    /// Builds a condition from an optional temperature and pressure.
    ///
    /// Neither given means vacuum.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::ConflictingPermeateConditions`] if both are given.
    pub fn from_options(
        temperature: Option<ThermodynamicTemperature>,
        pressure: Option<Pressure>,
    ) -> Result<Self, FluxError> {
        match (temperature, pressure) {
            (None, None) => Ok(Self::Vacuum),
            (Some(t), None) => Ok(Self::Temperature(t)),
            (None, Some(p)) => Ok(Self::Pressure(p)),
            (Some(_), Some(_)) => Err(FluxError::ConflictingPermeateConditions),
        }
    }

    /// The permeate temperature, if one is specified.
    #[must_use]
    pub fn temperature(&self) -> Option<ThermodynamicTemperature> {
        match self {
            Self::Temperature(t) => Some(*t),
            _ => None,
        }
    }

    /// The permeate pressure, if one is specified.
    #[must_use]
    pub fn pressure(&self) -> Option<Pressure> {
        match self {
            Self::Pressure(p) => Some(*p),
            _ => None,
        }
    }
}
