//! Capability traits for mixture equilibrium models.

use uom::si::f64::{Pressure, ThermodynamicTemperature};

use super::{Composition, Mixture, PropertyError};

/// Equilibrium partial pressures above a liquid binary mixture.
///
/// Implementations accept either composition basis and convert as needed.
pub trait PartialPressures {
    /// Returns `[p1, p2]` for the mixture's first and second components.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the state is outside the model's domain
    /// or the calculation produces a non-finite value.
    fn partial_pressures(
        &self,
        temperature: ThermodynamicTemperature,
        mixture: &Mixture,
        composition: Composition,
    ) -> Result<[Pressure; 2], PropertyError>;
}
