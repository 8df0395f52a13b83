//! Heat duties of a process step.

use uom::{
    ConstZero,
    si::f64::{Energy, Mass, SpecificHeatCapacity, ThermodynamicTemperature},
};

use crate::support::{
    thermo::{Mixture, PropertyError},
    units::TemperatureDifference,
};

/// Heat drawn from the feed to evaporate the permeated masses.
pub(super) fn evaporation(
    mixture: &Mixture,
    feed: ThermodynamicTemperature,
    removed: [Mass; 2],
) -> Result<Energy, PropertyError> {
    let mut heat = Energy::ZERO;
    for (component, dm) in mixture.components().into_iter().zip(removed) {
        heat += component.specific_heat_of_vaporization(feed)? * dm;
    }
    Ok(heat)
}

/// Heat released condensing the permeate at `permeate` and cooling it from
/// the feed temperature.
pub(super) fn condensation(
    mixture: &Mixture,
    feed: ThermodynamicTemperature,
    permeate: ThermodynamicTemperature,
    removed: [Mass; 2],
) -> Result<Energy, PropertyError> {
    let cooling = feed.minus(permeate);
    let mut heat = Energy::ZERO;
    for (component, dm) in mixture.components().into_iter().zip(removed) {
        let latent = component.specific_heat_of_vaporization(permeate)? * dm;
        let sensible = component.mean_specific_heat(permeate, feed)? * dm * cooling;
        heat += latent + sensible;
    }
    Ok(heat)
}

/// Mass-weighted liquid specific heat of a feed with first-component mass
/// fraction `w`.
pub(super) fn feed_heat_capacity(
    mixture: &Mixture,
    feed: ThermodynamicTemperature,
    w: f64,
) -> Result<SpecificHeatCapacity, PropertyError> {
    let cp1 = mixture.first().specific_heat(feed)?;
    let cp2 = mixture.second().specific_heat(feed)?;
    Ok(cp1 * w + cp2 * (1.0 - w))
}
