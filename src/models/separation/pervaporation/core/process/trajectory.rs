use std::fmt;

use jiff::Timestamp;
use uom::{
    ConstZero,
    si::f64::{Energy, Mass, ThermodynamicTemperature, Time},
};

use crate::support::thermo::Composition;

use super::super::{Conditions, PartialFluxes, PermeanceFits, PermeancePair};

/// The four batch process regimes, without their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegimeKind {
    IdealIsothermal,
    IdealNonIsothermal,
    NonIdealIsothermal,
    NonIdealNonIsothermal,
}

impl RegimeKind {
    #[must_use]
    pub fn is_ideal(self) -> bool {
        matches!(self, Self::IdealIsothermal | Self::IdealNonIsothermal)
    }

    #[must_use]
    pub fn is_isothermal(self) -> bool {
        matches!(self, Self::IdealIsothermal | Self::NonIdealIsothermal)
    }
}

impl fmt::Display for RegimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = if self.is_ideal() { "Ideal" } else { "Non-Ideal" };
        let temperature = if self.is_isothermal() {
            "Isothermal"
        } else {
            "Non-Isothermal"
        };
        write!(f, "{model} {temperature}")
    }
}

/// The record of one batch process run.
///
/// State sequences (`time`, `feed_temperature`, `feed_composition`,
/// `feed_mass`) hold the initial state plus one entry per step. Per-step
/// sequences hold one entry per step, describing the step that starts at the
/// state with the same index.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTrajectory {
    pub time: Vec<Time>,
    pub feed_temperature: Vec<ThermodynamicTemperature>,
    pub feed_composition: Vec<Composition>,
    pub feed_mass: Vec<Mass>,

    pub permeate_composition: Vec<Composition>,
    pub partial_fluxes: Vec<PartialFluxes>,
    pub permeances: Vec<PermeancePair>,
    pub feed_evaporation_heat: Vec<Energy>,

    /// Present only when the permeate side is held at a temperature.
    pub permeate_condensation_heat: Vec<Option<Energy>>,

    pub conditions: Conditions,
    pub regime: RegimeKind,

    /// Fitted surfaces, for non-ideal regimes.
    pub fits: Option<PermeanceFits>,

    pub membrane: String,
    pub comment: String,
    pub created: Timestamp,
}

impl ProcessTrajectory {
    /// Number of completed steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.partial_fluxes.len()
    }

    /// Total mass removed from the feed.
    #[must_use]
    pub fn permeate_mass(&self) -> Option<Mass> {
        Some(*self.feed_mass.first()? - *self.feed_mass.last()?)
    }

    /// Total heat drawn from the feed by evaporation.
    #[must_use]
    pub fn total_evaporation_heat(&self) -> Energy {
        self.feed_evaporation_heat
            .iter()
            .fold(Energy::ZERO, |total, &q| total + q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_names() {
        assert_eq!(RegimeKind::IdealIsothermal.to_string(), "Ideal Isothermal");
        assert_eq!(
            RegimeKind::NonIdealNonIsothermal.to_string(),
            "Non-Ideal Non-Isothermal"
        );
        assert!(RegimeKind::IdealNonIsothermal.is_ideal());
        assert!(!RegimeKind::IdealNonIsothermal.is_isothermal());
        assert!(RegimeKind::NonIdealIsothermal.is_isothermal());
    }
}
