//! Pervaporation models.
//!
//! This module provides [`twine_core::Model`] implementations for
//! pervaporation: [`FluxModel`] solves steady partial fluxes at one feed
//! operating point and [`BatchModel`] integrates a batch process.
//! The computational core is in the internal `core` module, whose API is
//! re-exported here for direct use.

pub(crate) mod core;

pub use self::core::{
    Conditions, DiffusionCurve, DiffusionCurveSet, FitOptions, FluxError, FluxMethod,
    FluxSolution, FluxSolverConfig, NonIdeal, PartialFluxes, PermeanceFits, PermeancePair,
    PermeateCondition, Pervaporation, ProcessError, ProcessTrajectory, Regime, RegimeKind,
    TemperatureProgram, TemperatureProgramError, Violation,
};

use twine_core::Model;
use uom::si::f64::{ThermodynamicTemperature, Time};

use crate::support::thermo::{Composition, capability::PartialPressures, model::Nrtl};

/// Feed state for a single flux evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub feed_temperature: ThermodynamicTemperature,
    pub feed_composition: Composition,

    /// Looked up from the membrane at the feed temperature when absent.
    pub permeances: Option<PermeancePair>,

    pub permeate: PermeateCondition,
}

/// Steady partial fluxes as a [`Model`].
#[derive(Debug, Clone, Copy)]
pub struct FluxModel<'a, E = Nrtl> {
    process: Pervaporation<'a, E>,
    config: FluxSolverConfig,
}

impl<'a, E: PartialPressures> FluxModel<'a, E> {
    #[must_use]
    pub fn new(process: Pervaporation<'a, E>, config: FluxSolverConfig) -> Self {
        Self { process, config }
    }
}

impl<E: PartialPressures> Model for FluxModel<'_, E> {
    type Input = OperatingPoint;
    type Output = PartialFluxes;
    type Error = FluxError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.process
            .solve_fluxes(
                input.feed_temperature,
                input.feed_composition,
                input.permeances,
                input.permeate,
                &self.config,
            )
            .map(|solution| solution.fluxes)
    }
}

/// A batch run request.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInput {
    pub conditions: Conditions,
    pub regime: Regime,
    pub steps: usize,
    pub time_step: Time,
}

/// Batch process integration as a [`Model`].
#[derive(Debug, Clone, Copy)]
pub struct BatchModel<'a, E = Nrtl> {
    process: Pervaporation<'a, E>,
    config: FluxSolverConfig,
}

impl<'a, E: PartialPressures> BatchModel<'a, E> {
    #[must_use]
    pub fn new(process: Pervaporation<'a, E>, config: FluxSolverConfig) -> Self {
        Self { process, config }
    }
}

impl<E: PartialPressures> Model for BatchModel<'_, E> {
    type Input = BatchInput;
    type Output = ProcessTrajectory;
    type Error = ProcessError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.process.run_process(
            &input.regime,
            &input.conditions,
            input.steps,
            input.time_step,
            &self.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{mass::kilogram, time::hour};

    use super::core::test_support::{conditions, kelvin_at, membrane, mixture, weight};

    #[test]
    fn flux_model_delegates_to_the_solver() {
        let (membrane, mixture) = (membrane(), mixture());
        let process = Pervaporation::new(&membrane, &mixture);
        let model = FluxModel::new(process, FluxSolverConfig::default());

        let fluxes = model
            .call(&OperatingPoint {
                feed_temperature: kelvin_at(350.0),
                feed_composition: weight(0.1),
                permeances: None,
                permeate: PermeateCondition::Vacuum,
            })
            .unwrap();

        // Vacuum permeate: J = P * p_feed.
        assert_relative_eq!(fluxes.first, 0.01 * 18.655, max_relative = 1e-3);
        assert_relative_eq!(fluxes.second, 0.002 * 76.800, max_relative = 1e-3);
    }

    #[test]
    fn batch_model_runs_the_requested_regime() {
        let (membrane, mixture) = (membrane(), mixture());
        let process = Pervaporation::new(&membrane, &mixture);
        let model = BatchModel::new(process, FluxSolverConfig::default());

        let trajectory = model
            .call(&BatchInput {
                conditions: conditions(0.1),
                regime: Regime::IdealIsothermal,
                steps: 10,
                time_step: Time::new::<hour>(1.0),
            })
            .unwrap();

        assert_eq!(trajectory.regime, RegimeKind::IdealIsothermal);
        assert_eq!(trajectory.feed_composition.len(), 11);
        assert!(trajectory.feed_mass[10].get::<kilogram>() < 10.0);
    }
}
