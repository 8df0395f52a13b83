//! Batch process integration.
//!
//! Every regime shares one explicit stepping loop. Within a step the feed
//! state is frozen, the flux solver gives steady partial fluxes, and the
//! removed masses update the feed for the next step. Regimes differ only in
//! where permeances come from and how the feed temperature evolves.

mod error;
mod heat;
mod strategy;
mod trajectory;

pub use error::{ProcessError, Violation};
pub use trajectory::{ProcessTrajectory, RegimeKind};

use jiff::Timestamp;
use log::{debug, info};
use uom::si::{
    area::square_meter,
    energy::joule,
    f64::{Mass, ThermodynamicTemperature, Time},
    mass::kilogram,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    time::hour,
};

use crate::support::{
    constraint::StrictlyPositive,
    thermo::{Composition, CompositionBasis, capability::PartialPressures},
};

use super::{Conditions, FluxSolverConfig, NonIdeal, PermeanceFits, Pervaporation};

use strategy::{FeedState, PermeanceStrategy, TemperatureStrategy, checked_pair};

/// A batch process regime and its regime-specific inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Regime {
    /// Membrane permeances at the initial feed temperature, held constant.
    IdealIsothermal,

    /// Membrane permeances at the current feed temperature.
    IdealNonIsothermal,

    /// Fitted permeances extrapolated along composition.
    NonIdealIsothermal(NonIdeal),

    /// Fitted permeances extrapolated along composition and temperature.
    NonIdealNonIsothermal(NonIdeal),
}

impl Regime {
    #[must_use]
    pub fn kind(&self) -> RegimeKind {
        match self {
            Self::IdealIsothermal => RegimeKind::IdealIsothermal,
            Self::IdealNonIsothermal => RegimeKind::IdealNonIsothermal,
            Self::NonIdealIsothermal(_) => RegimeKind::NonIdealIsothermal,
            Self::NonIdealNonIsothermal(_) => RegimeKind::NonIdealNonIsothermal,
        }
    }
}

/// Regime-specific behaviour of the stepping loop.
struct Plan<'r> {
    kind: RegimeKind,
    permeances: PermeanceStrategy<'r>,
    temperature: TemperatureStrategy<'r>,
}

impl<E: PartialPressures> Pervaporation<'_, E> {
    /// Runs `steps` steps of `time_step` under `regime`.
    ///
    /// # Errors
    ///
    /// See [`ProcessError`]. Any error aborts the run.
    pub fn run_process(
        &self,
        regime: &Regime,
        conditions: &Conditions,
        steps: usize,
        time_step: Time,
        config: &FluxSolverConfig,
    ) -> Result<ProcessTrajectory, ProcessError> {
        match regime {
            Regime::IdealIsothermal => {
                self.ideal_isothermal_process(conditions, steps, time_step, config)
            }
            Regime::IdealNonIsothermal => {
                self.ideal_non_isothermal_process(conditions, steps, time_step, config)
            }
            Regime::NonIdealIsothermal(non_ideal) => {
                self.non_ideal_isothermal_process(conditions, non_ideal, steps, time_step, config)
            }
            Regime::NonIdealNonIsothermal(non_ideal) => self.non_ideal_non_isothermal_process(
                conditions, non_ideal, steps, time_step, config,
            ),
        }
    }

    /// Constant membrane permeances at a fixed feed temperature.
    ///
    /// # Errors
    ///
    /// See [`ProcessError`].
    pub fn ideal_isothermal_process(
        &self,
        conditions: &Conditions,
        steps: usize,
        time_step: Time,
        config: &FluxSolverConfig,
    ) -> Result<ProcessTrajectory, ProcessError> {
        let permeances = self
            .membrane_permeances(conditions.feed_temperature())
            .map_err(|source| ProcessError::Permeance { step: 0, source })?;
        let plan = Plan {
            kind: RegimeKind::IdealIsothermal,
            permeances: PermeanceStrategy::Constant(permeances),
            temperature: TemperatureStrategy::Fixed,
        };
        self.integrate(conditions, steps, time_step, config, &plan, None)
    }

    /// Membrane permeances re-queried at each step's feed temperature.
    ///
    /// The feed cools by evaporation unless the conditions carry a
    /// temperature program.
    ///
    /// # Errors
    ///
    /// See [`ProcessError`].
    pub fn ideal_non_isothermal_process(
        &self,
        conditions: &Conditions,
        steps: usize,
        time_step: Time,
        config: &FluxSolverConfig,
    ) -> Result<ProcessTrajectory, ProcessError> {
        let plan = Plan {
            kind: RegimeKind::IdealNonIsothermal,
            permeances: PermeanceStrategy::Lookup,
            temperature: TemperatureStrategy::non_isothermal(conditions.temperature_program()),
        };
        self.integrate(conditions, steps, time_step, config, &plan, None)
    }

    /// Fitted permeances at a fixed feed temperature.
    ///
    /// # Errors
    ///
    /// See [`ProcessError`].
    pub fn non_ideal_isothermal_process(
        &self,
        conditions: &Conditions,
        non_ideal: &NonIdeal,
        steps: usize,
        time_step: Time,
        config: &FluxSolverConfig,
    ) -> Result<ProcessTrajectory, ProcessError> {
        let fits = self.build_permeance_fits(&non_ideal.curves, &non_ideal.options)?;
        let plan = Plan {
            kind: RegimeKind::NonIdealIsothermal,
            permeances: self.fitted(&fits, non_ideal, conditions, false)?,
            temperature: TemperatureStrategy::Fixed,
        };
        self.integrate(conditions, steps, time_step, config, &plan, Some(&fits))
    }

    /// Fitted permeances with an evolving feed temperature.
    ///
    /// # Errors
    ///
    /// See [`ProcessError`].
    pub fn non_ideal_non_isothermal_process(
        &self,
        conditions: &Conditions,
        non_ideal: &NonIdeal,
        steps: usize,
        time_step: Time,
        config: &FluxSolverConfig,
    ) -> Result<ProcessTrajectory, ProcessError> {
        let fits = self.build_permeance_fits(&non_ideal.curves, &non_ideal.options)?;
        let plan = Plan {
            kind: RegimeKind::NonIdealNonIsothermal,
            permeances: self.fitted(&fits, non_ideal, conditions, true)?,
            temperature: TemperatureStrategy::non_isothermal(conditions.temperature_program()),
        };
        self.integrate(conditions, steps, time_step, config, &plan, Some(&fits))
    }

    fn fitted<'f>(
        &self,
        fits: &'f PermeanceFits,
        non_ideal: &NonIdeal,
        conditions: &Conditions,
        temperature_dependent: bool,
    ) -> Result<PermeanceStrategy<'f>, ProcessError> {
        let initial = match non_ideal.initial_permeances {
            Some(pair) => pair,
            None => {
                let x = conditions.feed_composition().to_weight(self.mixture).first();
                let t = conditions.feed_temperature().get::<kelvin>();
                checked_pair(fits.first().value(x, t), fits.second().value(x, t))
                    .map_err(|violation| ProcessError::non_physical(0, violation))?
            }
        };
        Ok(PermeanceStrategy::Fitted {
            fits,
            initial,
            temperature_dependent,
        })
    }

    fn integrate(
        &self,
        conditions: &Conditions,
        steps: usize,
        time_step: Time,
        config: &FluxSolverConfig,
        plan: &Plan<'_>,
        fits: Option<&PermeanceFits>,
    ) -> Result<ProcessTrajectory, ProcessError> {
        let time_step = StrictlyPositive::new(time_step)
            .map_err(ProcessError::InvalidTimeStep)?
            .into_inner();
        let hours = time_step.get::<hour>();
        let area = conditions.membrane_area().get::<square_meter>();
        let permeate = conditions.permeate();
        let comment = format!("{} {} Process", self.label(), plan.kind);

        let mut state = FeedState {
            time: Time::new::<hour>(0.0),
            temperature: conditions.feed_temperature().get::<kelvin>(),
            composition: conditions.feed_composition().to_weight(self.mixture).first(),
            mass: conditions.feed_mass().get::<kilogram>(),
        };
        let mut carried = plan.permeances.initial();

        let mut trajectory = ProcessTrajectory {
            time: Vec::with_capacity(steps + 1),
            feed_temperature: Vec::with_capacity(steps + 1),
            feed_composition: Vec::with_capacity(steps + 1),
            feed_mass: Vec::with_capacity(steps + 1),
            permeate_composition: Vec::with_capacity(steps),
            partial_fluxes: Vec::with_capacity(steps),
            permeances: Vec::with_capacity(steps),
            feed_evaporation_heat: Vec::with_capacity(steps),
            permeate_condensation_heat: Vec::with_capacity(steps),
            conditions: conditions.clone(),
            regime: plan.kind,
            fits: fits.cloned(),
            membrane: self.membrane.name().to_owned(),
            comment,
            created: Timestamp::now(),
        };
        record_state(&mut trajectory, &state);

        for step in 0..steps {
            let temperature = ThermodynamicTemperature::new::<kelvin>(state.temperature);
            let composition = Composition::new_unchecked(state.composition, CompositionBasis::Weight);

            let permeances = match carried {
                Some(pair) => pair,
                None => self
                    .membrane_permeances(temperature)
                    .map_err(|source| ProcessError::Permeance { step, source })?,
            };

            let solution = self
                .solve_fluxes(temperature, composition, Some(permeances), permeate, config)
                .map_err(|source| ProcessError::Flux { step, source })?;
            let fluxes = solution.fluxes;

            let removed = [fluxes.first, fluxes.second].map(|flux| flux * area * hours);
            let removed_mass = removed.map(Mass::new::<kilogram>);

            let evaporation = heat::evaporation(self.mixture, temperature, removed_mass)
                .map_err(ProcessError::property(step))?;
            let condensation = permeate
                .temperature()
                .map(|tp| heat::condensation(self.mixture, temperature, tp, removed_mass))
                .transpose()
                .map_err(ProcessError::property(step))?;

            let mass = state.mass - removed[0] - removed[1];
            let time = state.time + time_step;
            let next_temperature = match plan.temperature {
                TemperatureStrategy::Fixed => state.temperature,
                TemperatureStrategy::SelfCooling => {
                    let cp = heat::feed_heat_capacity(self.mixture, temperature, state.composition)
                        .map_err(ProcessError::property(step))?;
                    state.temperature
                        - evaporation.get::<joule>()
                            / (cp.get::<joule_per_kilogram_kelvin>() * state.mass)
                }
                TemperatureStrategy::Programmed(program) => {
                    program.temperature(time).get::<kelvin>()
                }
            };

            let next = FeedState {
                time,
                temperature: next_temperature,
                composition: snap_to_unit_interval(
                    (state.composition * state.mass - removed[0]) / mass,
                ),
                mass,
            }
            .validate()
            .map_err(|violation| ProcessError::non_physical(step, violation))?;

            if step + 1 < steps
                && let Some(advanced) = plan.permeances.advance(permeances, &state, &next)
            {
                carried =
                    Some(advanced.map_err(|violation| ProcessError::non_physical(step, violation))?);
            }

            debug!(
                "step {step}: T={:.3} K, x={:.6}, m={:.6} kg, J=({:.6}, {:.6}) kg/(m2 h)",
                next.temperature,
                next.composition,
                next.mass,
                fluxes.first,
                fluxes.second,
            );

            trajectory.permeate_composition.push(solution.permeate);
            trajectory.partial_fluxes.push(fluxes);
            trajectory.permeances.push(permeances);
            trajectory.feed_evaporation_heat.push(evaporation);
            trajectory.permeate_condensation_heat.push(condensation);
            record_state(&mut trajectory, &next);
            state = next;
        }

        info!(
            "{} finished after {steps} steps: T={:.3} K, x={:.6}, m={:.6} kg",
            trajectory.comment, state.temperature, state.composition, state.mass,
        );
        Ok(trajectory)
    }
}

fn record_state(trajectory: &mut ProcessTrajectory, state: &FeedState) {
    trajectory.time.push(state.time);
    trajectory
        .feed_temperature
        .push(ThermodynamicTemperature::new::<kelvin>(state.temperature));
    trajectory
        .feed_composition
        .push(Composition::new_unchecked(state.composition, CompositionBasis::Weight));
    trajectory.feed_mass.push(Mass::new::<kilogram>(state.mass));
}

/// Snaps round-off just outside `[0, 1]` onto the nearest bound.
fn snap_to_unit_interval(x: f64) -> f64 {
    const TOLERANCE: f64 = 1e-12;
    if (-TOLERANCE..0.0).contains(&x) {
        0.0
    } else if x > 1.0 && x <= 1.0 + TOLERANCE {
        1.0
    } else {
        x
    }
}
