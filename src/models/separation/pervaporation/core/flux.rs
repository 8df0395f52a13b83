//! Steady partial fluxes at one feed operating point.
//!
//! Each component permeates at `J_i = P_i · (p_i^feed − p_i^permeate)`.
//! The permeate-side pressures depend on the permeate composition, which in
//! turn is set by the fluxes, so the solver iterates on the permeate mass
//! fraction `y = J1 / (J1 + J2)` until it stops changing.

mod config;
mod error;
mod problem;

pub use config::{FluxMethod, FluxSolverConfig};
pub use error::FluxError;

use log::debug;
use twine_solvers::equation::{EvalError, bisection};
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::{
    membrane::MembraneError,
    thermo::{Composition, CompositionBasis, capability::PartialPressures},
};

use super::{PartialFluxes, PermeateCondition, PermeancePair, Pervaporation};

use problem::{PermeateEstimate, PermeateProblem};

/// A converged flux solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxSolution {
    pub fluxes: PartialFluxes,

    /// Permeate mass fraction implied by `fluxes`.
    pub permeate: Composition,

    /// Iterations performed.
    pub iters: usize,

    /// Change in permeate mass fraction at the returned iterate.
    pub change: f64,
}

/// Flux evaluation at fixed feed state and permeances.
struct FluxEvaluator<'p, 'a, E> {
    process: &'p Pervaporation<'a, E>,
    permeances: PermeancePair,
    feed_pressures: [f64; 2],
    permeate: PermeateCondition,
}

impl<E: PartialPressures> FluxEvaluator<'_, '_, E> {
    fn fluxes_with(&self, permeate_pressures: [f64; 2]) -> Result<PartialFluxes, FluxError> {
        let [pf1, pf2] = self.feed_pressures;
        let [pp1, pp2] = permeate_pressures;
        let fluxes = PartialFluxes::new(
            self.permeances.first() * (pf1 - pp1),
            self.permeances.second() * (pf2 - pp2),
        );
        if fluxes.first.is_finite() && fluxes.second.is_finite() {
            Ok(fluxes)
        } else {
            Err(FluxError::Undefined {
                context: format!("non-finite fluxes {fluxes:?}"),
            })
        }
    }

    /// Fluxes with the permeate side evaluated at mass fraction `y`.
    fn fluxes_at(&self, y: Composition) -> Result<PartialFluxes, FluxError> {
        let pressures = self.process.permeate_pressures(self.permeate, y)?;
        self.fluxes_with(pressures)
    }

    fn fixed_point(&self, config: &FluxSolverConfig) -> Result<FluxSolution, FluxError> {
        // Seed with an empty permeate side.
        let mut y = self.fluxes_with([0.0, 0.0])?.permeate_composition()?;
        let mut change = f64::INFINITY;

        for iters in 1..=config.max_iters {
            let next = self.fluxes_at(y)?.permeate_composition()?;
            change = (next.first() - y.first())
                .abs()
                .max((next.second() - y.second()).abs());
            y = next;

            if change < config.precision {
                let fluxes = self.fluxes_at(y)?;
                let permeate = fluxes.permeate_composition()?;
                debug!(
                    "flux solver converged in {iters} iterations: y={:.6}, change={change:e}",
                    permeate.first()
                );
                return Ok(FluxSolution {
                    fluxes,
                    permeate,
                    iters,
                    change,
                });
            }
        }

        Err(FluxError::NotConverged {
            change,
            iters: config.max_iters,
        })
    }

    fn bisection(&self, config: &FluxSolverConfig) -> Result<FluxSolution, FluxError> {
        // Equilibrium errors at either end abort before bracketing.
        for end in [0.0, 1.0] {
            self.fluxes_at(Composition::new_unchecked(end, CompositionBasis::Weight))?;
        }

        let solution = bisection::solve(
            self,
            &PermeateProblem,
            [0.0, 1.0],
            &config.bisection(),
            |event: &bisection::Event<'_, _, _>| {
                // No net flux: steer the bracket toward the first component.
                if matches!(event.result(), Err(EvalError::Model(FluxError::Undefined { .. }))) {
                    return Some(bisection::Action::assume_positive());
                }
                None
            },
        )?;

        if solution.status != bisection::Status::Converged {
            return Err(FluxError::NotConverged {
                change: solution.residual.abs(),
                iters: solution.iters,
            });
        }

        let PermeateEstimate { fluxes, .. } = solution.snapshot.output;
        let permeate = fluxes.permeate_composition()?;
        debug!(
            "flux bisection converged in {} iterations: y={:.6}",
            solution.iters,
            permeate.first()
        );
        Ok(FluxSolution {
            fluxes,
            permeate,
            iters: solution.iters,
            change: solution.residual.abs(),
        })
    }
}

impl<E: PartialPressures> Pervaporation<'_, E> {
    /// Permeances of both components from the membrane at `feed_temperature`.
    ///
    /// # Errors
    ///
    /// Fails if the membrane has no usable data for either component.
    pub fn membrane_permeances(
        &self,
        feed_temperature: ThermodynamicTemperature,
    ) -> Result<PermeancePair, MembraneError> {
        let first = self
            .membrane
            .get_permeance(feed_temperature, self.mixture.first())?;
        let second = self
            .membrane
            .get_permeance(feed_temperature, self.mixture.second())?;
        Ok(PermeancePair::from_permeances(first, second, self.mixture))
    }

    /// Solves for steady partial fluxes at one feed operating point.
    ///
    /// Without `permeances`, they are looked up from the membrane at the feed
    /// temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`FluxError`] if the equilibrium is undefined, the fluxes
    /// leave the physical range, or the iteration does not converge.
    pub fn solve_fluxes(
        &self,
        feed_temperature: ThermodynamicTemperature,
        feed_composition: Composition,
        permeances: Option<PermeancePair>,
        permeate: PermeateCondition,
        config: &FluxSolverConfig,
    ) -> Result<FluxSolution, FluxError> {
        let permeances = match permeances {
            Some(permeances) => permeances,
            None => self.membrane_permeances(feed_temperature)?,
        };
        let feed_pressures = self.partial_pressures(feed_temperature, feed_composition)?;

        debug!(
            "solving fluxes at T={:.3} K, x={:.6}, P=({:e}, {:e})",
            feed_temperature.get::<kelvin>(),
            feed_composition.first(),
            permeances.first(),
            permeances.second(),
        );

        let evaluator = FluxEvaluator {
            process: self,
            permeances,
            feed_pressures,
            permeate,
        };
        match config.method {
            FluxMethod::FixedPoint => evaluator.fixed_point(config),
            FluxMethod::Bisection => evaluator.bisection(config),
        }
    }

    /// Partial fluxes in kg/(m²·h).
    ///
    /// # Errors
    ///
    /// See [`Self::solve_fluxes`].
    pub fn calculate_partial_fluxes(
        &self,
        feed_temperature: ThermodynamicTemperature,
        feed_composition: Composition,
        permeances: Option<PermeancePair>,
        permeate: PermeateCondition,
        config: &FluxSolverConfig,
    ) -> Result<PartialFluxes, FluxError> {
        self.solve_fluxes(feed_temperature, feed_composition, permeances, permeate, config)
            .map(|solution| solution.fluxes)
    }

    /// Permeate mass fraction of the first component.
    ///
    /// # Errors
    ///
    /// See [`Self::solve_fluxes`].
    pub fn calculate_permeate_composition(
        &self,
        feed_temperature: ThermodynamicTemperature,
        feed_composition: Composition,
        permeances: Option<PermeancePair>,
        permeate: PermeateCondition,
        config: &FluxSolverConfig,
    ) -> Result<Composition, FluxError> {
        self.solve_fluxes(feed_temperature, feed_composition, permeances, permeate, config)
            .map(|solution| solution.permeate)
    }

    /// Separation factor `(x2 / (1 − x2)) / (y2 / (1 − y2))` on mass fractions.
    ///
    /// # Errors
    ///
    /// Fails as [`Self::solve_fluxes`] does, or with [`FluxError::Undefined`]
    /// when either composition is pure.
    pub fn calculate_separation_factor(
        &self,
        feed_temperature: ThermodynamicTemperature,
        feed_composition: Composition,
        permeances: Option<PermeancePair>,
        permeate: PermeateCondition,
        config: &FluxSolverConfig,
    ) -> Result<f64, FluxError> {
        let x = feed_composition.to_weight(self.mixture);
        let y = self.calculate_permeate_composition(
            feed_temperature,
            feed_composition,
            permeances,
            permeate,
            config,
        )?;
        let factor = (x.second() / (1.0 - x.second())) / (y.second() / (1.0 - y.second()));
        if factor.is_finite() {
            Ok(factor)
        } else {
            Err(FluxError::Undefined {
                context: format!(
                    "separation factor for feed {} and permeate {}",
                    x.first(),
                    y.first()
                ),
            })
        }
    }
}
