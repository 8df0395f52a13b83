//! Pervaporation flux solver and batch process integrator.
//!
//! [`Pervaporation`] pairs a [`Membrane`] with a [`Mixture`] and an
//! equilibrium model. Given permeances, it solves for steady partial fluxes
//! at one feed operating point, sweeps those points into diffusion curves,
//! and marches a batch feed through time under one of four regimes.
//!
//! Canonical units inside the core are K, kPa, kg, m² and h; fluxes are in
//! kg/(m²·h) and permeances in kg/(m²·h·kPa).

mod diffusion_curve;
mod fit_builder;
mod flux;
mod fluxes;
mod input;
mod process;

#[cfg(test)]
pub(super) mod test_support;

pub use diffusion_curve::{DiffusionCurve, DiffusionCurveSet};
pub use fit_builder::{FitOptions, NonIdeal, PermeanceFits};
pub use flux::{FluxError, FluxMethod, FluxSolution, FluxSolverConfig};
pub use fluxes::{PartialFluxes, PermeancePair};
pub use input::{Conditions, PermeateCondition, TemperatureProgram, TemperatureProgramError};
pub use process::{ProcessError, ProcessTrajectory, Regime, RegimeKind, Violation};

use uom::si::{
    f64::ThermodynamicTemperature, pressure::kilopascal, thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::NonNegative,
    membrane::Membrane,
    thermo::{Composition, Mixture, PropertyError, capability::PartialPressures, model::Nrtl},
};

/// Entry point for pervaporation calculations on one membrane and mixture.
///
/// The membrane and mixture are borrowed and never mutated, so one pair can
/// back many independent runs.
#[derive(Debug, Clone, Copy)]
pub struct Pervaporation<'a, E = Nrtl> {
    membrane: &'a Membrane,
    mixture: &'a Mixture,
    equilibrium: E,
}

impl<'a> Pervaporation<'a, Nrtl> {
    /// Uses the [`Nrtl`] model for equilibrium partial pressures.
    #[must_use]
    pub fn new(membrane: &'a Membrane, mixture: &'a Mixture) -> Self {
        Self::with_equilibrium(membrane, mixture, Nrtl)
    }
}

impl<'a, E: PartialPressures> Pervaporation<'a, E> {
    #[must_use]
    pub fn with_equilibrium(membrane: &'a Membrane, mixture: &'a Mixture, equilibrium: E) -> Self {
        Self {
            membrane,
            mixture,
            equilibrium,
        }
    }

    #[must_use]
    pub fn membrane(&self) -> &'a Membrane {
        self.membrane
    }

    #[must_use]
    pub fn mixture(&self) -> &'a Mixture {
        self.mixture
    }

    #[must_use]
    pub fn equilibrium(&self) -> &E {
        &self.equilibrium
    }

    /// `"<membrane> <first> / <second>"`, used to label records.
    fn label(&self) -> String {
        format!("{} {}", self.membrane.name(), self.mixture.name())
    }

    /// Equilibrium partial pressures in kPa.
    fn partial_pressures(
        &self,
        temperature: ThermodynamicTemperature,
        composition: Composition,
    ) -> Result<[f64; 2], PropertyError> {
        let [p1, p2] = self
            .equilibrium
            .partial_pressures(temperature, self.mixture, composition)?;
        Ok([p1.get::<kilopascal>(), p2.get::<kilopascal>()])
    }

    /// Permeate-side partial pressures in kPa for permeate mass fraction `y`.
    fn permeate_pressures(
        &self,
        permeate: PermeateCondition,
        y: Composition,
    ) -> Result<[f64; 2], PropertyError> {
        match permeate {
            PermeateCondition::Vacuum => Ok([0.0, 0.0]),
            PermeateCondition::Temperature(t) => {
                if !(t.get::<kelvin>() > 0.0) {
                    return Err(PropertyError::OutOfDomain {
                        context: format!("permeate temperature {} K", t.get::<kelvin>()),
                    });
                }
                self.partial_pressures(t, y)
            }
            PermeateCondition::Pressure(p) => {
                let p = NonNegative::new(p)
                    .map_err(|err| PropertyError::OutOfDomain {
                        context: format!("permeate pressure: {err}"),
                    })?
                    .into_inner()
                    .get::<kilopascal>();
                let y = y.to_weight(self.mixture);
                Ok([p * y.first(), p * y.second()])
            }
        }
    }
}
