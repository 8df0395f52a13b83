//! Permeate composition as a bracketed root for bisection.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};

use crate::support::thermo::{Composition, capability::PartialPressures};

use super::{FluxError, FluxEvaluator, PartialFluxes};

/// Fluxes at a trial permeate composition and the mass fraction they imply.
///
/// `next` is clamped to `[0, 1]`, so a trial that drives one flux negative
/// still yields a residual with the correct sign.
#[derive(Debug, Clone, Copy)]
pub(super) struct PermeateEstimate {
    pub(super) fluxes: PartialFluxes,
    pub(super) next: f64,
}

impl<E: PartialPressures> Model for FluxEvaluator<'_, '_, E> {
    type Input = f64;
    type Output = PermeateEstimate;
    type Error = FluxError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let trial = Composition::weight(input.clamp(0.0, 1.0)).map_err(|err| FluxError::Undefined {
            context: format!("trial permeate composition {input}: {err}"),
        })?;
        let fluxes = self.fluxes_at(trial)?;
        let total = fluxes.total();
        if !(total > 0.0) {
            return Err(FluxError::Undefined {
                context: format!("no net flux at trial permeate composition {input}"),
            });
        }
        let next = (fluxes.first / total).clamp(0.0, 1.0);
        Ok(PermeateEstimate { fluxes, next })
    }
}

/// Residual `y_new(y) - y` on the first component's permeate mass fraction.
pub(super) struct PermeateProblem;

impl EquationProblem<1> for PermeateProblem {
    type Input = f64;
    type Output = PermeateEstimate;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.next - input])
    }
}
