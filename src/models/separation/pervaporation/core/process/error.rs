use thiserror::Error;

use crate::{
    models::separation::pervaporation::core::FluxError,
    support::{
        constraint::ConstraintError,
        fit::{ComponentIndex, FitError},
        membrane::MembraneError,
        thermo::PropertyError,
    },
};

/// A physical invariant broken by a process step.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Violation {
    #[error("feed mass {mass} kg is not positive")]
    FeedDepleted { mass: f64 },

    #[error("feed mass fraction {fraction} is outside [0, 1]")]
    CompositionOutOfRange { fraction: f64 },

    #[error("feed temperature {temperature} K is not positive")]
    TemperatureOutOfRange { temperature: f64 },

    #[error("{component:?} component permeance {value} is not positive")]
    PermeanceNotPositive { component: ComponentIndex, value: f64 },
}

/// Errors that abort a batch process run.
///
/// Step indices are zero-based.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The time step is not strictly positive.
    #[error("invalid time step")]
    InvalidTimeStep(#[source] ConstraintError),

    #[error("flux solver failed at step {step}")]
    Flux {
        step: usize,
        #[source]
        source: FluxError,
    },

    #[error("membrane permeance unavailable at step {step}")]
    Permeance {
        step: usize,
        #[source]
        source: MembraneError,
    },

    #[error("property evaluation failed at step {step}")]
    Property {
        step: usize,
        #[source]
        source: PropertyError,
    },

    /// A state or permeance produced by `step` is not physical.
    #[error("non-physical state at step {step}: {violation}")]
    NonPhysical { step: usize, violation: Violation },

    #[error("permeance fit failed")]
    Fit(#[from] FitError),

    #[error("permeances could not be extracted from diffusion curves")]
    Measurements(#[source] PropertyError),

    #[error("activation energy unavailable for a single-temperature fit")]
    ActivationEnergy(#[source] MembraneError),
}

impl ProcessError {
    pub(super) fn property(step: usize) -> impl FnOnce(PropertyError) -> Self {
        move |source| Self::Property { step, source }
    }

    pub(super) fn non_physical(step: usize, violation: Violation) -> Self {
        Self::NonPhysical { step, violation }
    }
}
