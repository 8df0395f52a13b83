use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors raised by membrane permeance lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MembraneError {
    /// The membrane stores no experiment for the component.
    #[error("membrane {membrane} has no permeance data for {component}")]
    NoData { membrane: String, component: String },

    /// Neither a stored value nor experiments at two or more temperatures exist.
    #[error("activation energy of {component} on {membrane} cannot be determined")]
    ActivationEnergyUnavailable { membrane: String, component: String },

    /// The extrapolated permeance is not a positive finite number.
    #[error("permeance of {component} is invalid at {temperature} K")]
    InvalidPermeance {
        component: String,
        temperature: f64,
        #[source]
        source: ConstraintError,
    },
}
