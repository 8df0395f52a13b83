use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::support::{membrane::MembraneError, thermo::PropertyError};

/// Errors that can occur while solving for partial fluxes.
#[derive(Debug, Error)]
pub enum FluxError {
    /// Permeate temperature and permeate pressure were both given.
    #[error("permeate temperature and permeate pressure cannot both be stated")]
    ConflictingPermeateConditions,

    /// Equilibrium pressures are undefined at the operating point.
    #[error("partial pressures are not defined in the stated conditions")]
    Equilibrium(#[from] PropertyError),

    /// The fluxes or permeate composition left the physical range.
    #[error("partial fluxes are not defined in the stated conditions: {context}")]
    Undefined { context: String },

    /// The permeate composition did not settle within the iteration limit.
    #[error("flux solver did not converge in {iters} iterations: change={change:e}")]
    NotConverged {
        /// Last change in permeate mass fraction.
        change: f64,
        iters: usize,
    },

    /// Permeances could not be obtained from the membrane.
    #[error("membrane permeance lookup failed")]
    Permeance(#[from] MembraneError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),
}
