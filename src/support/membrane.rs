//! Membranes and their single-component permeance data.
//!
//! A [`Membrane`] stores [`IdealExperiment`]s: permeances measured for one
//! pure component at one temperature. Lookups at other temperatures use an
//! Arrhenius correction with the component's activation energy.

mod error;
mod experiment;
mod permeance;

pub use error::MembraneError;
pub use experiment::{IdealExperiment, Membrane};
pub use permeance::{GPU_MOL_PER_M2_S_PA, Permeance, PermeanceUnits};
