//! # Pervaporation Models
//!
//! Pervaporation flux and batch process models built on
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A liquid feed contacts a membrane whose other side is held at low pressure.
//! Each component permeates in proportion to its permeance and the difference
//! between its equilibrium partial pressure over the feed and its partial
//! pressure on the permeate side. The feed loses mass, shifts composition and,
//! without external heating, cools as the permeate evaporates.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Example
//!
//! ```
//! use pervaporation_models::{
//!     models::separation::pervaporation::{
//!         Conditions, FluxSolverConfig, Pervaporation, Regime,
//!     },
//!     support::{
//!         membrane::{IdealExperiment, Membrane, Permeance},
//!         thermo::{Composition, fluid},
//!     },
//! };
//! use uom::si::{
//!     area::square_meter,
//!     f64::{Area, Mass, ThermodynamicTemperature, Time},
//!     mass::kilogram,
//!     thermodynamic_temperature::kelvin,
//!     time::hour,
//! };
//!
//! let at = ThermodynamicTemperature::new::<kelvin>;
//! let membrane = Membrane::new(
//!     "Hydrophilic",
//!     vec![
//!         IdealExperiment::new(&fluid::water(), at(350.0), Permeance::kg_per_m2_h_kpa(0.01)?),
//!         IdealExperiment::new(&fluid::ethanol(), at(350.0), Permeance::kg_per_m2_h_kpa(0.002)?),
//!     ],
//! );
//! let mixture = fluid::water_ethanol();
//! let process = Pervaporation::new(&membrane, &mixture);
//!
//! let conditions = Conditions::new(
//!     Area::new::<square_meter>(0.5),
//!     at(350.0),
//!     Composition::weight(0.1)?,
//!     Mass::new::<kilogram>(10.0),
//! )?;
//! let run = process.run_process(
//!     &Regime::IdealIsothermal,
//!     &conditions,
//!     10,
//!     Time::new::<hour>(1.0),
//!     &FluxSolverConfig::default(),
//! )?;
//! assert_eq!(run.feed_mass.len(), 11);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Units
//!
//! Quantities crossing the public API are [`uom`] types. Plain `f64` values
//! inside the models use K, kPa, kg, m² and h, so fluxes are kg/(m²·h) and
//! permeances kg/(m²·h·kPa).
//!
//! The [`support`] modules are public for building membranes, mixtures and
//! fits, but their APIs are still settling.

pub mod models;
pub mod support;
