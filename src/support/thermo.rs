//! Liquid-mixture thermodynamics for binary pervaporation feeds.
//!
//! A [`Mixture`] is an ordered pair of [`Component`]s with binary NRTL
//! interaction parameters. The order is meaningful: every composition, flux
//! and permeance pair in this crate refers to the "first" and "second"
//! component of the mixture it was computed for.
//!
//! Equilibrium partial pressures are supplied through the
//! [`PartialPressures`](capability::PartialPressures) capability, with
//! [`Nrtl`](model::Nrtl) as the provided implementation.

mod component;
mod composition;
mod error;
mod mixture;

pub mod capability;
pub mod fluid;
pub mod model;

pub use component::{Antoine, Component, HeatCapacity, VaporizationHeat};
pub use composition::{Composition, CompositionBasis};
pub use error::PropertyError;
pub use mixture::{Mixture, NrtlParameters};
