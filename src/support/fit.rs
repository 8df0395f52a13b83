//! Composition–temperature permeance surfaces fitted to measurements.
//!
//! A [`PermeanceFunction`] has the form
//!
//! ```text
//! P(x, T) = exp( Σ a_i x^i − (Σ b_j x^j) / T )
//! ```
//!
//! where `x` is the first component's mass fraction in the feed and `T` is
//! the feed temperature in kelvin. Permeances are in kg/(m²·h·kPa).
//!
//! [`fit`] regresses a function of fixed polynomial orders and
//! [`find_best_fit`] selects orders by the Akaike information criterion.

mod error;
mod function;
mod measurements;
mod regression;

pub use error::FitError;
pub use function::PermeanceFunction;
pub use measurements::{ComponentIndex, Measurement, Measurements};
pub use regression::{FitOrders, find_best_fit, fit};
