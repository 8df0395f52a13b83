//! Extensions to [`uom`].
//!
//! Physical quantities at the public boundary of this crate are [`uom`] types.
//! This module adds the few pieces the separation models need that [`uom`]
//! does not provide directly.
//!
//! ## Temperature differences
//!
//! Heat duties depend on the difference between feed and permeate temperatures.
//! [`TemperatureDifference::minus`] subtracts two absolute temperatures and
//! returns a [`TemperatureInterval`](uom::si::f64::TemperatureInterval):
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use pervaporation_models::support::units::TemperatureDifference;
//!
//! let feed = ThermodynamicTemperature::new::<kelvin>(350.0);
//! let permeate = ThermodynamicTemperature::new::<kelvin>(263.15);
//! let _cooling = feed.minus(permeate);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{MOLAR_GAS_CONSTANT, SpecificEnthalpy};
pub use temperature_difference::TemperatureDifference;
