//! Supporting utilities used by models.
//!
//! - [`constraint`]: Type-level numeric invariants.
//! - [`units`]: Extensions to [`uom`].
//! - [`thermo`]: Components, mixtures and equilibrium pressures.
//! - [`membrane`]: Permeances and measured membrane data.
//! - [`fit`]: Fitted permeance surfaces.

pub mod constraint;
pub mod fit;
pub mod membrane;
pub mod thermo;
pub mod units;
