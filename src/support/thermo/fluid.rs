//! Preset components and mixtures.
//!
//! Each preset is a unit-like type that builds its [`Component`]; the
//! [`water_ethanol`] mixture pairs them with literature NRTL parameters.

mod ethanol;
mod water;

pub use ethanol::Ethanol;
pub use water::Water;

use super::{Component, Mixture, NrtlParameters};

/// Water as a [`Component`].
#[must_use]
pub fn water() -> Component {
    Water.into()
}

/// Ethanol as a [`Component`].
#[must_use]
pub fn ethanol() -> Component {
    Ethanol.into()
}

/// Water (first) and ethanol (second) with NRTL parameters regressed from
/// atmospheric vapor-liquid equilibrium data.
#[must_use]
pub fn water_ethanol() -> Mixture {
    Mixture::new(
        water(),
        ethanol(),
        NrtlParameters {
            a12: 3.4578,
            a21: -0.8009,
            b12: -586.0809,
            b21: 246.18,
            alpha: 0.3,
        },
    )
}
