use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N2, P2, Z0},
};

/// Specific enthalpy, J/kg in SI.
///
/// Used for latent heats normalized by molar mass.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Molar gas constant, J/(mol·K).
pub const MOLAR_GAS_CONSTANT: f64 = 8.314_462_618;
