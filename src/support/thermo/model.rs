//! Mixture equilibrium models.

mod nrtl;

pub use nrtl::Nrtl;
