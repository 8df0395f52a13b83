use thiserror::Error;

/// Errors raised while fitting a [`PermeanceFunction`](super::PermeanceFunction).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Fewer positive measurements than coefficients to determine.
    #[error("{available} positive measurements cannot determine {needed} coefficients")]
    NotEnoughData { needed: usize, available: usize },

    /// A temperature-dependent polynomial was requested for isothermal data.
    #[error("temperature order {order} needs measurements at two or more temperatures")]
    SingleTemperature { order: usize },

    /// The least-squares system has no unique solution.
    #[error("least-squares system is singular")]
    Singular,

    /// The regression produced NaN or infinite coefficients.
    #[error("regression produced non-finite coefficients")]
    NonFinite,

    /// Both polynomials need at least one coefficient.
    #[error("permeance function needs at least one `a` and one `b` coefficient")]
    EmptyCoefficients,
}
