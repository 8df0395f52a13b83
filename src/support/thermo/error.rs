use thiserror::Error;

/// Errors that may occur when evaluating thermodynamic properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    ///
    /// For example, a latent heat requested above the critical temperature.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The input state is outside the model's valid domain.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provided state is invalid or inconsistent.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The calculation failed due to a numerical or internal error.
    ///
    /// For example, an activity coefficient that overflows to infinity.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}

impl PropertyError {
    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }

    pub(crate) fn calculation(context: impl Into<String>) -> Self {
        Self::Calculation {
            context: context.into(),
        }
    }

    /// Returns `value` if it is finite, otherwise a calculation error naming `what`.
    pub(crate) fn finite(value: f64, what: &str) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::calculation(format!("{what} is not finite ({value})")))
        }
    }
}
