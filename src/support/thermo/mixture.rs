use super::Component;

/// Binary NRTL interaction parameters.
///
/// `τ12 = a12 + b12 / T`, `τ21 = a21 + b21 / T` with `T` in kelvin, and
/// `G_ij = exp(-α τ_ij)`. Index 1 is the mixture's first component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NrtlParameters {
    pub a12: f64,
    pub a21: f64,
    pub b12: f64,
    pub b21: f64,
    pub alpha: f64,
}

impl NrtlParameters {
    /// Returns `[τ12, τ21]` at `t` kelvin.
    #[must_use]
    pub fn tau(&self, t: f64) -> [f64; 2] {
        [self.a12 + self.b12 / t, self.a21 + self.b21 / t]
    }
}

/// An ordered pair of components with their NRTL interaction parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    first: Component,
    second: Component,
    nrtl: NrtlParameters,
}

impl Mixture {
    #[must_use]
    pub fn new(first: Component, second: Component, nrtl: NrtlParameters) -> Self {
        Self {
            first,
            second,
            nrtl,
        }
    }

    #[must_use]
    pub fn first(&self) -> &Component {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &Component {
        &self.second
    }

    #[must_use]
    pub fn components(&self) -> [&Component; 2] {
        [&self.first, &self.second]
    }

    #[must_use]
    pub fn nrtl(&self) -> &NrtlParameters {
        &self.nrtl
    }

    /// A display name such as `"Water / Ethanol"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} / {}", self.first.name(), self.second.name())
    }
}
