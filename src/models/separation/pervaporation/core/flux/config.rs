use twine_solvers::equation::bisection;

/// How the permeate-composition fixed point is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FluxMethod {
    /// Successive substitution from a vacuum-permeate seed.
    #[default]
    FixedPoint,

    /// Bracketed root of `y_new(y) - y` on `[0, 1]`.
    Bisection,
}

/// Flux solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxSolverConfig {
    /// Tolerance on the change in permeate mass fraction between iterates.
    pub precision: f64,

    /// Maximum iteration count before reporting non-convergence.
    pub max_iters: usize,

    pub method: FluxMethod,
}

impl Default for FluxSolverConfig {
    fn default() -> Self {
        Self {
            precision: 5e-5,
            max_iters: 100,
            method: FluxMethod::FixedPoint,
        }
    }
}

impl FluxSolverConfig {
    #[must_use]
    pub fn with_precision(self, precision: f64) -> Self {
        Self { precision, ..self }
    }

    #[must_use]
    pub fn with_method(self, method: FluxMethod) -> Self {
        Self { method, ..self }
    }

    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.precision * 1e-3,
            x_rel_tol: 0.0,
            residual_tol: self.precision,
        }
    }
}
