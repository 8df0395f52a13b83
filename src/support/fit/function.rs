use uom::si::{
    f64::{MolarEnergy, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::MOLAR_GAS_CONSTANT;

use super::FitError;

/// A fitted permeance surface `P(x, T) = exp(Σ a_i x^i − (Σ b_j x^j) / T)`.
///
/// `x` is the first component's feed mass fraction and `T` is in kelvin.
/// The function is immutable; corrections produce a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct PermeanceFunction {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl PermeanceFunction {
    /// # Errors
    ///
    /// Returns [`FitError::EmptyCoefficients`] if either polynomial is empty,
    /// or [`FitError::NonFinite`] if a coefficient is NaN or infinite.
    pub fn new(a: Vec<f64>, b: Vec<f64>) -> Result<Self, FitError> {
        if a.is_empty() || b.is_empty() {
            return Err(FitError::EmptyCoefficients);
        }
        if a.iter().chain(&b).any(|c| !c.is_finite()) {
            return Err(FitError::NonFinite);
        }
        Ok(Self { a, b })
    }

    /// Coefficients of the composition polynomial.
    #[must_use]
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Coefficients of the temperature polynomial.
    #[must_use]
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Composition order `n`, the highest power in `a`.
    #[must_use]
    pub fn composition_order(&self) -> usize {
        self.a.len() - 1
    }

    /// Temperature order `m`, the highest power in `b`.
    #[must_use]
    pub fn temperature_order(&self) -> usize {
        self.b.len() - 1
    }

    /// Permeance in kg/(m²·h·kPa).
    #[must_use]
    pub fn value(&self, x: f64, t: f64) -> f64 {
        (polynomial(&self.a, x) - polynomial(&self.b, x) / t).exp()
    }

    /// `∂P/∂x` at `(x, t)`.
    #[must_use]
    pub fn derivative_composition(&self, x: f64, t: f64) -> f64 {
        self.value(x, t) * (derivative(&self.a, x) - derivative(&self.b, x) / t)
    }

    /// `∂P/∂T` at `(x, t)`, per kelvin.
    #[must_use]
    pub fn derivative_temperature(&self, x: f64, t: f64) -> f64 {
        self.value(x, t) * polynomial(&self.b, x) / (t * t)
    }

    /// Folds an activation energy into a function fitted at one temperature.
    ///
    /// The result matches `self` at `reference` and follows an Arrhenius law
    /// with `activation_energy` away from it:
    /// `a0' = a0 + b0/T_ref + Ea/(R·T_ref)` and `b0' = Ea/R`.
    #[must_use]
    pub fn arrhenius(
        &self,
        activation_energy: MolarEnergy,
        reference: ThermodynamicTemperature,
    ) -> Self {
        let ea_over_r = activation_energy.get::<joule_per_mole>() / MOLAR_GAS_CONSTANT;
        let t_ref = reference.get::<kelvin>();

        let mut a = self.a.clone();
        let mut b = self.b.clone();
        a[0] += b[0] / t_ref + ea_over_r / t_ref;
        b[0] = ea_over_r;
        Self { a, b }
    }
}

fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn derivative(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .fold(0.0, |acc, (i, c)| acc * x + i as f64 * c)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn surface() -> PermeanceFunction {
        PermeanceFunction::new(vec![1.2, -0.8, 2.5], vec![2200.0, 300.0]).unwrap()
    }

    #[test]
    fn value_matches_closed_form() {
        let f = surface();
        let (x, t): (f64, f64) = (0.3, 340.0);
        let expected = (1.2 - 0.8 * x + 2.5 * x * x - (2200.0 + 300.0 * x) / t).exp();
        assert_relative_eq!(f.value(x, t), expected, max_relative = 1e-14);
        assert_eq!(f.composition_order(), 2);
        assert_eq!(f.temperature_order(), 1);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let f = surface();
        let (x, t): (f64, f64) = (0.42, 335.0);
        let h = 1e-6;

        let dx = (f.value(x + h, t) - f.value(x - h, t)) / (2.0 * h);
        assert_relative_eq!(f.derivative_composition(x, t), dx, max_relative = 1e-7);

        let dt = (f.value(x, t + h) - f.value(x, t - h)) / (2.0 * h);
        assert_relative_eq!(f.derivative_temperature(x, t), dt, max_relative = 1e-6);
    }

    #[test]
    fn arrhenius_correction_preserves_reference_point() {
        let fitted = PermeanceFunction::new(vec![-3.0, 1.5], vec![0.0]).unwrap();
        let t_ref = 333.15;
        let ea = 25_000.0;
        let corrected = fitted.arrhenius(
            MolarEnergy::new::<joule_per_mole>(ea),
            ThermodynamicTemperature::new::<kelvin>(t_ref),
        );

        assert_relative_eq!(corrected.b()[0], ea / MOLAR_GAS_CONSTANT);
        assert_eq!(corrected.b().len(), 1);
        for x in [0.0, 0.25, 0.9] {
            assert_relative_eq!(
                corrected.value(x, t_ref),
                fitted.value(x, t_ref),
                max_relative = 1e-12
            );
        }

        let t = 353.15;
        let ratio = corrected.value(0.5, t) / corrected.value(0.5, t_ref);
        let expected = (-ea / MOLAR_GAS_CONSTANT * (1.0 / t - 1.0 / t_ref)).exp();
        assert_relative_eq!(ratio, expected, max_relative = 1e-12);
    }

    #[test]
    fn rejects_empty_or_non_finite_coefficients() {
        assert_eq!(
            PermeanceFunction::new(vec![], vec![0.0]),
            Err(FitError::EmptyCoefficients)
        );
        assert_eq!(
            PermeanceFunction::new(vec![f64::NAN], vec![0.0]),
            Err(FitError::NonFinite)
        );
    }
}
