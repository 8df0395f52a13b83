use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use crate::support::thermo::{
    Composition, Mixture, PropertyError, capability::PartialPressures,
};

/// Modified Raoult's law with NRTL activity coefficients.
///
/// `p_i = x_i γ_i Psat_i(T)`, where `x_i` is the liquid mole fraction,
/// `γ_i` comes from the binary NRTL model, and `Psat_i` from each
/// component's Antoine correlation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nrtl;

impl Nrtl {
    /// Returns `[γ1, γ2]` for the given mixture state.
    ///
    /// # Errors
    ///
    /// Fails if the temperature is not positive or a coefficient is not finite.
    pub fn activity_coefficients(
        &self,
        temperature: ThermodynamicTemperature,
        mixture: &Mixture,
        composition: Composition,
    ) -> Result<[f64; 2], PropertyError> {
        let t = temperature.get::<kelvin>();
        if !(t > 0.0) {
            return Err(PropertyError::out_of_domain(format!(
                "NRTL needs a positive temperature, got {t} K"
            )));
        }

        let x = composition.to_mole(mixture);
        let (x1, x2) = (x.first(), x.second());
        let params = mixture.nrtl();
        let [tau12, tau21] = params.tau(t);
        let g12 = (-params.alpha * tau12).exp();
        let g21 = (-params.alpha * tau21).exp();

        let d1 = x1 + x2 * g21;
        let d2 = x2 + x1 * g12;

        let ln_gamma1 = x2 * x2 * (tau21 * (g21 / d1).powi(2) + tau12 * g12 / (d2 * d2));
        let ln_gamma2 = x1 * x1 * (tau12 * (g12 / d2).powi(2) + tau21 * g21 / (d1 * d1));

        Ok([
            PropertyError::finite(ln_gamma1.exp(), "activity coefficient of the first component")?,
            PropertyError::finite(ln_gamma2.exp(), "activity coefficient of the second component")?,
        ])
    }
}

impl PartialPressures for Nrtl {
    fn partial_pressures(
        &self,
        temperature: ThermodynamicTemperature,
        mixture: &Mixture,
        composition: Composition,
    ) -> Result<[Pressure; 2], PropertyError> {
        let [gamma1, gamma2] = self.activity_coefficients(temperature, mixture, composition)?;
        let x = composition.to_mole(mixture);

        let psat1 = mixture.first().vapor_pressure(temperature)?;
        let psat2 = mixture.second().vapor_pressure(temperature)?;

        Ok([psat1 * (x.first() * gamma1), psat2 * (x.second() * gamma2)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::kilopascal;

    use crate::support::thermo::fluid::water_ethanol;

    fn at(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(t)
    }

    #[test]
    fn water_ethanol_at_350_kelvin() {
        let mixture = water_ethanol();
        let w = Composition::weight(0.1).unwrap();

        let [gamma1, gamma2] = Nrtl.activity_coefficients(at(350.0), &mixture, w).unwrap();
        assert_relative_eq!(gamma1, 2.0294, epsilon = 1e-3);
        assert_relative_eq!(gamma2, 1.0321, epsilon = 1e-3);

        let [p1, p2] = Nrtl.partial_pressures(at(350.0), &mixture, w).unwrap();
        assert_relative_eq!(p1.get::<kilopascal>(), 18.655, epsilon = 1e-2);
        assert_relative_eq!(p2.get::<kilopascal>(), 76.800, epsilon = 1e-2);
    }

    #[test]
    fn basis_does_not_change_the_result() {
        let mixture = water_ethanol();
        let w = Composition::weight(0.3).unwrap();
        let x = w.to_mole(&mixture);

        let from_weight = Nrtl.partial_pressures(at(320.0), &mixture, w).unwrap();
        let from_mole = Nrtl.partial_pressures(at(320.0), &mixture, x).unwrap();
        for (a, b) in from_weight.iter().zip(&from_mole) {
            assert_relative_eq!(a.get::<kilopascal>(), b.get::<kilopascal>(), max_relative = 1e-12);
        }
    }

    #[test]
    fn pure_components() {
        let mixture = water_ethanol();

        let [p1, p2] = Nrtl
            .partial_pressures(at(350.0), &mixture, Composition::weight(0.0).unwrap())
            .unwrap();
        assert_eq!(p1.get::<kilopascal>(), 0.0);
        assert_relative_eq!(p2.get::<kilopascal>(), 95.554, epsilon = 1e-2);

        let [p1, p2] = Nrtl
            .partial_pressures(at(350.0), &mixture, Composition::weight(1.0).unwrap())
            .unwrap();
        assert_relative_eq!(p1.get::<kilopascal>(), 41.543, epsilon = 1e-2);
        assert_eq!(p2.get::<kilopascal>(), 0.0);
    }

    #[test]
    fn infinite_dilution_activity() {
        let mixture = water_ethanol();
        let [gamma1, _] = Nrtl
            .activity_coefficients(at(350.0), &mixture, Composition::mole(0.0).unwrap())
            .unwrap();
        let [_, gamma2] = Nrtl
            .activity_coefficients(at(350.0), &mixture, Composition::mole(1.0).unwrap())
            .unwrap();
        assert_relative_eq!(gamma1, 2.5777, epsilon = 1e-3);
        assert_relative_eq!(gamma2, 5.3809, epsilon = 1e-3);
    }

    #[test]
    fn rejects_non_positive_temperature() {
        let mixture = water_ethanol();
        let result = Nrtl.activity_coefficients(at(0.0), &mixture, Composition::mole(0.5).unwrap());
        assert!(matches!(result, Err(PropertyError::OutOfDomain { .. })));
    }
}
