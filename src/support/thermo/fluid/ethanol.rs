use uom::si::{
    f64::{MolarEnergy, MolarMass, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_mass::gram_per_mole,
    thermodynamic_temperature::kelvin,
};

use crate::support::thermo::{Antoine, Component, HeatCapacity, VaporizationHeat};

/// Canonical identifier for ethanol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ethanol;

impl From<Ethanol> for Component {
    fn from(_: Ethanol) -> Self {
        Component::new_unchecked(
            "Ethanol",
            MolarMass::new::<gram_per_mole>(46.07),
            Antoine {
                a: 7.329_07,
                b: 1_642.89,
                c: -42.85,
            },
            VaporizationHeat::watson(
                MolarEnergy::new::<joule_per_mole>(38_560.0),
                ThermodynamicTemperature::new::<kelvin>(351.44),
                ThermodynamicTemperature::new::<kelvin>(514.0),
            ),
            HeatCapacity::constant(112.4),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::kilopascal;

    #[test]
    fn ethanol_boils_near_one_atmosphere() {
        let ethanol = Component::from(Ethanol);
        assert_eq!(ethanol.name(), "Ethanol");
        let p = ethanol
            .vapor_pressure(ThermodynamicTemperature::new::<kelvin>(351.44))
            .unwrap();
        assert_relative_eq!(p.get::<kilopascal>(), 101.3, epsilon = 1.5);
    }
}
