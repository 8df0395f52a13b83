use uom::si::{
    f64::{MolarEnergy, MolarMass, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_mass::gram_per_mole,
    thermodynamic_temperature::kelvin,
};

use crate::support::thermo::{Antoine, Component, HeatCapacity, VaporizationHeat};

/// Canonical identifier for water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Water;

impl From<Water> for Component {
    fn from(_: Water) -> Self {
        Component::new_unchecked(
            "Water",
            MolarMass::new::<gram_per_mole>(18.015),
            Antoine {
                a: 7.196_21,
                b: 1_730.63,
                c: -39.724,
            },
            VaporizationHeat::watson(
                MolarEnergy::new::<joule_per_mole>(40_660.0),
                ThermodynamicTemperature::new::<kelvin>(373.15),
                ThermodynamicTemperature::new::<kelvin>(647.1),
            ),
            HeatCapacity::constant(75.3),
        )
    }
}
