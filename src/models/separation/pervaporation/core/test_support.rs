use uom::si::{
    area::square_meter,
    f64::{Area, Mass, ThermodynamicTemperature},
    mass::kilogram,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    membrane::{IdealExperiment, Membrane, Permeance},
    thermo::{Composition, Mixture, fluid},
    units::MOLAR_GAS_CONSTANT,
};

use super::Conditions;

/// Activation energy of water permeation on the test membrane, J/mol.
pub(crate) const WATER_EA: f64 = 20_000.0;

/// Activation energy of ethanol permeation on the test membrane, J/mol.
pub(crate) const ETHANOL_EA: f64 = 30_000.0;

pub(crate) fn kelvin_at(k: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(k)
}

pub(crate) fn weight(first: f64) -> Composition {
    Composition::weight(first).unwrap()
}

pub(crate) fn mixture() -> Mixture {
    fluid::water_ethanol()
}

/// Arrhenius permeance with reference `p_ref` at 350 K.
pub(crate) fn arrhenius(p_ref: f64, ea: f64, t: f64) -> f64 {
    p_ref * (-ea / MOLAR_GAS_CONSTANT * (1.0 / t - 1.0 / 350.0)).exp()
}

/// A water-selective membrane with 0.01 / 0.002 kg/(m² h kPa) at 350 K and
/// experiments at 320 K consistent with [`WATER_EA`] and [`ETHANOL_EA`].
pub(crate) fn membrane() -> Membrane {
    let water = fluid::water();
    let ethanol = fluid::ethanol();
    let experiment = |component, t: f64, p: f64| {
        IdealExperiment::new(component, kelvin_at(t), Permeance::kg_per_m2_h_kpa(p).unwrap())
    };
    Membrane::new(
        "Test membrane",
        vec![
            experiment(&water, 350.0, 0.01),
            experiment(&water, 320.0, arrhenius(0.01, WATER_EA, 320.0)),
            experiment(&ethanol, 350.0, 0.002),
            experiment(&ethanol, 320.0, arrhenius(0.002, ETHANOL_EA, 320.0)),
        ],
    )
}

/// 10 kg of feed at 350 K on 0.5 m² of membrane.
pub(crate) fn conditions(first: f64) -> Conditions {
    Conditions::new(
        Area::new::<square_meter>(0.5),
        kelvin_at(350.0),
        weight(first),
        Mass::new::<kilogram>(10.0),
    )
    .unwrap()
}
