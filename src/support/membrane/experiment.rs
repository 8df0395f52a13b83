use uom::si::{
    f64::{MolarEnergy, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    thermodynamic_temperature::kelvin,
};

use crate::support::{thermo::Component, units::MOLAR_GAS_CONSTANT};

use super::{MembraneError, Permeance};

/// Temperatures closer than this are treated as the same measurement point.
const SAME_TEMPERATURE_K: f64 = 1e-9;

/// A pure-component permeance measured at one temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealExperiment {
    component: String,
    temperature: ThermodynamicTemperature,
    permeance: Permeance,
    activation_energy: Option<MolarEnergy>,
}

impl IdealExperiment {
    #[must_use]
    pub fn new(
        component: &Component,
        temperature: ThermodynamicTemperature,
        permeance: Permeance,
    ) -> Self {
        Self {
            component: component.name().to_owned(),
            temperature,
            permeance,
            activation_energy: None,
        }
    }

    /// Attaches an independently known activation energy.
    #[must_use]
    pub fn with_activation_energy(mut self, activation_energy: MolarEnergy) -> Self {
        self.activation_energy = Some(activation_energy);
        self
    }

    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    #[must_use]
    pub fn permeance(&self) -> Permeance {
        self.permeance
    }

    #[must_use]
    pub fn activation_energy(&self) -> Option<MolarEnergy> {
        self.activation_energy
    }
}

/// A named membrane with its pure-component experiments.
#[derive(Debug, Clone, PartialEq)]
pub struct Membrane {
    name: String,
    experiments: Vec<IdealExperiment>,
}

impl Membrane {
    #[must_use]
    pub fn new(name: impl Into<String>, experiments: Vec<IdealExperiment>) -> Self {
        Self {
            name: name.into(),
            experiments,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn experiments(&self) -> &[IdealExperiment] {
        &self.experiments
    }

    fn experiments_for<'a>(
        &'a self,
        component: &'a Component,
    ) -> impl Iterator<Item = &'a IdealExperiment> + 'a {
        self.experiments
            .iter()
            .filter(move |e| e.component == component.name())
    }

    fn no_data(&self, component: &Component) -> MembraneError {
        MembraneError::NoData {
            membrane: self.name.clone(),
            component: component.name().to_owned(),
        }
    }

    /// Permeance of `component` at `temperature`.
    ///
    /// An experiment at exactly `temperature` is returned as is. Otherwise
    /// the closest experiment is corrected with
    /// `P(T) = P_ref · exp(-Ea/R · (1/T - 1/T_ref))`.
    ///
    /// # Errors
    ///
    /// Fails if the membrane has no data for the component, if an activation
    /// energy is needed but unavailable, or if the result is not positive.
    pub fn get_permeance(
        &self,
        temperature: ThermodynamicTemperature,
        component: &Component,
    ) -> Result<Permeance, MembraneError> {
        let t = temperature.get::<kelvin>();
        let closest = self
            .experiments_for(component)
            .min_by(|a, b| {
                let da = (a.temperature.get::<kelvin>() - t).abs();
                let db = (b.temperature.get::<kelvin>() - t).abs();
                da.total_cmp(&db)
            })
            .ok_or_else(|| self.no_data(component))?;

        let t_ref = closest.temperature.get::<kelvin>();
        if (t_ref - t).abs() < SAME_TEMPERATURE_K {
            return Ok(closest.permeance);
        }

        let ea = self.activation_energy(component)?.get::<joule_per_mole>();
        let scale = (-ea / MOLAR_GAS_CONSTANT * (1.0 / t - 1.0 / t_ref)).exp();
        Permeance::new(closest.permeance.value() * scale, closest.permeance.units()).map_err(
            |source| MembraneError::InvalidPermeance {
                component: component.name().to_owned(),
                temperature: t,
                source,
            },
        )
    }

    /// Activation energy of permeation for `component`.
    ///
    /// With experiments at two or more temperatures, `ln P` is regressed
    /// against `1/T` and `Ea = -R · slope`. Otherwise a stored value is used.
    ///
    /// # Errors
    ///
    /// Fails if the component has no experiments, or only one temperature
    /// and no stored activation energy.
    pub fn activation_energy(&self, component: &Component) -> Result<MolarEnergy, MembraneError> {
        let points: Vec<(f64, f64)> = self
            .experiments_for(component)
            .map(|e| {
                (
                    1.0 / e.temperature.get::<kelvin>(),
                    e.permeance.canonical(component).ln(),
                )
            })
            .collect();
        if points.is_empty() {
            return Err(self.no_data(component));
        }

        if let Some(slope) = arrhenius_slope(&points) {
            return Ok(MolarEnergy::new::<joule_per_mole>(-MOLAR_GAS_CONSTANT * slope));
        }

        self.experiments_for(component)
            .find_map(IdealExperiment::activation_energy)
            .ok_or_else(|| MembraneError::ActivationEnergyUnavailable {
                membrane: self.name.clone(),
                component: component.name().to_owned(),
            })
    }
}

/// Least-squares slope of `y` against `x`, or `None` if all `x` coincide.
fn arrhenius_slope(points: &[(f64, f64)]) -> Option<f64> {
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
        let dx = x - mean_x;
        (sxy + dx * (y - mean_y), sxx + dx * dx)
    });
    // 1/T spreads are ~1e-4 per 10 K, so compare against a scaled floor.
    (sxx > 1e-20 * mean_x * mean_x).then(|| sxy / sxx)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{membrane::PermeanceUnits, thermo::fluid};

    fn at(k: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(k)
    }

    fn arrhenius(p_ref: f64, ea: f64, t_ref: f64, t: f64) -> f64 {
        p_ref * (-ea / MOLAR_GAS_CONSTANT * (1.0 / t - 1.0 / t_ref)).exp()
    }

    fn two_temperature_membrane() -> Membrane {
        let water = fluid::water();
        let ea = 20_000.0;
        Membrane::new(
            "Romakon-PM102",
            vec![
                IdealExperiment::new(&water, at(320.0), Permeance::kg_per_m2_h_kpa(0.01).unwrap()),
                IdealExperiment::new(
                    &water,
                    at(350.0),
                    Permeance::kg_per_m2_h_kpa(arrhenius(0.01, ea, 320.0, 350.0)).unwrap(),
                ),
            ],
        )
    }

    #[test]
    fn regressed_activation_energy() {
        let membrane = two_temperature_membrane();
        let ea = membrane.activation_energy(&fluid::water()).unwrap();
        assert_relative_eq!(ea.get::<joule_per_mole>(), 20_000.0, max_relative = 1e-9);
    }

    #[test]
    fn exact_and_extrapolated_lookup() {
        let membrane = two_temperature_membrane();
        let water = fluid::water();

        let exact = membrane.get_permeance(at(320.0), &water).unwrap();
        assert_eq!(exact.value(), 0.01);

        let extrapolated = membrane.get_permeance(at(360.0), &water).unwrap();
        let expected = arrhenius(0.01, 20_000.0, 320.0, 360.0);
        assert_relative_eq!(extrapolated.value(), expected, max_relative = 1e-9);
    }

    #[test]
    fn stored_activation_energy_for_single_temperature() {
        let ethanol = fluid::ethanol();
        let membrane = Membrane::new(
            "M",
            vec![
                IdealExperiment::new(&ethanol, at(333.15), Permeance::new(200.0, PermeanceUnits::Gpu).unwrap())
                    .with_activation_energy(MolarEnergy::new::<joule_per_mole>(35_000.0)),
            ],
        );

        let ea = membrane.activation_energy(&ethanol).unwrap();
        assert_eq!(ea.get::<joule_per_mole>(), 35_000.0);

        let hotter = membrane.get_permeance(at(343.15), &ethanol).unwrap();
        assert_eq!(hotter.units(), PermeanceUnits::Gpu);
        assert!(hotter.value() > 200.0);
    }

    #[test]
    fn missing_data() {
        let membrane = two_temperature_membrane();
        let ethanol = fluid::ethanol();
        assert!(matches!(
            membrane.get_permeance(at(320.0), &ethanol),
            Err(MembraneError::NoData { .. })
        ));

        let single = Membrane::new(
            "M",
            vec![IdealExperiment::new(&ethanol, at(320.0), Permeance::kg_per_m2_h_kpa(0.002).unwrap())],
        );
        assert!(matches!(
            single.activation_energy(&ethanol),
            Err(MembraneError::ActivationEnergyUnavailable { .. })
        ));
        assert_eq!(single.get_permeance(at(320.0), &ethanol).unwrap().value(), 0.002);
    }
}
