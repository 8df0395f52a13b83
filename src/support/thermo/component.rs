use uom::si::{
    f64::{MolarEnergy, MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    molar_mass::kilogram_per_mole,
    pressure::kilopascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{ConstraintResult, StrictlyPositive},
    units::SpecificEnthalpy,
};

use super::PropertyError;

/// Antoine vapor-pressure correlation.
///
/// `log10(p / kPa) = a - b / (T / K + c)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antoine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Antoine {
    /// Saturation pressure at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if `T + c` is not positive.
    pub fn vapor_pressure(&self, temperature: ThermodynamicTemperature) -> Result<Pressure, PropertyError> {
        let t = temperature.get::<kelvin>();
        let shifted = t + self.c;
        if !(t > 0.0 && shifted > 0.0) {
            return Err(PropertyError::out_of_domain(format!(
                "Antoine correlation needs T + C > 0 (T = {t} K, C = {})",
                self.c
            )));
        }
        let p = 10f64.powf(self.a - self.b / shifted);
        Ok(Pressure::new::<kilopascal>(PropertyError::finite(p, "vapor pressure")?))
    }
}

/// Temperature dependence of the molar heat of vaporization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VaporizationHeat {
    /// A temperature-independent latent heat.
    Constant(MolarEnergy),

    /// Watson correlation anchored at a reference point:
    /// `ΔH(T) = ΔH_ref * ((Tc - T) / (Tc - T_ref))^exponent`.
    Watson {
        reference: MolarEnergy,
        reference_temperature: ThermodynamicTemperature,
        critical_temperature: ThermodynamicTemperature,
        exponent: f64,
    },
}

impl VaporizationHeat {
    /// Watson correlation with the usual exponent of 0.38.
    #[must_use]
    pub fn watson(
        reference: MolarEnergy,
        reference_temperature: ThermodynamicTemperature,
        critical_temperature: ThermodynamicTemperature,
    ) -> Self {
        Self::Watson {
            reference,
            reference_temperature,
            critical_temperature,
            exponent: 0.38,
        }
    }

    fn at(&self, temperature: ThermodynamicTemperature) -> Result<MolarEnergy, PropertyError> {
        match *self {
            Self::Constant(h) => Ok(h),
            Self::Watson {
                reference,
                reference_temperature,
                critical_temperature,
                exponent,
            } => {
                let tc = critical_temperature.get::<kelvin>();
                let t = temperature.get::<kelvin>();
                let t_ref = reference_temperature.get::<kelvin>();
                if t >= tc || t_ref >= tc {
                    return Err(PropertyError::Undefined {
                        context: format!("heat of vaporization at {t} K (critical {tc} K)"),
                    });
                }
                let scale = ((tc - t) / (tc - t_ref)).powf(exponent);
                Ok(reference * scale)
            }
        }
    }
}

/// Liquid molar heat capacity as a polynomial in `T / K`, in J/(mol·K).
///
/// `cp(T) = c0 + c1*T + c2*T^2 + ...`
#[derive(Debug, Clone, PartialEq)]
pub struct HeatCapacity {
    coefficients: Vec<f64>,
}

impl HeatCapacity {
    #[must_use]
    pub fn constant(molar: f64) -> Self {
        Self {
            coefficients: vec![molar],
        }
    }

    #[must_use]
    pub fn polynomial(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Molar heat capacity at `t` kelvin.
    fn molar(&self, t: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    /// Antiderivative of [`Self::molar`] evaluated at `t` kelvin.
    fn integral(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .rev()
            .fold(0.0, |acc, (i, c)| acc * t + c / (i as f64 + 1.0))
            * t
    }
}

/// A pure volatile liquid in a pervaporation feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    molar_mass: MolarMass,
    antoine: Antoine,
    vaporization: VaporizationHeat,
    heat_capacity: HeatCapacity,
}

impl Component {
    /// Creates a component.
    ///
    /// # Errors
    ///
    /// Returns an error if `molar_mass` is not strictly positive.
    pub fn new(
        name: impl Into<String>,
        molar_mass: MolarMass,
        antoine: Antoine,
        vaporization: VaporizationHeat,
        heat_capacity: HeatCapacity,
    ) -> ConstraintResult<Self> {
        let molar_mass = StrictlyPositive::new(molar_mass)?.into_inner();
        Ok(Self {
            name: name.into(),
            molar_mass,
            antoine,
            vaporization,
            heat_capacity,
        })
    }

    /// Creates a component without validating the molar mass.
    ///
    /// The caller must guarantee the molar mass is strictly positive.
    #[must_use]
    pub(crate) fn new_unchecked(
        name: impl Into<String>,
        molar_mass: MolarMass,
        antoine: Antoine,
        vaporization: VaporizationHeat,
        heat_capacity: HeatCapacity,
    ) -> Self {
        Self {
            name: name.into(),
            molar_mass,
            antoine,
            vaporization,
            heat_capacity,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        self.molar_mass
    }

    #[must_use]
    pub fn antoine(&self) -> Antoine {
        self.antoine
    }

    /// Pure-component saturation pressure.
    ///
    /// # Errors
    ///
    /// Fails if the temperature is outside the Antoine correlation's domain.
    pub fn vapor_pressure(&self, temperature: ThermodynamicTemperature) -> Result<Pressure, PropertyError> {
        self.antoine.vapor_pressure(temperature)
    }

    /// Molar heat of vaporization.
    ///
    /// # Errors
    ///
    /// Fails at or above the critical temperature of a Watson correlation.
    pub fn heat_of_vaporization(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<MolarEnergy, PropertyError> {
        self.vaporization.at(temperature)
    }

    /// Heat of vaporization per unit mass.
    ///
    /// # Errors
    ///
    /// Fails at or above the critical temperature of a Watson correlation.
    pub fn specific_heat_of_vaporization(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificEnthalpy, PropertyError> {
        let h: SpecificEnthalpy = self.heat_of_vaporization(temperature)? / self.molar_mass;
        Ok(h)
    }

    /// Liquid specific heat capacity per unit mass.
    ///
    /// # Errors
    ///
    /// Fails if the polynomial yields a non-finite value.
    pub fn specific_heat(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificHeatCapacity, PropertyError> {
        let molar = self.heat_capacity.molar(temperature.get::<kelvin>());
        self.per_kilogram(molar)
    }

    /// Liquid specific heat averaged between two temperatures.
    ///
    /// Equal temperatures return the point value.
    ///
    /// # Errors
    ///
    /// Fails if the polynomial yields a non-finite value.
    pub fn mean_specific_heat(
        &self,
        from: ThermodynamicTemperature,
        to: ThermodynamicTemperature,
    ) -> Result<SpecificHeatCapacity, PropertyError> {
        let (t1, t2) = (from.get::<kelvin>(), to.get::<kelvin>());
        if (t2 - t1).abs() < 1e-9 {
            return self.specific_heat(from);
        }
        let molar =
            (self.heat_capacity.integral(t2) - self.heat_capacity.integral(t1)) / (t2 - t1);
        self.per_kilogram(molar)
    }

    fn per_kilogram(&self, molar: f64) -> Result<SpecificHeatCapacity, PropertyError> {
        let cp = PropertyError::finite(molar, "heat capacity")?
            / self.molar_mass.get::<kilogram_per_mole>();
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram, molar_energy::joule_per_mole,
        molar_mass::gram_per_mole,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::support::{constraint::ConstraintError, thermo::fluid};

    fn temperature(k: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(k)
    }

    #[test]
    fn water_boils_near_one_atmosphere() {
        let water = fluid::water();
        let p = water.vapor_pressure(temperature(373.15)).unwrap();
        assert_relative_eq!(p.get::<kilopascal>(), 101.3, epsilon = 1.0);
    }

    #[test]
    fn antoine_rejects_temperatures_below_its_pole() {
        let antoine = Antoine { a: 7.0, b: 1700.0, c: -40.0 };
        assert!(matches!(
            antoine.vapor_pressure(temperature(30.0)),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn watson_latent_heat() {
        let water = fluid::water();
        let at_boiling = water.heat_of_vaporization(temperature(373.15)).unwrap();
        assert_relative_eq!(at_boiling.get::<joule_per_mole>(), 40_660.0, epsilon = 1e-6);

        let colder = water
            .heat_of_vaporization(ThermodynamicTemperature::new::<degree_celsius>(50.0))
            .unwrap();
        assert!(colder > at_boiling);

        assert!(matches!(
            water.heat_of_vaporization(temperature(700.0)),
            Err(PropertyError::Undefined { .. })
        ));
    }

    #[test]
    fn specific_latent_heat_divides_by_molar_mass() {
        let water = fluid::water();
        let h = water.specific_heat_of_vaporization(temperature(373.15)).unwrap();
        assert_relative_eq!(h.get::<joule_per_kilogram>(), 40_660.0 / 0.018_015, max_relative = 1e-12);
    }

    #[test]
    fn mean_specific_heat_of_linear_polynomial() {
        let component = Component::new(
            "test",
            MolarMass::new::<gram_per_mole>(20.0),
            Antoine { a: 7.0, b: 1700.0, c: -40.0 },
            VaporizationHeat::Constant(MolarEnergy::new::<joule_per_mole>(40_000.0)),
            HeatCapacity::polynomial(vec![20.0, 0.1]),
        )
        .unwrap();

        // cp(T) = 20 + 0.1 T J/(mol K), mean over [300, 400] is 55 J/(mol K).
        let mean = component.mean_specific_heat(temperature(300.0), temperature(400.0)).unwrap();
        assert_relative_eq!(mean.get::<joule_per_kilogram_kelvin>(), 55.0 / 0.02, max_relative = 1e-9);

        let point = component.mean_specific_heat(temperature(350.0), temperature(350.0)).unwrap();
        assert_relative_eq!(point.get::<joule_per_kilogram_kelvin>(), 55.0 / 0.02, max_relative = 1e-9);
    }

    #[test]
    fn molar_mass_must_be_positive() {
        let result = Component::new(
            "bad",
            MolarMass::new::<gram_per_mole>(0.0),
            Antoine { a: 7.0, b: 1700.0, c: -40.0 },
            VaporizationHeat::Constant(MolarEnergy::new::<joule_per_mole>(1.0)),
            HeatCapacity::constant(75.0),
        );
        assert_eq!(result, Err(ConstraintError::Zero));
    }
}
