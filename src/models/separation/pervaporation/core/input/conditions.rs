use uom::si::{
    f64::{Area, Mass, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, ConstraintResult, StrictlyPositive},
    thermo::Composition,
};

use super::{PermeateCondition, TemperatureProgram};

/// Initial state and operating conditions of a batch process.
///
/// The feed temperature, mass and membrane area are strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    membrane_area: Area,
    feed_temperature: ThermodynamicTemperature,
    feed_composition: Composition,
    feed_mass: Mass,
    permeate: PermeateCondition,
    temperature_program: Option<TemperatureProgram>,
}

impl Conditions {
    /// Constructs validated conditions with a vacuum permeate and no program.
    ///
    /// # Errors
    ///
    /// Returns an error if the area, mass or temperature is not strictly positive.
    pub fn new(
        membrane_area: Area,
        feed_temperature: ThermodynamicTemperature,
        feed_composition: Composition,
        feed_mass: Mass,
    ) -> ConstraintResult<Self> {
        let membrane_area = StrictlyPositive::new(membrane_area)?;
        let feed_mass = StrictlyPositive::new(feed_mass)?;
        StrictlyPositive::new(feed_temperature.get::<kelvin>())?;
        Ok(Self::from_constrained(
            membrane_area,
            feed_temperature,
            feed_composition,
            feed_mass,
        ))
    }

    /// Constructs conditions from pre-validated area and mass.
    ///
    /// The caller must ensure `feed_temperature` is above absolute zero.
    #[must_use]
    pub fn from_constrained(
        membrane_area: Constrained<Area, StrictlyPositive>,
        feed_temperature: ThermodynamicTemperature,
        feed_composition: Composition,
        feed_mass: Constrained<Mass, StrictlyPositive>,
    ) -> Self {
        Self {
            membrane_area: membrane_area.into_inner(),
            feed_temperature,
            feed_composition,
            feed_mass: feed_mass.into_inner(),
            permeate: PermeateCondition::Vacuum,
            temperature_program: None,
        }
    }

    #[must_use]
    pub fn with_permeate(mut self, permeate: PermeateCondition) -> Self {
        self.permeate = permeate;
        self
    }

    /// Imposes a feed temperature program on non-isothermal runs.
    #[must_use]
    pub fn with_temperature_program(mut self, program: TemperatureProgram) -> Self {
        self.temperature_program = Some(program);
        self
    }

    #[must_use]
    pub fn membrane_area(&self) -> Area {
        self.membrane_area
    }

    #[must_use]
    pub fn feed_temperature(&self) -> ThermodynamicTemperature {
        self.feed_temperature
    }

    #[must_use]
    pub fn feed_composition(&self) -> Composition {
        self.feed_composition
    }

    #[must_use]
    pub fn feed_mass(&self) -> Mass {
        self.feed_mass
    }

    #[must_use]
    pub fn permeate(&self) -> PermeateCondition {
        self.permeate
    }

    #[must_use]
    pub fn temperature_program(&self) -> Option<&TemperatureProgram> {
        self.temperature_program.as_ref()
    }
}
