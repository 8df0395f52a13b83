use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// [`uom`] does not subtract two [`ThermodynamicTemperature`] values into a
/// [`TemperatureInterval`], see
/// [#380](https://github.com/iliekturtles/uom/issues/380).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn feed_to_permeate_cooling() {
        let feed = ThermodynamicTemperature::new::<abs_kelvin>(350.0);
        let permeate = ThermodynamicTemperature::new::<degree_celsius>(-10.0);

        assert_relative_eq!(
            feed.minus(permeate).get::<delta_kelvin>(),
            86.85,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            permeate.minus(feed).get::<delta_kelvin>(),
            -86.85,
            epsilon = 1e-9
        );
    }
}
