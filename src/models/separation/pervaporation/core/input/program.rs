use thiserror::Error;
use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::kelvin,
    time::hour,
};

/// Errors building a [`TemperatureProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TemperatureProgramError {
    #[error("temperature program has no points")]
    Empty,
    #[error("temperature program times must be strictly increasing")]
    Unsorted,
}

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    /// `T[K] = Σ c_i t[h]^i`
    Polynomial(Vec<f64>),
    /// `(t[h], T[K])` points, strictly increasing in time.
    PiecewiseLinear(Vec<(f64, f64)>),
}

/// An imposed feed temperature as a function of process time.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureProgram {
    shape: Shape,
}

impl TemperatureProgram {
    /// `T(t) = c0 + c1·t + c2·t² + …` with `t` in hours and `T` in kelvin.
    ///
    /// # Errors
    ///
    /// Returns [`TemperatureProgramError::Empty`] if no coefficients are given.
    pub fn polynomial(coefficients: Vec<f64>) -> Result<Self, TemperatureProgramError> {
        if coefficients.is_empty() {
            return Err(TemperatureProgramError::Empty);
        }
        Ok(Self {
            shape: Shape::Polynomial(coefficients),
        })
    }

    /// Linear interpolation between points, held constant outside them.
    ///
    /// # Errors
    ///
    /// Fails if `points` is empty or its times are not strictly increasing.
    pub fn piecewise_linear(
        points: &[(Time, ThermodynamicTemperature)],
    ) -> Result<Self, TemperatureProgramError> {
        if points.is_empty() {
            return Err(TemperatureProgramError::Empty);
        }
        let points: Vec<(f64, f64)> = points
            .iter()
            .map(|(t, temp)| (t.get::<hour>(), temp.get::<kelvin>()))
            .collect();
        if points.windows(2).any(|w| !(w[1].0 > w[0].0)) {
            return Err(TemperatureProgramError::Unsorted);
        }
        Ok(Self {
            shape: Shape::PiecewiseLinear(points),
        })
    }

    /// Feed temperature at `time`.
    #[must_use]
    pub fn temperature(&self, time: Time) -> ThermodynamicTemperature {
        let t = time.get::<hour>();
        let k = match &self.shape {
            Shape::Polynomial(c) => c.iter().rev().fold(0.0, |acc, c| acc * t + c),
            Shape::PiecewiseLinear(points) => interpolate(points, t),
        };
        ThermodynamicTemperature::new::<kelvin>(k)
    }
}

fn interpolate(points: &[(f64, f64)], t: f64) -> f64 {
    let Some(&(t_first, first)) = points.first() else {
        return f64::NAN;
    };
    if t <= t_first {
        return first;
    }
    for w in points.windows(2) {
        let ((t0, y0), (t1, y1)) = (w[0], w[1]);
        if t <= t1 {
            return y0 + (y1 - y0) * (t - t0) / (t1 - t0);
        }
    }
    points.last().map_or(first, |&(_, last)| last)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn hours(h: f64) -> Time {
        Time::new::<hour>(h)
    }

    fn kelvin_at(k: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(k)
    }

    #[test]
    fn linear_cooling_ramp() {
        let program = TemperatureProgram::polynomial(vec![350.0, -2.0]).unwrap();
        assert_relative_eq!(program.temperature(hours(0.0)).get::<kelvin>(), 350.0);
        assert_relative_eq!(program.temperature(hours(2.5)).get::<kelvin>(), 345.0);
    }

    #[test]
    fn piecewise_linear_holds_at_ends() {
        let program = TemperatureProgram::piecewise_linear(&[
            (hours(0.0), kelvin_at(350.0)),
            (hours(2.0), kelvin_at(340.0)),
            (hours(4.0), kelvin_at(340.0)),
        ])
        .unwrap();

        assert_relative_eq!(program.temperature(hours(1.0)).get::<kelvin>(), 345.0);
        assert_relative_eq!(program.temperature(hours(3.0)).get::<kelvin>(), 340.0);
        assert_relative_eq!(program.temperature(hours(10.0)).get::<kelvin>(), 340.0);
    }

    #[test]
    fn invalid_programs() {
        assert_eq!(
            TemperatureProgram::polynomial(vec![]),
            Err(TemperatureProgramError::Empty)
        );
        assert_eq!(
            TemperatureProgram::piecewise_linear(&[
                (hours(1.0), kelvin_at(350.0)),
                (hours(1.0), kelvin_at(340.0)),
            ]),
            Err(TemperatureProgramError::Unsorted)
        );
    }
}
