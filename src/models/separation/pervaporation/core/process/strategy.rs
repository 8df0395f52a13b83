use uom::si::f64::Time;

use crate::support::fit::ComponentIndex;

use super::{
    super::{PermeanceFits, PermeancePair, TemperatureProgram},
    Violation,
};

/// How each step obtains its permeances.
#[derive(Debug, Clone, Copy)]
pub(super) enum PermeanceStrategy<'f> {
    /// Queried once before the run.
    Constant(PermeancePair),

    /// Queried from the membrane at the current feed temperature.
    Lookup,

    /// Starts at `initial` and is carried forward by first-order
    /// extrapolation on fitted surfaces.
    Fitted {
        fits: &'f PermeanceFits,
        initial: PermeancePair,
        temperature_dependent: bool,
    },
}

/// How the feed temperature evolves between steps.
#[derive(Debug, Clone, Copy)]
pub(super) enum TemperatureStrategy<'c> {
    Fixed,
    SelfCooling,
    Programmed(&'c TemperatureProgram),
}

impl<'c> TemperatureStrategy<'c> {
    pub(super) fn non_isothermal(program: Option<&'c TemperatureProgram>) -> Self {
        program.map_or(Self::SelfCooling, Self::Programmed)
    }
}

/// Feed state at a step boundary, in canonical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct FeedState {
    pub time: Time,
    pub temperature: f64,
    pub composition: f64,
    pub mass: f64,
}

impl FeedState {
    /// Checks the state invariants after a step.
    pub(super) fn validate(self) -> Result<Self, Violation> {
        if !(self.mass > 0.0) {
            return Err(Violation::FeedDepleted { mass: self.mass });
        }
        if !(0.0..=1.0).contains(&self.composition) {
            return Err(Violation::CompositionOutOfRange {
                fraction: self.composition,
            });
        }
        if !(self.temperature > 0.0 && self.temperature.is_finite()) {
            return Err(Violation::TemperatureOutOfRange {
                temperature: self.temperature,
            });
        }
        Ok(self)
    }
}

/// Builds a permeance pair, naming the first non-positive component.
pub(super) fn checked_pair(first: f64, second: f64) -> Result<PermeancePair, Violation> {
    for (component, value) in [(ComponentIndex::First, first), (ComponentIndex::Second, second)] {
        if !(value > 0.0 && value.is_finite()) {
            return Err(Violation::PermeanceNotPositive { component, value });
        }
    }
    PermeancePair::new(first, second).map_err(|_| Violation::PermeanceNotPositive {
        component: ComponentIndex::First,
        value: first,
    })
}

impl PermeanceStrategy<'_> {
    /// Permeances for the first step, unless looked up per step.
    pub(super) fn initial(&self) -> Option<PermeancePair> {
        match *self {
            Self::Constant(pair) | Self::Fitted { initial: pair, .. } => Some(pair),
            Self::Lookup => None,
        }
    }

    /// Extrapolates fitted permeances from `from` to `to`.
    ///
    /// Isothermal surfaces carry `current` forward along composition only;
    /// temperature-dependent surfaces re-evaluate at `from` and add both
    /// first-order increments.
    pub(super) fn advance(
        &self,
        current: PermeancePair,
        from: &FeedState,
        to: &FeedState,
    ) -> Option<Result<PermeancePair, Violation>> {
        let Self::Fitted {
            fits,
            temperature_dependent,
            ..
        } = *self
        else {
            return None;
        };

        let (x, t) = (from.composition, from.temperature);
        let dx = to.composition - x;
        let dt = to.temperature - t;

        let [first, second] = [
            (fits.first(), current.first()),
            (fits.second(), current.second()),
        ]
        .map(|(f, p)| {
            if temperature_dependent {
                f.value(x, t) + f.derivative_composition(x, t) * dx + f.derivative_temperature(x, t) * dt
            } else {
                p + f.derivative_composition(x, t) * dx
            }
        });
        Some(checked_pair(first, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::hour;

    use crate::support::fit::PermeanceFunction;

    fn state(composition: f64, temperature: f64) -> FeedState {
        FeedState {
            time: Time::new::<hour>(0.0),
            temperature,
            composition,
            mass: 1.0,
        }
    }

    fn fits() -> PermeanceFits {
        PermeanceFits::new(
            PermeanceFunction::new(vec![-4.0, 2.0], vec![2000.0]).unwrap(),
            PermeanceFunction::new(vec![-5.0, -1.0], vec![3000.0]).unwrap(),
        )
    }

    #[test]
    fn state_violations() {
        assert!(state(0.5, 350.0).validate().is_ok());
        assert!(state(0.0, 350.0).validate().is_ok());
        assert_eq!(
            FeedState { mass: 0.0, ..state(0.5, 350.0) }.validate(),
            Err(Violation::FeedDepleted { mass: 0.0 })
        );
        assert_eq!(
            state(-0.01, 350.0).validate(),
            Err(Violation::CompositionOutOfRange { fraction: -0.01 })
        );
        assert_eq!(
            state(0.5, -1.0).validate(),
            Err(Violation::TemperatureOutOfRange { temperature: -1.0 })
        );
    }

    #[test]
    fn checked_pair_names_the_component() {
        assert!(checked_pair(0.01, 0.002).is_ok());
        assert_eq!(
            checked_pair(0.01, -1e-6),
            Err(Violation::PermeanceNotPositive {
                component: ComponentIndex::Second,
                value: -1e-6
            })
        );
    }

    #[test]
    fn isothermal_advance_follows_composition_slope() {
        let fits = fits();
        let current = PermeancePair::new(0.01, 0.002).unwrap();
        let strategy = PermeanceStrategy::Fitted {
            fits: &fits,
            initial: current,
            temperature_dependent: false,
        };
        let (from, to) = (state(0.2, 350.0), state(0.19, 350.0));

        let next = strategy.advance(current, &from, &to).unwrap().unwrap();
        let slope = fits.first().derivative_composition(0.2, 350.0);
        assert_relative_eq!(next.first(), 0.01 - 0.01 * slope, max_relative = 1e-12);
    }

    #[test]
    fn non_isothermal_advance_tracks_the_surface() {
        let fits = fits();
        let current = PermeancePair::new(1.0, 1.0).unwrap();
        let strategy = PermeanceStrategy::Fitted {
            fits: &fits,
            initial: current,
            temperature_dependent: true,
        };
        let (from, to) = (state(0.2, 350.0), state(0.1999, 349.99));

        let next = strategy.advance(current, &from, &to).unwrap().unwrap();
        assert_relative_eq!(
            next.first(),
            fits.first().value(0.1999, 349.99),
            max_relative = 1e-6
        );
        assert_relative_eq!(
            next.second(),
            fits.second().value(0.1999, 349.99),
            max_relative = 1e-6
        );
    }

    #[test]
    fn only_fitted_permeances_advance() {
        let current = PermeancePair::new(0.01, 0.002).unwrap();
        let (from, to) = (state(0.2, 350.0), state(0.1, 340.0));
        assert!(PermeanceStrategy::Lookup.advance(current, &from, &to).is_none());
        assert!(PermeanceStrategy::Lookup.initial().is_none());
        assert!(
            PermeanceStrategy::Constant(current)
                .advance(current, &from, &to)
                .is_none()
        );
    }
}
