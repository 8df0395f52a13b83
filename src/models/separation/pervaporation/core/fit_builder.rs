//! Builds fitted permeance surfaces from diffusion curves.

use log::info;
use uom::si::thermodynamic_temperature::kelvin;

use crate::support::{
    constraint::ConstraintResult,
    fit::{FitOrders, PermeanceFunction, find_best_fit},
    thermo::capability::PartialPressures,
};

use super::{DiffusionCurveSet, PermeancePair, Pervaporation, ProcessError};

/// Fitting options for both components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOptions {
    pub first: FitOrders,
    pub second: FitOrders,

    /// Pads multi-temperature fits with zero-permeance points where each
    /// component is absent from the feed.
    pub include_zero: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            first: FitOrders::default(),
            second: FitOrders::default(),
            include_zero: true,
        }
    }
}

/// Inputs specific to the non-ideal regimes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NonIdeal {
    pub curves: DiffusionCurveSet,
    pub options: FitOptions,

    /// Permeances for the first step, when the membrane's history makes
    /// them differ from the fitted surfaces.
    pub initial_permeances: Option<PermeancePair>,
}

impl NonIdeal {
    #[must_use]
    pub fn new(curves: DiffusionCurveSet) -> Self {
        Self {
            curves,
            ..Self::default()
        }
    }
}

/// Fitted permeance surfaces of both components.
#[derive(Debug, Clone, PartialEq)]
pub struct PermeanceFits {
    first: PermeanceFunction,
    second: PermeanceFunction,
}

impl PermeanceFits {
    #[must_use]
    pub fn new(first: PermeanceFunction, second: PermeanceFunction) -> Self {
        Self { first, second }
    }

    #[must_use]
    pub fn first(&self) -> &PermeanceFunction {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &PermeanceFunction {
        &self.second
    }

    /// Both permeances at feed mass fraction `x` and temperature `t` in kelvin.
    ///
    /// # Errors
    ///
    /// Returns an error if either value underflows to zero.
    pub fn pair(&self, x: f64, t: f64) -> ConstraintResult<PermeancePair> {
        PermeancePair::new(self.first.value(x, t), self.second.value(x, t))
    }
}

impl<E: PartialPressures> Pervaporation<'_, E> {
    /// Fits permeance surfaces for both components to `curves`.
    ///
    /// When every curve shares one feed temperature, a composition-only
    /// function is fitted and extended to other temperatures with the
    /// membrane's activation energy for that component. Otherwise a full
    /// composition–temperature surface is fitted.
    ///
    /// # Errors
    ///
    /// Fails if measurements cannot be extracted, the activation energy is
    /// unavailable, or no candidate fit succeeds.
    pub fn build_permeance_fits(
        &self,
        curves: &DiffusionCurveSet,
        options: &FitOptions,
    ) -> Result<PermeanceFits, ProcessError> {
        let [first, second] = self
            .extract_measurements(curves)
            .map_err(ProcessError::Measurements)?;

        if let Some(reference) = curves.single_temperature() {
            let isothermal = |orders: FitOrders| FitOrders {
                temperature: Some(0),
                ..orders
            };
            let fit_first = find_best_fit(&first, isothermal(options.first), false)?;
            let fit_second = find_best_fit(&second, isothermal(options.second), false)?;

            let ea_first = self
                .membrane
                .activation_energy(self.mixture.first())
                .map_err(ProcessError::ActivationEnergy)?;
            let ea_second = self
                .membrane
                .activation_energy(self.mixture.second())
                .map_err(ProcessError::ActivationEnergy)?;

            info!(
                "single-temperature permeance fits at {:.2} K extended with activation energies",
                reference.get::<kelvin>()
            );
            return Ok(PermeanceFits::new(
                fit_first.arrhenius(ea_first, reference),
                fit_second.arrhenius(ea_second, reference),
            ));
        }

        let fit_first = find_best_fit(&first, options.first, options.include_zero)?;
        let fit_second = find_best_fit(&second, options.second, options.include_zero)?;
        info!(
            "permeance surfaces fitted: first n={} m={}, second n={} m={}",
            fit_first.composition_order(),
            fit_first.temperature_order(),
            fit_second.composition_order(),
            fit_second.temperature_order(),
        );
        Ok(PermeanceFits::new(fit_first, fit_second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::separation::pervaporation::core::{
            DiffusionCurve, FluxSolverConfig, PartialFluxes, PermeateCondition,
            test_support::{ETHANOL_EA, WATER_EA, kelvin_at, membrane, mixture, weight},
        },
        support::{thermo::Composition, units::MOLAR_GAS_CONSTANT},
    };

    fn compositions() -> Vec<Composition> {
        [0.05, 0.1, 0.15, 0.2, 0.3, 0.4, 0.5].into_iter().map(weight).collect()
    }

    #[test]
    fn single_curve_folds_in_activation_energy() {
        let (membrane, mixture) = (membrane(), mixture());
        let pv = Pervaporation::new(&membrane, &mixture);
        let curve = pv
            .ideal_diffusion_curve(
                kelvin_at(350.0),
                &compositions(),
                PermeateCondition::Vacuum,
                &FluxSolverConfig::default(),
            )
            .unwrap();

        let fits = pv
            .build_permeance_fits(&DiffusionCurveSet::new(vec![curve]), &FitOptions::default())
            .unwrap();

        assert_eq!(fits.first().b().len(), 1);
        assert_relative_eq!(fits.first().b()[0], WATER_EA / MOLAR_GAS_CONSTANT, max_relative = 1e-6);
        assert_relative_eq!(fits.second().b()[0], ETHANOL_EA / MOLAR_GAS_CONSTANT, max_relative = 1e-6);

        let at_reference = fits.pair(0.2, 350.0).unwrap();
        assert_relative_eq!(at_reference.first(), 0.01, max_relative = 1e-6);
        assert_relative_eq!(at_reference.second(), 0.002, max_relative = 1e-6);

        let colder = fits.pair(0.2, 320.0).unwrap();
        assert_relative_eq!(colder.first(), membrane.experiments()[1].permeance().value(), max_relative = 1e-5);
    }

    #[test]
    fn multi_temperature_curves_fit_a_surface() {
        let (membrane, mixture) = (membrane(), mixture());
        let pv = Pervaporation::new(&membrane, &mixture);
        let config = FluxSolverConfig::default();
        let curves: Vec<DiffusionCurve> = [320.0, 335.0, 350.0]
            .into_iter()
            .map(|t| {
                pv.ideal_diffusion_curve(kelvin_at(t), &compositions(), PermeateCondition::Vacuum, &config)
                    .unwrap()
            })
            .collect();

        let options = FitOptions {
            first: FitOrders::fixed(1, 0),
            second: FitOrders::fixed(1, 0),
            include_zero: false,
        };
        let fits = pv
            .build_permeance_fits(&DiffusionCurveSet::new(curves), &options)
            .unwrap();

        // Ideal curves have composition-independent Arrhenius permeances.
        assert_relative_eq!(fits.first().b()[0], WATER_EA / MOLAR_GAS_CONSTANT, max_relative = 1e-6);
        assert_relative_eq!(fits.first().a()[1], 0.0, epsilon = 1e-6);
        let mid = fits.pair(0.25, 340.0).unwrap();
        let expected = pv.membrane_permeances(kelvin_at(340.0)).unwrap();
        assert_relative_eq!(mid.second(), expected.second(), max_relative = 1e-6);
    }

    #[test]
    fn curve_without_usable_points_fails() {
        let (membrane, mixture) = (membrane(), mixture());
        let pv = Pervaporation::new(&membrane, &mixture);
        let curve = DiffusionCurve::new(
            "Test membrane",
            kelvin_at(350.0),
            PermeateCondition::Vacuum,
            vec![(weight(0.1), PartialFluxes::new(0.0, 0.0))],
        );
        let result = pv.build_permeance_fits(&DiffusionCurveSet::new(vec![curve]), &FitOptions::default());
        assert!(matches!(result, Err(ProcessError::Fit(_))));
    }
}
