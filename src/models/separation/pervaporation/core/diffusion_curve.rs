//! Diffusion curves: flux sweeps over feed composition at one temperature.

use jiff::Timestamp;
use log::debug;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::{
    fit::{ComponentIndex, Measurement, Measurements},
    thermo::{Composition, PropertyError, capability::PartialPressures},
};

use super::{
    FluxError, FluxSolverConfig, PartialFluxes, PermeanceFits, PermeancePair, PermeateCondition,
    Pervaporation,
};

/// Partial fluxes measured or modeled over feed compositions at one feed
/// temperature and permeate condition.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionCurve {
    membrane: String,
    feed_temperature: ThermodynamicTemperature,
    permeate: PermeateCondition,
    points: Vec<(Composition, PartialFluxes)>,
    comment: String,
    created: Timestamp,
}

impl DiffusionCurve {
    /// Creates a curve from `(feed composition, partial fluxes)` points.
    #[must_use]
    pub fn new(
        membrane: impl Into<String>,
        feed_temperature: ThermodynamicTemperature,
        permeate: PermeateCondition,
        points: Vec<(Composition, PartialFluxes)>,
    ) -> Self {
        let membrane = membrane.into();
        Self {
            comment: membrane.clone(),
            membrane,
            feed_temperature,
            permeate,
            points,
            created: Timestamp::now(),
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub fn membrane(&self) -> &str {
        &self.membrane
    }

    #[must_use]
    pub fn feed_temperature(&self) -> ThermodynamicTemperature {
        self.feed_temperature
    }

    #[must_use]
    pub fn permeate(&self) -> PermeateCondition {
        self.permeate
    }

    #[must_use]
    pub fn points(&self) -> &[(Composition, PartialFluxes)] {
        &self.points
    }

    pub fn feed_compositions(&self) -> impl Iterator<Item = Composition> + '_ {
        self.points.iter().map(|(x, _)| *x)
    }

    pub fn partial_fluxes(&self) -> impl Iterator<Item = PartialFluxes> + '_ {
        self.points.iter().map(|(_, j)| *j)
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn created(&self) -> Timestamp {
        self.created
    }
}

/// Diffusion curves used together to fit permeance surfaces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiffusionCurveSet {
    curves: Vec<DiffusionCurve>,
}

impl DiffusionCurveSet {
    #[must_use]
    pub fn new(curves: Vec<DiffusionCurve>) -> Self {
        Self { curves }
    }

    #[must_use]
    pub fn curves(&self) -> &[DiffusionCurve] {
        &self.curves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// The shared feed temperature if every curve has the same one.
    #[must_use]
    pub fn single_temperature(&self) -> Option<ThermodynamicTemperature> {
        let first = self.curves.first()?.feed_temperature;
        self.curves
            .iter()
            .all(|c| (c.feed_temperature.get::<kelvin>() - first.get::<kelvin>()).abs() < 1e-9)
            .then_some(first)
    }
}

impl<E: PartialPressures> Pervaporation<'_, E> {
    /// Sweeps the flux solver over `compositions` with membrane permeances.
    ///
    /// # Errors
    ///
    /// Fails on the first composition the flux solver cannot handle.
    pub fn ideal_diffusion_curve(
        &self,
        feed_temperature: ThermodynamicTemperature,
        compositions: &[Composition],
        permeate: PermeateCondition,
        config: &FluxSolverConfig,
    ) -> Result<DiffusionCurve, FluxError> {
        let permeances = self.membrane_permeances(feed_temperature)?;
        self.sweep(feed_temperature, compositions, permeate, config, "Ideal", |_| {
            Ok(permeances)
        })
    }

    /// Sweeps the flux solver over `compositions` with permeances from
    /// fitted surfaces.
    ///
    /// # Errors
    ///
    /// Fails if a fitted permeance underflows to zero or the flux solver
    /// fails at any composition.
    pub fn non_ideal_diffusion_curve(
        &self,
        fits: &PermeanceFits,
        feed_temperature: ThermodynamicTemperature,
        compositions: &[Composition],
        permeate: PermeateCondition,
        config: &FluxSolverConfig,
    ) -> Result<DiffusionCurve, FluxError> {
        let t = feed_temperature.get::<kelvin>();
        self.sweep(feed_temperature, compositions, permeate, config, "Non-Ideal", |x| {
            fits.pair(x.first(), t).map_err(|err| FluxError::Undefined {
                context: format!("fitted permeance at x={}, T={t} K: {err}", x.first()),
            })
        })
    }

    fn sweep(
        &self,
        feed_temperature: ThermodynamicTemperature,
        compositions: &[Composition],
        permeate: PermeateCondition,
        config: &FluxSolverConfig,
        kind: &str,
        permeances: impl Fn(Composition) -> Result<PermeancePair, FluxError>,
    ) -> Result<DiffusionCurve, FluxError> {
        let points = compositions
            .iter()
            .map(|&composition| {
                let x = composition.to_weight(self.mixture);
                let fluxes = self.calculate_partial_fluxes(
                    feed_temperature,
                    x,
                    Some(permeances(x)?),
                    permeate,
                    config,
                )?;
                Ok((x, fluxes))
            })
            .collect::<Result<Vec<_>, FluxError>>()?;

        Ok(DiffusionCurve::new(self.membrane.name(), feed_temperature, permeate, points)
            .with_comment(format!("{} {kind} Diffusion Curve", self.label())))
    }

    /// Permeances implied by every curve point, for each component.
    ///
    /// `P_i = J_i / (p_i^feed − p_i^permeate)`. Points where a component's
    /// permeance is undefined or negative, such as where it is absent from
    /// the feed, are skipped for that component.
    ///
    /// # Errors
    ///
    /// Fails if equilibrium pressures cannot be evaluated at a curve point.
    pub fn extract_measurements(
        &self,
        curves: &DiffusionCurveSet,
    ) -> Result<[Measurements; 2], PropertyError> {
        let mut first = Measurements::new(ComponentIndex::First, Vec::new());
        let mut second = Measurements::new(ComponentIndex::Second, Vec::new());

        for curve in curves.curves() {
            let t = curve.feed_temperature;
            for &(composition, fluxes) in curve.points() {
                let x = composition.to_weight(self.mixture);
                let Ok(y) = fluxes.permeate_composition() else {
                    debug!("skipping curve point x={} without net flux", x.first());
                    continue;
                };

                let feed = self.partial_pressures(t, x)?;
                let permeate = self.permeate_pressures(curve.permeate, y)?;
                let flux = [fluxes.first, fluxes.second];

                for (i, data) in [&mut first, &mut second].into_iter().enumerate() {
                    let permeance = flux[i] / (feed[i] - permeate[i]);
                    if permeance.is_finite() && permeance >= 0.0 {
                        data.push(Measurement {
                            composition: x.first(),
                            temperature: t.get::<kelvin>(),
                            permeance,
                        });
                    }
                }
            }
        }

        Ok([first, second])
    }
}
