use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use super::{FitError, Measurement, Measurements, PermeanceFunction};

const MAX_LM_ITERS: usize = 200;
const MAX_DAMPING_TRIALS: usize = 12;

/// Candidate composition orders searched when none is given.
const COMPOSITION_ORDERS: [usize; 3] = [1, 2, 3];
/// Candidate temperature orders searched when none is given.
const TEMPERATURE_ORDERS: [usize; 3] = [0, 1, 2];

/// Polynomial orders of a [`PermeanceFunction`]; `None` searches candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitOrders {
    pub composition: Option<usize>,
    pub temperature: Option<usize>,
}

impl FitOrders {
    #[must_use]
    pub fn fixed(composition: usize, temperature: usize) -> Self {
        Self {
            composition: Some(composition),
            temperature: Some(temperature),
        }
    }
}

/// Fits a [`PermeanceFunction`] of the given orders.
///
/// Isothermal data can only be fitted with `temperature_order == 0`, which
/// yields a composition-only function with `b = [0]`.
///
/// The coefficients are first estimated by linear least squares on `ln P`
/// over the positive measurements and then refined by Levenberg–Marquardt
/// on `P` itself, which also admits the zero-permeance anchors added when
/// `include_zero` is set.
///
/// # Errors
///
/// Returns a [`FitError`] if the data cannot determine the coefficients.
pub fn fit(
    data: &Measurements,
    composition_order: usize,
    temperature_order: usize,
    include_zero: bool,
) -> Result<PermeanceFunction, FitError> {
    let temperatures = data.temperatures();
    let temperature_order = if temperatures.len() <= 1 {
        if temperature_order > 0 {
            return Err(FitError::SingleTemperature {
                order: temperature_order,
            });
        }
        None
    } else {
        Some(temperature_order)
    };

    let points = if include_zero {
        data.with_zero_anchors()
    } else {
        data.points().to_vec()
    };
    let positive: Vec<usize> = (0..points.len())
        .filter(|&i| points[i].permeance > 0.0)
        .collect();

    let basis = Basis::new(composition_order, temperature_order, data.points());
    if positive.len() < basis.len() {
        return Err(FitError::NotEnoughData {
            needed: basis.len(),
            available: positive.len(),
        });
    }

    let (design, scales) = basis.design(&points)?;
    let permeances = DVector::from_iterator(points.len(), points.iter().map(|p| p.permeance));

    let log_design = design.select_rows(&positive);
    let log_permeances =
        DVector::from_iterator(positive.len(), positive.iter().map(|&i| points[i].permeance.ln()));
    let initial = least_squares(&log_design, &log_permeances)?;
    let refined = levenberg_marquardt(&design, &permeances, initial);

    let theta: Vec<f64> = refined.iter().zip(&scales).map(|(z, s)| z / s).collect();
    basis.into_function(&theta)
}

/// Fits every candidate order pair and keeps the lowest AIC.
///
/// Candidates that fail to fit are skipped. Isothermal data only tries
/// temperature order 0.
///
/// # Errors
///
/// Returns the last candidate's error if no candidate could be fitted.
pub fn find_best_fit(
    data: &Measurements,
    orders: FitOrders,
    include_zero: bool,
) -> Result<PermeanceFunction, FitError> {
    let compositions: Vec<usize> = orders
        .composition
        .map_or_else(|| COMPOSITION_ORDERS.to_vec(), |n| vec![n]);
    let temperatures: Vec<usize> = match orders.temperature {
        Some(m) => vec![m],
        None if data.spans_single_temperature() => vec![0],
        None => TEMPERATURE_ORDERS.to_vec(),
    };

    let points = if include_zero {
        data.with_zero_anchors()
    } else {
        data.points().to_vec()
    };

    let mut best: Option<(f64, PermeanceFunction)> = None;
    let mut last_error = FitError::NotEnoughData {
        needed: 1,
        available: 0,
    };
    for &n in &compositions {
        for &m in &temperatures {
            match fit(data, n, m, include_zero) {
                Ok(function) => {
                    let score = aic(&function, &points);
                    debug!("{:?} permeance fit n={n} m={m}: AIC {score:.4}", data.component());
                    if best.as_ref().is_none_or(|(s, _)| score < *s) {
                        best = Some((score, function));
                    }
                }
                Err(err) => {
                    warn!("discarding {:?} permeance fit n={n} m={m}: {err}", data.component());
                    last_error = err;
                }
            }
        }
    }

    best.map(|(_, function)| function).ok_or(last_error)
}

/// Akaike information criterion on permeance residuals.
fn aic(function: &PermeanceFunction, points: &[Measurement]) -> f64 {
    let n = points.len() as f64;
    let k = (function.a().len() + function.b().len()) as f64;
    let rss: f64 = points
        .iter()
        .map(|p| (function.value(p.composition, p.temperature) - p.permeance).powi(2))
        .sum();
    let scale: f64 = points.iter().map(|p| p.permeance * p.permeance).sum::<f64>() / n;
    let floor = 1e-12 * scale.max(f64::MIN_POSITIVE);
    n * (rss / n).max(floor).ln() + 2.0 * k
}

/// Linear features of `ln P` in the reparametrized variables.
///
/// With `s = 1 − T̄/T`, `ln P = Σ c_i x^i + Σ d_j x^j s`, which maps back to
/// `a_i = c_i + d_i` and `b_j = d_j · T̄`.
struct Basis {
    composition_order: usize,
    temperature_order: Option<usize>,
    mean_temperature: f64,
}

impl Basis {
    fn new(
        composition_order: usize,
        temperature_order: Option<usize>,
        points: &[Measurement],
    ) -> Self {
        let mean_temperature =
            points.iter().map(|p| p.temperature).sum::<f64>() / points.len().max(1) as f64;
        Self {
            composition_order,
            temperature_order,
            mean_temperature,
        }
    }

    fn len(&self) -> usize {
        self.composition_order + 1 + self.temperature_order.map_or(0, |m| m + 1)
    }

    fn features(&self, point: &Measurement) -> impl Iterator<Item = f64> + '_ {
        let x = point.composition;
        let s = 1.0 - self.mean_temperature / point.temperature;
        let composition = (0..=self.composition_order).map(move |i| x.powi(i as i32));
        let temperature = self
            .temperature_order
            .into_iter()
            .flat_map(move |m| (0..=m).map(move |j| x.powi(j as i32) * s));
        composition.chain(temperature)
    }

    /// Column-normalized design matrix and the column scales.
    fn design(&self, points: &[Measurement]) -> Result<(DMatrix<f64>, Vec<f64>), FitError> {
        let mut design = DMatrix::zeros(points.len(), self.len());
        for (r, point) in points.iter().enumerate() {
            for (c, value) in self.features(point).enumerate() {
                design[(r, c)] = value;
            }
        }

        let mut scales = Vec::with_capacity(self.len());
        for mut column in design.column_iter_mut() {
            let norm = column.norm();
            if !(norm > 0.0 && norm.is_finite()) {
                return Err(FitError::Singular);
            }
            column /= norm;
            scales.push(norm);
        }
        Ok((design, scales))
    }

    fn into_function(&self, theta: &[f64]) -> Result<PermeanceFunction, FitError> {
        let (c, d) = theta.split_at(self.composition_order + 1);
        if d.is_empty() {
            return PermeanceFunction::new(c.to_vec(), vec![0.0]);
        }

        let len = c.len().max(d.len());
        let a = (0..len)
            .map(|i| c.get(i).copied().unwrap_or(0.0) + d.get(i).copied().unwrap_or(0.0))
            .collect();
        let b = d.iter().map(|d| d * self.mean_temperature).collect();
        PermeanceFunction::new(a, b)
    }
}

fn least_squares(design: &DMatrix<f64>, target: &DVector<f64>) -> Result<DVector<f64>, FitError> {
    let normal = design.transpose() * design;
    let rhs = design.transpose() * target;
    let solution = normal.lu().solve(&rhs).ok_or(FitError::Singular)?;
    if solution.iter().all(|v| v.is_finite()) {
        Ok(solution)
    } else {
        Err(FitError::NonFinite)
    }
}

fn residual_sum(design: &DMatrix<f64>, target: &DVector<f64>, theta: &DVector<f64>) -> f64 {
    let predicted = (design * theta).map(f64::exp);
    (predicted - target).norm_squared()
}

/// Minimizes `Σ (exp(φ·θ) − P)²` starting from `theta`.
///
/// Returns the starting point unchanged if no step improves it.
fn levenberg_marquardt(
    design: &DMatrix<f64>,
    target: &DVector<f64>,
    mut theta: DVector<f64>,
) -> DVector<f64> {
    let mut lambda = 1e-3;
    let mut rss = residual_sum(design, target, &theta);

    for _ in 0..MAX_LM_ITERS {
        let predicted = (design * &theta).map(f64::exp);
        let residual = &predicted - target;
        let jacobian = DMatrix::from_fn(design.nrows(), design.ncols(), |r, c| {
            predicted[r] * design[(r, c)]
        });
        let jtj = jacobian.transpose() * &jacobian;
        let gradient = jacobian.transpose() * &residual;

        let mut accepted = None;
        for _ in 0..MAX_DAMPING_TRIALS {
            let mut damped = jtj.clone();
            for d in 0..damped.ncols() {
                damped[(d, d)] += lambda * jtj[(d, d)].max(1e-12);
            }
            if let Some(step) = damped.lu().solve(&(-&gradient)) {
                let candidate = &theta + step;
                let candidate_rss = residual_sum(design, target, &candidate);
                if candidate_rss.is_finite() && candidate_rss < rss {
                    accepted = Some((candidate, candidate_rss));
                    lambda = (lambda / 10.0).max(1e-12);
                    break;
                }
            }
            lambda *= 10.0;
        }

        let Some((candidate, candidate_rss)) = accepted else {
            break;
        };
        let improvement = (rss - candidate_rss) / rss.max(f64::MIN_POSITIVE);
        theta = candidate;
        rss = candidate_rss;
        if improvement < 1e-12 {
            break;
        }
    }

    theta
}
