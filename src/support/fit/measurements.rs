/// Which component of a binary mixture a set of measurements describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentIndex {
    First,
    Second,
}

impl ComponentIndex {
    /// Feed mass fraction at which this component is absent.
    #[must_use]
    pub fn absent_at(self) -> f64 {
        match self {
            Self::First => 0.0,
            Self::Second => 1.0,
        }
    }
}

/// One permeance observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// First component's feed mass fraction.
    pub composition: f64,
    /// Feed temperature in kelvin.
    pub temperature: f64,
    /// Permeance in kg/(m²·h·kPa).
    pub permeance: f64,
}

/// Permeance observations for one component of a mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurements {
    component: ComponentIndex,
    points: Vec<Measurement>,
}

impl Measurements {
    #[must_use]
    pub fn new(component: ComponentIndex, points: Vec<Measurement>) -> Self {
        Self { component, points }
    }

    #[must_use]
    pub fn component(&self) -> ComponentIndex {
        self.component
    }

    #[must_use]
    pub fn points(&self) -> &[Measurement] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, measurement: Measurement) {
        self.points.push(measurement);
    }

    /// Distinct measurement temperatures in ascending order.
    #[must_use]
    pub fn temperatures(&self) -> Vec<f64> {
        let mut temperatures: Vec<f64> = self.points.iter().map(|p| p.temperature).collect();
        temperatures.sort_by(f64::total_cmp);
        temperatures.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        temperatures
    }

    #[must_use]
    pub fn spans_single_temperature(&self) -> bool {
        self.temperatures().len() <= 1
    }

    /// The measurements plus a zero-permeance point at the composition where
    /// this component is absent, one per distinct temperature.
    #[must_use]
    pub fn with_zero_anchors(&self) -> Vec<Measurement> {
        let x = self.component.absent_at();
        let anchors = self.temperatures().into_iter().map(|temperature| Measurement {
            composition: x,
            temperature,
            permeance: 0.0,
        });
        self.points.iter().copied().chain(anchors).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(composition: f64, temperature: f64) -> Measurement {
        Measurement {
            composition,
            temperature,
            permeance: 0.01,
        }
    }

    #[test]
    fn anchors_per_temperature() {
        let data = Measurements::new(
            ComponentIndex::Second,
            vec![point(0.1, 330.0), point(0.2, 330.0), point(0.1, 350.0)],
        );
        assert_eq!(data.temperatures(), vec![330.0, 350.0]);
        assert!(!data.spans_single_temperature());

        let anchored = data.with_zero_anchors();
        assert_eq!(anchored.len(), 5);
        let anchors: Vec<_> = anchored.iter().filter(|m| m.permeance == 0.0).collect();
        assert_eq!(anchors.len(), 2);
        assert!(anchors.iter().all(|m| m.composition == 1.0));
    }

    #[test]
    fn single_temperature() {
        let data = Measurements::new(ComponentIndex::First, vec![point(0.1, 330.0), point(0.3, 330.0)]);
        assert!(data.spans_single_temperature());
        assert_eq!(data.with_zero_anchors()[2].composition, 0.0);
    }
}
