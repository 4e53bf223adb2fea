use thiserror::Error;

use crate::math::curve::curve::Curve;

#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("a sampled curve needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
    #[error("sample domain is not strictly increasing at index {0}")]
    NonMonotonicDomain(usize),
    #[error("domain end {end} does not exceed start {start}")]
    DegenerateRange { start: f64, end: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    x: f64,
    y: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64) -> SamplePoint {
        SamplePoint { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs_pt: &SamplePoint, rhs_pt: &SamplePoint) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}

/// An immutable tabulated function: (x, y) samples, strictly increasing in x.
///
/// The constructors reject domains that would make pairwise differencing
/// against another curve meaningless (fewer than 2 samples, unordered x).
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    points: Vec<SamplePoint>,
}

impl SampledCurve {
    pub fn new(points: Vec<SamplePoint>) -> Result<SampledCurve, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewSamples(points.len()));
        }
        for i in 1..points.len() {
            if points[i].x() <= points[i - 1].x() {
                return Err(CurveError::NonMonotonicDomain(i));
            }
        }
        Ok(SampledCurve { points })
    }

    /// Evaluates a closed-form curve over a discretized domain.
    pub fn from_curve(curve: &dyn Curve, domain: &[f64]) -> Result<SampledCurve, CurveError> {
        let points = domain
            .iter()
            .map(|&x| SamplePoint::new(x, curve.value(x)))
            .collect();
        SampledCurve::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x(&self, index: usize) -> f64 {
        self.points[index].x()
    }

    pub fn y(&self, index: usize) -> f64 {
        self.points[index].y()
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn min_x(&self) -> f64 {
        self.points[0].x()
    }

    pub fn max_x(&self) -> f64 {
        self.points[self.points.len() - 1].x()
    }

    pub fn min_y(&self) -> f64 {
        self.points.iter().map(SamplePoint::y).fold(f64::INFINITY, f64::min)
    }

    pub fn max_y(&self) -> f64 {
        self.points.iter().map(SamplePoint::y).fold(f64::NEG_INFINITY, f64::max)
    }

    /// Horizontal offset, used to model the flow contribution of a
    /// discharging accumulator. Ordering in x is preserved.
    pub fn shifted(&self, dx: f64) -> SampledCurve {
        let points = self
            .points
            .iter()
            .map(|pt| SamplePoint::new(pt.x() + dx, pt.y()))
            .collect();
        SampledCurve { points }
    }
}

/// `count` evenly spaced values over `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, count: usize) -> Result<Vec<f64>, CurveError> {
    if count < 2 {
        return Err(CurveError::TooFewSamples(count));
    }
    if stop <= start {
        return Err(CurveError::DegenerateRange { start, end: stop });
    }
    let step = (stop - start) / (count - 1) as f64;
    Ok((0..count).map(|i| start + step * i as f64).collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn points(values: &[(f64, f64)]) -> Vec<SamplePoint> {
        values.iter().map(|&(x, y)| SamplePoint::new(x, y)).collect()
    }

    #[test]
    fn rejects_single_sample() {
        let result = SampledCurve::new(points(&[(0.0, 1.0)]));
        assert_eq!(result.unwrap_err(), CurveError::TooFewSamples(1));
    }

    #[test]
    fn rejects_unordered_domain() {
        let result = SampledCurve::new(points(&[(0.0, 1.0), (2.0, 1.0), (2.0, 3.0)]));
        assert_eq!(result.unwrap_err(), CurveError::NonMonotonicDomain(2));
    }

    #[test]
    fn linspace_covers_endpoints() {
        let domain = linspace(0.0, 300.0, 400).unwrap();
        assert_eq!(domain.len(), 400);
        assert_relative_eq!(domain[0], 0.0);
        assert_relative_eq!(domain[399], 300.0);
        assert_relative_eq!(domain[1] - domain[0], 300.0 / 399.0);
    }

    #[test]
    fn linspace_rejects_degenerate_range() {
        assert!(linspace(10.0, 10.0, 5).is_err());
        assert!(linspace(0.0, 1.0, 1).is_err());
    }

    #[test]
    fn shifted_moves_x_only() {
        let curve = SampledCurve::new(points(&[(0.0, 5.0), (1.0, 6.0)])).unwrap();
        let shifted = curve.shifted(15.0);
        assert_relative_eq!(shifted.x(0), 15.0);
        assert_relative_eq!(shifted.x(1), 16.0);
        assert_relative_eq!(shifted.y(0), 5.0);
        assert_relative_eq!(shifted.y(1), 6.0);
    }

    #[test]
    fn y_extrema() {
        let curve =
            SampledCurve::new(points(&[(0.0, 3.0), (1.0, -2.0), (2.0, 7.0)])).unwrap();
        assert_relative_eq!(curve.min_y(), -2.0);
        assert_relative_eq!(curve.max_y(), 7.0);
    }
}
