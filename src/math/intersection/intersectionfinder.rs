use nalgebra::{Matrix2, Vector2};
use thiserror::Error;

use crate::math::curve::sampledcurve::{SamplePoint, SampledCurve};

#[derive(Debug, Error, PartialEq)]
pub enum IntersectionError {
    #[error("curves have mismatched sample counts: {lhs} vs {rhs}")]
    LengthMismatch { lhs: usize, rhs: usize },
}

/// How a crossing is selected when the curves cross more than once.
///
/// Both strategies scan adjacent sample pairs for a sign change in the
/// pointwise difference, using `<= 0` so a sample landing exactly on the
/// other curve counts as a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Take the first sign change (ascending x) and solve the local 2x2
    /// line-segment system for the sub-sample crossing point.
    FirstCrossingInterpolated,
    /// Take the last sign change and report the raw sample on the
    /// right-hand curve, with no sub-sample interpolation.
    LastCrossingNearestSample,
}

/// The operating point of a pump against a system curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    x: f64,
    y: f64,
}

impl Intersection {
    pub fn new(x: f64, y: f64) -> Intersection {
        Intersection { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Locates where one sampled curve crosses another.
///
/// "No crossing anywhere in the domain" is an expected outcome and comes
/// back as `Ok(None)` under either policy. Mismatched sample counts are a
/// caller error and fail fast.
pub struct IntersectionFinder {
    policy: SelectionPolicy,
}

impl IntersectionFinder {
    pub fn new(policy: SelectionPolicy) -> IntersectionFinder {
        IntersectionFinder { policy }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn find(
        &self,
        lhs: &SampledCurve,
        rhs: &SampledCurve,
    ) -> Result<Option<Intersection>, IntersectionError> {
        if lhs.len() != rhs.len() {
            return Err(IntersectionError::LengthMismatch {
                lhs: lhs.len(),
                rhs: rhs.len(),
            });
        }
        let found = match self.policy {
            SelectionPolicy::FirstCrossingInterpolated => first_crossing(lhs, rhs),
            SelectionPolicy::LastCrossingNearestSample => last_crossing(lhs, rhs),
        };
        Ok(found)
    }
}

fn difference(lhs: &SampledCurve, rhs: &SampledCurve, index: usize) -> f64 {
    lhs.y(index) - rhs.y(index)
}

fn first_crossing(lhs: &SampledCurve, rhs: &SampledCurve) -> Option<Intersection> {
    for i in 1..lhs.len() {
        let d_prev = difference(lhs, rhs, i - 1);
        let d_curr = difference(lhs, rhs, i);
        if d_prev * d_curr <= 0.0 {
            // Parallel local segments have no single crossing point; keep
            // scanning instead of dividing by a zero slope difference.
            if let Some(found) = interpolate_segment(lhs, rhs, i) {
                return Some(found);
            }
        }
    }
    None
}

fn last_crossing(lhs: &SampledCurve, rhs: &SampledCurve) -> Option<Intersection> {
    let mut found = None;
    for i in 1..lhs.len() {
        let d_prev = difference(lhs, rhs, i - 1);
        let d_curr = difference(lhs, rhs, i);
        if d_prev * d_curr <= 0.0 {
            found = Some(i - 1);
        }
    }
    found.map(|i| Intersection::new(rhs.x(i), rhs.y(i)))
}

/// Fits a line through samples `i - 1` and `i` of each curve and solves the
/// 2x2 system for where the two segments meet. Returns `None` when the
/// segments are parallel (singular system).
fn interpolate_segment(
    lhs: &SampledCurve,
    rhs: &SampledCurve,
    i: usize,
) -> Option<Intersection> {
    let m1 = SamplePoint::slope(&lhs.points()[i - 1], &lhs.points()[i]);
    let c1 = lhs.y(i) - m1 * lhs.x(i);

    let m2 = SamplePoint::slope(&rhs.points()[i - 1], &rhs.points()[i]);
    let c2 = rhs.y(i) - m2 * rhs.x(i);

    // m*x - y = -c for both segments
    let coefficients = Matrix2::new(m1, -1.0, m2, -1.0);
    let constants = Vector2::new(-c1, -c2);
    coefficients
        .lu()
        .solve(&constants)
        .map(|solution| Intersection::new(solution[0], solution[1]))
}
