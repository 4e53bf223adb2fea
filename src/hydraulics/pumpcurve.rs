use crate::hydraulics::hydraulicserror::HydraulicsError;
use crate::math::curve::curve::Curve;

/// Second-degree polynomial pump characteristic:
///
///   H(Q) = h_max * eff * (1 - ((Q - q_max) / q_max)^2)
///
/// Head peaks at the rated flow `q_max` and falls off quadratically on
/// either side. `q_max` must be positive; a zero rated flow would divide
/// by zero inside `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpCurve {
    q_max: f64,
    h_max: f64,
    efficiency: f64,
}

impl PumpCurve {
    pub fn new(q_max: f64, h_max: f64) -> Result<PumpCurve, HydraulicsError> {
        PumpCurve::with_efficiency(q_max, h_max, 1.0)
    }

    pub fn with_efficiency(
        q_max: f64,
        h_max: f64,
        efficiency: f64,
    ) -> Result<PumpCurve, HydraulicsError> {
        if q_max <= 0.0 {
            return Err(HydraulicsError::NonPositiveRatedFlow(q_max));
        }
        Ok(PumpCurve { q_max, h_max, efficiency })
    }

    pub fn q_max(&self) -> f64 {
        self.q_max
    }

    pub fn h_max(&self) -> f64 {
        self.h_max
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }
}

impl Curve for PumpCurve {
    fn value(&self, q: f64) -> f64 {
        let relative = (q - self.q_max) / self.q_max;
        self.h_max * self.efficiency * (1.0 - relative * relative)
    }

    fn derivative(&self, q: f64) -> f64 {
        -2.0 * self.h_max * self.efficiency * (q - self.q_max) / (self.q_max * self.q_max)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(300.0, 300.0)]
    #[case(600.0, 0.0)]
    #[case(150.0, 225.0)]
    fn head_matches_formula(#[case] q: f64, #[case] expected: f64) {
        let pump = PumpCurve::new(300.0, 300.0).unwrap();
        assert_relative_eq!(pump.value(q), expected, epsilon = 1e-12);
    }

    #[test]
    fn efficiency_scales_head() {
        let pump = PumpCurve::with_efficiency(300.0, 300.0, 1.5).unwrap();
        assert_relative_eq!(pump.value(300.0), 450.0);
    }

    #[test]
    fn derivative_vanishes_at_rated_flow() {
        let pump = PumpCurve::new(200.0, 300.0).unwrap();
        assert_relative_eq!(pump.derivative(200.0), 0.0);
        assert!(pump.derivative(100.0) > 0.0);
        assert!(pump.derivative(250.0) < 0.0);
    }

    #[test]
    fn zero_rated_flow_is_a_domain_error() {
        assert_eq!(
            PumpCurve::new(0.0, 300.0).unwrap_err(),
            HydraulicsError::NonPositiveRatedFlow(0.0)
        );
    }
}
