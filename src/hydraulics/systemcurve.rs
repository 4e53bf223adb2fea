use crate::math::curve::curve::Curve;

/// Quadratic system characteristic: H(Q) = h0 + k * Q^2.
///
/// `static_head` (h0) is the lift to overcome at zero flow; `resistance`
/// (k) scales the friction losses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemCurve {
    static_head: f64,
    resistance: f64,
}

impl SystemCurve {
    pub fn new(static_head: f64, resistance: f64) -> SystemCurve {
        SystemCurve { static_head, resistance }
    }

    pub fn static_head(&self) -> f64 {
        self.static_head
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }
}

impl Curve for SystemCurve {
    fn value(&self, q: f64) -> f64 {
        self.static_head + self.resistance * q * q
    }

    fn derivative(&self, q: f64) -> f64 {
        2.0 * self.resistance * q
    }
}
