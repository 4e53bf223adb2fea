/// A head-vs-flow characteristic given in closed form.
///
/// Implementors evaluate head at an arbitrary flow rate. The derivative is
/// the local slope of the characteristic.
pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;
}
