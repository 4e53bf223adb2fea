use crate::hydraulics::hydraulicserror::HydraulicsError;
use crate::hydraulics::pumpcurve::PumpCurve;
use crate::math::curve::curve::Curve;

/// Pumps delivering into the same line, heads added.
///
/// The capstone configurations ("Single", "50%+50%", "100%+50%",
/// "100%+100%") are groups of units sharing a rated flow but scaled in
/// shut-off head.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpGroup {
    label: String,
    units: Vec<PumpCurve>,
}

impl PumpGroup {
    pub fn new(label: String, units: Vec<PumpCurve>) -> Result<PumpGroup, HydraulicsError> {
        if units.is_empty() {
            return Err(HydraulicsError::EmptyPumpGroup);
        }
        Ok(PumpGroup { label, units })
    }

    /// Builds a group from shut-off head fractions of a common `h_max`,
    /// all units running at the same efficiency.
    pub fn from_head_fractions(
        label: String,
        q_max: f64,
        h_max: f64,
        fractions: &[f64],
        efficiency: f64,
    ) -> Result<PumpGroup, HydraulicsError> {
        let units = fractions
            .iter()
            .map(|&fraction| PumpCurve::with_efficiency(q_max, h_max * fraction, efficiency))
            .collect::<Result<Vec<_>, _>>()?;
        PumpGroup::new(label, units)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn units(&self) -> &[PumpCurve] {
        &self.units
    }
}

impl Curve for PumpGroup {
    fn value(&self, q: f64) -> f64 {
        self.units.iter().map(|unit| unit.value(q)).sum()
    }

    fn derivative(&self, q: f64) -> f64 {
        self.units.iter().map(|unit| unit.derivative(q)).sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn heads_are_additive() {
        let twin = PumpGroup::from_head_fractions(
            "100%+100%".to_string(),
            300.0,
            300.0,
            &[1.0, 1.0],
            1.0,
        )
        .unwrap();
        let single = PumpCurve::new(300.0, 300.0).unwrap();
        assert_relative_eq!(twin.value(150.0), 2.0 * single.value(150.0));
    }

    #[test]
    fn half_half_equals_single() {
        // Two units at half shut-off head sum to the single-pump curve.
        let split = PumpGroup::from_head_fractions(
            "50%+50%".to_string(),
            300.0,
            300.0,
            &[0.5, 0.5],
            1.0,
        )
        .unwrap();
        let single = PumpCurve::new(300.0, 300.0).unwrap();
        assert_relative_eq!(split.value(120.0), single.value(120.0));
    }

    #[test]
    fn empty_group_is_an_error() {
        assert_eq!(
            PumpGroup::new("none".to_string(), Vec::new()).unwrap_err(),
            HydraulicsError::EmptyPumpGroup
        );
    }
}
