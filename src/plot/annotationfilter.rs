/// Suppresses chart labels that would pile on top of each other.
///
/// Two operating points closer than the threshold along the flow axis are
/// one annotation cluster; only the first admitted point keeps its label.
/// The comparison is strict, so points exactly `threshold` apart stay
/// distinct.
pub struct AnnotationFilter {
    threshold: f64,
    annotated: Vec<f64>,
}

impl AnnotationFilter {
    pub const DEFAULT_THRESHOLD: f64 = 0.5;

    pub fn new(threshold: f64) -> AnnotationFilter {
        AnnotationFilter { threshold, annotated: Vec::new() }
    }

    /// True when `x` is not within the threshold of any previously
    /// admitted annotation; admitted values are recorded.
    pub fn admit(&mut self, x: f64) -> bool {
        if self.annotated.iter().any(|&seen| (x - seen).abs() < self.threshold) {
            return false;
        }
        self.annotated.push(x);
        true
    }
}

impl Default for AnnotationFilter {
    fn default() -> AnnotationFilter {
        AnnotationFilter::new(AnnotationFilter::DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_crossings_collapse_to_one() {
        let mut filter = AnnotationFilter::default();
        assert!(filter.admit(10.0));
        assert!(!filter.admit(10.3));
        assert!(!filter.admit(9.6));
    }

    #[test]
    fn crossings_exactly_at_threshold_stay_distinct() {
        let mut filter = AnnotationFilter::default();
        assert!(filter.admit(10.0));
        assert!(filter.admit(10.5));
    }

    #[test]
    fn rejected_points_are_not_recorded() {
        let mut filter = AnnotationFilter::default();
        assert!(filter.admit(10.0));
        assert!(!filter.admit(10.4));
        // 10.8 is far enough from 10.0; the rejected 10.4 must not block it.
        assert!(filter.admit(10.8));
    }
}
