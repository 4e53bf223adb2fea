use crate::hydraulics::accumulator::Accumulator;
use crate::hydraulics::systemcurve::SystemCurve;
use crate::math::curve::sampledcurve::SampledCurve;
use crate::math::intersection::intersectionfinder::{IntersectionFinder, SelectionPolicy};
use crate::sweep::scenario::Scenario;
use crate::sweep::sweeperror::SweepError;
use crate::sweep::sweepreport::{SweepRecord, SweepReport};

/// Runs a scenario's volume x discharge-time x efficiency grid and
/// collects the operating point of every pump group, with and without the
/// accumulator contribution.
pub struct SweepRunner {
    finder: IntersectionFinder,
}

impl Default for SweepRunner {
    fn default() -> SweepRunner {
        SweepRunner::new()
    }
}

impl SweepRunner {
    /// Interpolated first-crossing selection; see DESIGN.md for why the
    /// sweep commits to this policy.
    pub fn new() -> SweepRunner {
        SweepRunner::with_policy(SelectionPolicy::FirstCrossingInterpolated)
    }

    pub fn with_policy(policy: SelectionPolicy) -> SweepRunner {
        SweepRunner { finder: IntersectionFinder::new(policy) }
    }

    pub fn run(&self, scenario: &Scenario) -> Result<SweepReport, SweepError> {
        let domain = scenario.domain()?;
        let system = SystemCurve::new(scenario.static_head(), scenario.resistance());
        let system_samples = SampledCurve::from_curve(&system, &domain)?;

        let mut records = Vec::new();
        for &volume in scenario.volumes() {
            for &discharge_time in scenario.discharge_times() {
                let shift = Accumulator::new(volume, discharge_time)?.flow_shift();
                let shifted_domain: Vec<f64> = domain.iter().map(|q| q + shift).collect();
                let shifted_system = SampledCurve::from_curve(&system, &shifted_domain)?;

                for &efficiency in scenario.efficiencies() {
                    for spec in scenario.pump_groups() {
                        let group =
                            spec.to_group(scenario.q_max(), scenario.h_max(), efficiency)?;
                        let pump = SampledCurve::from_curve(&group, &domain)?;

                        let operating = self.finder.find(&pump, &system_samples)?;
                        let shifted_operating =
                            self.finder.find(&pump.shifted(shift), &shifted_system)?;

                        log::debug!(
                            "{}: V={volume} T={discharge_time} eff={efficiency} {} -> Q={:?}, Q+acc={:?}",
                            scenario.name(),
                            spec.label(),
                            operating.map(|p| p.x()),
                            shifted_operating.map(|p| p.x()),
                        );
                        records.push(SweepRecord::new(
                            spec.label(),
                            volume,
                            discharge_time,
                            efficiency,
                            shift,
                            operating,
                            shifted_operating,
                        ));
                    }
                }
            }
        }

        log::info!("scenario '{}': {} records", scenario.name(), records.len());
        Ok(SweepReport::new(scenario.name(), records))
    }
}

#[cfg(test)]
mod tests {
    use crate::sweep::scenario::PumpGroupSpec;

    use super::*;

    fn single_pump_scenario() -> Scenario {
        Scenario::new("unit", 100.0, 300.0, 30.0, 0.02)
            .with_q_shift(15.0)
            .with_volumes(vec![5.0, 10.0])
            .with_discharge_times(vec![1.0, 5.0])
            .with_efficiencies(vec![1.0, 1.5])
            .with_pump_groups(vec![PumpGroupSpec::new("Single P.", vec![1.0])])
    }

    #[test]
    fn record_count_is_the_full_grid() {
        let report = SweepRunner::new().run(&single_pump_scenario()).unwrap();
        // 2 volumes x 2 discharge times x 2 efficiencies x 1 group
        assert_eq!(report.records().len(), 8);
    }

    #[test]
    fn every_combination_finds_an_operating_point() {
        let report = SweepRunner::new().run(&single_pump_scenario()).unwrap();
        for record in report.records() {
            let flow = record.operating_flow().unwrap();
            // The pump parabola crosses the system curve inside the
            // sampled domain for every parameter combination above.
            assert!(flow > 0.0 && flow < 185.0, "flow {flow} out of range");
            assert!(record.shifted_operating_flow().is_some());
        }
    }

    #[test]
    fn accumulator_moves_the_operating_point_right() {
        let report = SweepRunner::new().run(&single_pump_scenario()).unwrap();
        for record in report.records() {
            let plain = record.operating_flow().unwrap();
            let shifted = record.shifted_operating_flow().unwrap();
            assert!(record.accumulator_shift() > 0.0);
            assert!(shifted > plain);
        }
    }
}
