use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::hydraulics::accumulator::Accumulator;
use crate::hydraulics::systemcurve::SystemCurve;
use crate::math::curve::sampledcurve::SampledCurve;
use crate::math::intersection::intersectionfinder::IntersectionFinder;
use crate::plot::annotationfilter::AnnotationFilter;
use crate::plot::chartwriter::{ChartMarker, ChartPanel, ChartSeries, ChartWriter};
use crate::plot::ploterror::PlotError;
use crate::sweep::scenario::Scenario;

const GRID_COLUMNS: usize = 10;

/// The comparison figure: every pump group, its accumulator-shifted
/// variant and the system curve in one panel, operating points labelled
/// through the annotation filter so overlapping crossings keep one label.
pub fn comparison_panel(
    scenario: &Scenario,
    accumulator_shift: f64,
    finder: &IntersectionFinder,
) -> Result<ChartPanel, PlotError> {
    let domain = scenario.domain()?;
    let system = SystemCurve::new(scenario.static_head(), scenario.resistance());
    let system_samples = SampledCurve::from_curve(&system, &domain)?;

    let shifted_domain: Vec<f64> = domain.iter().map(|q| q + accumulator_shift).collect();
    let shifted_system = SampledCurve::from_curve(&system, &shifted_domain)?;

    let mut series = Vec::new();
    let mut markers = Vec::new();
    let mut filter = AnnotationFilter::default();

    for spec in scenario.pump_groups() {
        let group = spec.to_group(scenario.q_max(), scenario.h_max(), 1.0)?;
        let pump = SampledCurve::from_curve(&group, &domain)?;
        let shifted = pump.shifted(accumulator_shift);
        let acc_label = format!("{} + Acc", spec.label());

        if let Some(point) = finder.find(&pump, &system_samples)? {
            if filter.admit(point.x()) {
                markers.push(ChartMarker::new(spec.label(), point.x(), point.y()));
            }
        }
        if let Some(point) = finder.find(&shifted, &shifted_system)? {
            if filter.admit(point.x()) {
                markers.push(ChartMarker::new(&acc_label, point.x(), point.y()));
            }
        }

        series.push(ChartSeries::new(spec.label(), pump));
        series.push(ChartSeries::new(&acc_label, shifted));
    }
    series.push(ChartSeries::new("System Curve", system_samples));

    let title = format!(
        "Pump and System Curves with Accumulator Effect (Q_max={}, H_max={}, shift={:.2})",
        scenario.q_max(),
        scenario.h_max(),
        accumulator_shift,
    );
    Ok(ChartPanel::new(&title, series, markers))
}

/// One small panel per volume x discharge-time x efficiency combination,
/// drawn with the scenario's first pump group as in the bulk study.
pub fn grid_panels(
    scenario: &Scenario,
    finder: &IntersectionFinder,
) -> Result<Vec<ChartPanel>, PlotError> {
    let Some(primary) = scenario.pump_groups().first() else {
        return Err(PlotError::EmptyChart(format!(
            "scenario '{}' declares no pump groups",
            scenario.name()
        )));
    };

    let domain = scenario.domain()?;
    let system = SystemCurve::new(scenario.static_head(), scenario.resistance());
    let system_samples = SampledCurve::from_curve(&system, &domain)?;

    let mut panels = Vec::new();
    for &volume in scenario.volumes() {
        for &discharge_time in scenario.discharge_times() {
            let shift = Accumulator::new(volume, discharge_time)?.flow_shift();
            let shifted_domain: Vec<f64> = domain.iter().map(|q| q + shift).collect();
            let shifted_system = SampledCurve::from_curve(&system, &shifted_domain)?;

            for &efficiency in scenario.efficiencies() {
                let group =
                    primary.to_group(scenario.q_max(), scenario.h_max(), efficiency)?;
                let pump = SampledCurve::from_curve(&group, &domain)?;
                let shifted = pump.shifted(shift);

                let mut markers = Vec::new();
                if let Some(point) = finder.find(&pump, &system_samples)? {
                    markers.push(ChartMarker::new("op", point.x(), point.y()));
                }
                if let Some(point) = finder.find(&shifted, &shifted_system)? {
                    markers.push(ChartMarker::new("op+acc", point.x(), point.y()));
                }

                let eff_label = format!("Eff {:.0}%", efficiency * 100.0);
                let series = vec![
                    ChartSeries::new(&eff_label, pump),
                    ChartSeries::new(&format!("{eff_label} w/ Acc"), shifted),
                    ChartSeries::new("System Curve", system_samples.clone()),
                ];
                let title = format!("V={volume} T={discharge_time} {eff_label}");
                panels.push(ChartPanel::new(&title, series, markers));
            }
        }
    }
    Ok(panels)
}

/// Writes every figure a scenario produces: one comparison chart per
/// accumulator combination plus the bulk grid, returning the paths.
pub fn write_scenario_figures(
    writer: &ChartWriter,
    finder: &IntersectionFinder,
    scenario: &Scenario,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, PlotError> {
    let mut written = Vec::new();

    let mut iteration = 1;
    for &volume in scenario.volumes() {
        for &discharge_time in scenario.discharge_times() {
            let shift = Accumulator::new(volume, discharge_time)?.flow_shift();
            let panel = comparison_panel(scenario, shift, finder)?;
            let path = output_dir.join(format!("{}_{iteration:02}.png", scenario.name()));
            writer.write(&path, &panel)?;
            log::info!("plot generated {}", path.display());
            written.push(path);
            iteration += 1;
        }
    }

    let panels = grid_panels(scenario, finder)?;
    let stamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let title = format!("Possible Pump & Accumulator Variations - {stamp}");
    let grid_path = output_dir.join(format!("{}_grid.png", scenario.name()));
    writer.write_grid(&grid_path, &title, &panels, GRID_COLUMNS)?;
    log::info!("plot generated {}", grid_path.display());
    written.push(grid_path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use crate::math::intersection::intersectionfinder::SelectionPolicy;
    use crate::sweep::scenario::PumpGroupSpec;

    use super::*;

    fn scenario() -> Scenario {
        Scenario::new("panel_test", 100.0, 300.0, 30.0, 0.02)
            .with_q_shift(10.0)
            .with_volumes(vec![5.0])
            .with_discharge_times(vec![1.0, 5.0])
            .with_efficiencies(vec![1.0, 1.5])
    }

    fn finder() -> IntersectionFinder {
        IntersectionFinder::new(SelectionPolicy::FirstCrossingInterpolated)
    }

    #[test]
    fn comparison_panel_has_all_series() {
        let panel = comparison_panel(&scenario(), 5.0, &finder()).unwrap();
        // Four groups, each with an accumulator twin, plus the system curve.
        assert_eq!(panel.series().len(), 9);
        assert!(!panel.markers().is_empty());
    }

    #[test]
    fn grid_panel_per_combination() {
        let panels = grid_panels(&scenario(), &finder()).unwrap();
        // 1 volume x 2 discharge times x 2 efficiencies
        assert_eq!(panels.len(), 4);
        for panel in &panels {
            assert_eq!(panel.series().len(), 3);
        }
    }

    #[test]
    fn group_without_pumps_is_rejected() {
        let empty = scenario().with_pump_groups(Vec::new());
        assert!(matches!(
            grid_panels(&empty, &finder()),
            Err(PlotError::EmptyChart(_))
        ));
        // The comparison panel would also be empty of pump series but the
        // system curve keeps it drawable; markers are simply absent.
        let panel = comparison_panel(&empty, 5.0, &finder()).unwrap();
        assert_eq!(panel.series().len(), 1);
        assert!(panel.markers().is_empty());
    }

    #[test]
    fn overlapping_group_labels_are_deduplicated() {
        // "Single P." and "50%+50%" produce the same summed curve, hence
        // the same crossing; only one of the two gets a label.
        let duplicated = scenario().with_pump_groups(vec![
            PumpGroupSpec::new("Single P.", vec![1.0]),
            PumpGroupSpec::new("50%+50%", vec![0.5, 0.5]),
        ]);
        let panel = comparison_panel(&duplicated, 5.0, &finder()).unwrap();
        // Two crossings per group (plain + accumulator) collapse to two.
        assert_eq!(panel.markers().len(), 2);
    }
}
