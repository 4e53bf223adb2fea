use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

use comphyd::configuration::Configuration;
use comphyd::math::intersection::intersectionfinder::{IntersectionFinder, SelectionPolicy};
use comphyd::plot::chartwriter::ChartWriter;
use comphyd::plot::scenariochart;
use comphyd::sweep::sweeprunner::SweepRunner;

fn load_configuration(path: &Path) -> Configuration {
    match Configuration::from_reader(path) {
        Ok(configuration) => configuration,
        Err(err) => {
            log::info!(
                "no usable configuration at {} ({err}); using the built-in studies",
                path.display()
            );
            Configuration::builtin()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    log::set_max_level(log::LevelFilter::Info);

    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("scenarios.json"));
    let configuration = load_configuration(&config_path);

    let runner = SweepRunner::new();
    let finder = IntersectionFinder::new(SelectionPolicy::FirstCrossingInterpolated);
    let writer = ChartWriter::default();
    let output_dir = Path::new(".");

    for scenario in configuration.scenarios() {
        log::info!("running scenario {}", scenario.name());
        let report = runner.run(scenario)?;
        let report_path = output_dir.join(format!("{}_results.json", scenario.name()));
        report.write_json(&report_path)?;
        log::info!("report written to {}", report_path.display());
        scenariochart::write_scenario_figures(&writer, &finder, scenario, output_dir)?;
    }
    Ok(())
}
