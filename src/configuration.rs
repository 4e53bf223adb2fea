use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sweep::scenario::{PumpGroupSpec, Scenario};

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_delay_ms() -> u64 {
    1_000
}

/// Settings for the product scraper side of the toolkit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeSettings {
    urls: Vec<String>,
    output: String,
    #[serde(default = "default_delay_ms")]
    delay_ms: u64,
}

impl ScrapeSettings {
    pub fn new(urls: Vec<String>, output: &str, delay_ms: u64) -> ScrapeSettings {
        ScrapeSettings { urls, output: output.to_string(), delay_ms }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    scenarios: Vec<Scenario>,
    #[serde(default)]
    scrape: Option<ScrapeSettings>,
}

impl Configuration {
    pub fn from_reader(file_path: &Path) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration = serde_json::from_reader(reader)?;
        Ok(configuration)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scrape(&self) -> Option<&ScrapeSettings> {
        self.scrape.as_ref()
    }

    /// The studies the toolkit was built around, used when no
    /// configuration file is supplied.
    pub fn builtin() -> Configuration {
        let single_pump_accumulator = Scenario::new("single_pump_accumulator", 150.0, 500.0, 30.0, 0.02)
            .with_q_shift(20.0)
            .with_volumes(vec![0.0, 1.0, 3.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0])
            .with_discharge_times(vec![
                1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0,
            ]);

        let single_pump_accu_variables =
            Scenario::new("single_pump_accu_variables", 100.0, 300.0, 30.0, 0.02)
                .with_q_shift(15.0)
                .with_volumes(vec![5.0, 10.0, 15.0, 20.0])
                .with_discharge_times(vec![1.0, 2.0, 3.0, 4.0, 5.0])
                .with_efficiencies(vec![1.0]);

        let double_pump_eff_variables =
            Scenario::new("double_pump_eff_variables", 100.0, 300.0, 30.0, 0.02)
                .with_q_shift(15.0)
                .with_volumes(vec![5.0])
                .with_discharge_times(vec![3.0])
                .with_efficiencies(vec![1.0, 1.25, 1.5, 1.75, 2.0]);

        let pump_acc_mix_variables =
            Scenario::new("pump_acc_mix_variables", 100.0, 300.0, 30.0, 0.02)
                .with_q_shift(15.0)
                .with_volumes(vec![3.0, 5.0, 10.0, 15.0])
                .with_discharge_times(vec![1.0, 3.0, 5.0])
                .with_efficiencies(vec![1.0, 1.5, 2.0]);

        let scrape = ScrapeSettings::new(
            vec!["https://mlreng.com/collections/all?limit=200".to_string()],
            "web/all_products.json",
            default_delay_ms(),
        );

        Configuration {
            scenarios: vec![
                single_pump_accumulator,
                single_pump_accu_variables,
                double_pump_eff_variables,
                pump_acc_mix_variables,
            ],
            scrape: Some(scrape),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn builtin_covers_the_reference_studies() {
        let configuration = Configuration::builtin();
        assert_eq!(configuration.scenarios().len(), 4);
        let first = &configuration.scenarios()[0];
        assert_eq!(first.name(), "single_pump_accumulator");
        assert_eq!(first.q_max(), 150.0);
        assert_eq!(first.volumes().len(), 9);
        assert_eq!(first.discharge_times().len(), 10);
        assert!(configuration.scrape().is_some());
    }

    #[test]
    fn reads_a_minimal_file_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "scenarios": [
                    {{
                        "name": "minimal",
                        "q_max": 100.0,
                        "h_max": 300.0,
                        "static_head": 30.0,
                        "resistance": 0.02
                    }}
                ]
            }}"#
        )
        .unwrap();
        let configuration = Configuration::from_reader(file.path()).unwrap();
        assert_eq!(configuration.scenarios().len(), 1);
        let scenario = &configuration.scenarios()[0];
        assert_eq!(scenario.samples(), 400);
        assert_eq!(scenario.volumes(), &[0.0]);
        assert!(configuration.scrape().is_none());
    }

    #[test]
    fn scrape_settings_round_trip() {
        let settings = ScrapeSettings::new(
            vec!["https://example.com/collections/all".to_string()],
            "web/store.json",
            250,
        );
        let json = serde_json::to_string(&settings).unwrap();
        let back: ScrapeSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.urls().len(), 1);
        assert_eq!(back.delay_ms(), 250);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Configuration::from_reader(Path::new("no/such/config.json"));
        assert!(matches!(result, Err(ConfigurationError::Io(_))));
    }

    #[test]
    fn group_specs_survive_serialization() {
        let scenario = Scenario::new("groups", 100.0, 300.0, 30.0, 0.02)
            .with_pump_groups(vec![PumpGroupSpec::new("Custom", vec![1.0, 0.75])]);
        let json = serde_json::to_string(&scenario).unwrap();
        let back: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pump_groups().len(), 1);
        assert_eq!(back.pump_groups()[0].label(), "Custom");
    }
}
