use serde::{Deserialize, Serialize};

use crate::hydraulics::hydraulicserror::HydraulicsError;
use crate::hydraulics::pumpgroup::PumpGroup;
use crate::math::curve::sampledcurve::{CurveError, linspace};

fn default_samples() -> usize {
    400
}

fn default_volumes() -> Vec<f64> {
    vec![0.0]
}

fn default_discharge_times() -> Vec<f64> {
    vec![1.0]
}

fn default_efficiencies() -> Vec<f64> {
    vec![1.0]
}

/// A pump configuration expressed as shut-off head fractions of the
/// scenario's `h_max`, e.g. `[1.0, 0.5]` for "100%+50%".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpGroupSpec {
    label: String,
    head_fractions: Vec<f64>,
}

impl PumpGroupSpec {
    pub fn new(label: &str, head_fractions: Vec<f64>) -> PumpGroupSpec {
        PumpGroupSpec { label: label.to_string(), head_fractions }
    }

    /// The four configurations compared in the capstone study.
    pub fn default_groups() -> Vec<PumpGroupSpec> {
        vec![
            PumpGroupSpec::new("Single P.", vec![1.0]),
            PumpGroupSpec::new("50%+50%", vec![0.5, 0.5]),
            PumpGroupSpec::new("100%+50%", vec![1.0, 0.5]),
            PumpGroupSpec::new("100%+100%", vec![1.0, 1.0]),
        ]
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn head_fractions(&self) -> &[f64] {
        &self.head_fractions
    }

    pub fn to_group(
        &self,
        q_max: f64,
        h_max: f64,
        efficiency: f64,
    ) -> Result<PumpGroup, HydraulicsError> {
        PumpGroup::from_head_fractions(
            self.label.clone(),
            q_max,
            h_max,
            &self.head_fractions,
            efficiency,
        )
    }
}

/// One declared parameter study: the pump/system constants plus the
/// accumulator and efficiency values to sweep over.
///
/// Replaces the near-duplicate scripts that differed only in these
/// literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    name: String,
    q_max: f64,
    h_max: f64,
    static_head: f64,
    resistance: f64,
    #[serde(default)]
    q_shift: f64,
    #[serde(default = "default_samples")]
    samples: usize,
    /// Upper end of the flow-rate domain; defaults to twice the rated flow.
    #[serde(default)]
    domain_end: Option<f64>,
    #[serde(default = "default_volumes")]
    volumes: Vec<f64>,
    #[serde(default = "default_discharge_times")]
    discharge_times: Vec<f64>,
    #[serde(default = "default_efficiencies")]
    efficiencies: Vec<f64>,
    #[serde(default = "PumpGroupSpec::default_groups")]
    pump_groups: Vec<PumpGroupSpec>,
}

impl Scenario {
    pub fn new(
        name: &str,
        q_max: f64,
        h_max: f64,
        static_head: f64,
        resistance: f64,
    ) -> Scenario {
        Scenario {
            name: name.to_string(),
            q_max,
            h_max,
            static_head,
            resistance,
            q_shift: 0.0,
            samples: default_samples(),
            domain_end: None,
            volumes: default_volumes(),
            discharge_times: default_discharge_times(),
            efficiencies: default_efficiencies(),
            pump_groups: PumpGroupSpec::default_groups(),
        }
    }

    pub fn with_q_shift(mut self, q_shift: f64) -> Scenario {
        self.q_shift = q_shift;
        self
    }

    pub fn with_volumes(mut self, volumes: Vec<f64>) -> Scenario {
        self.volumes = volumes;
        self
    }

    pub fn with_discharge_times(mut self, discharge_times: Vec<f64>) -> Scenario {
        self.discharge_times = discharge_times;
        self
    }

    pub fn with_efficiencies(mut self, efficiencies: Vec<f64>) -> Scenario {
        self.efficiencies = efficiencies;
        self
    }

    pub fn with_pump_groups(mut self, pump_groups: Vec<PumpGroupSpec>) -> Scenario {
        self.pump_groups = pump_groups;
        self
    }

    pub fn with_domain_end(mut self, domain_end: f64) -> Scenario {
        self.domain_end = Some(domain_end);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn q_max(&self) -> f64 {
        self.q_max
    }

    pub fn h_max(&self) -> f64 {
        self.h_max
    }

    pub fn static_head(&self) -> f64 {
        self.static_head
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    pub fn q_shift(&self) -> f64 {
        self.q_shift
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn domain_end(&self) -> f64 {
        self.domain_end.unwrap_or(2.0 * self.q_max)
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    pub fn discharge_times(&self) -> &[f64] {
        &self.discharge_times
    }

    pub fn efficiencies(&self) -> &[f64] {
        &self.efficiencies
    }

    pub fn pump_groups(&self) -> &[PumpGroupSpec] {
        &self.pump_groups
    }

    /// The shared flow-rate domain, offset left by `q_shift` as in the
    /// original study.
    pub fn domain(&self) -> Result<Vec<f64>, CurveError> {
        let grid = linspace(0.0, self.domain_end(), self.samples)?;
        Ok(grid.into_iter().map(|q| q - self.q_shift).collect())
    }
}
