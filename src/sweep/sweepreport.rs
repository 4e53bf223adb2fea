use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::math::intersection::intersectionfinder::Intersection;
use crate::sweep::sweeperror::SweepError;

/// One row of the results table: a parameter combination and the operating
/// points it produced. A `None` flow rate means the curves never crossed
/// within the sampled domain.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRecord {
    group: String,
    volume: f64,
    discharge_time: f64,
    efficiency: f64,
    accumulator_shift: f64,
    operating_flow: Option<f64>,
    operating_head: Option<f64>,
    shifted_operating_flow: Option<f64>,
    shifted_operating_head: Option<f64>,
}

impl SweepRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        group: &str,
        volume: f64,
        discharge_time: f64,
        efficiency: f64,
        accumulator_shift: f64,
        operating: Option<Intersection>,
        shifted_operating: Option<Intersection>,
    ) -> SweepRecord {
        SweepRecord {
            group: group.to_string(),
            volume,
            discharge_time,
            efficiency,
            accumulator_shift,
            operating_flow: operating.map(|p| p.x()),
            operating_head: operating.map(|p| p.y()),
            shifted_operating_flow: shifted_operating.map(|p| p.x()),
            shifted_operating_head: shifted_operating.map(|p| p.y()),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn discharge_time(&self) -> f64 {
        self.discharge_time
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn accumulator_shift(&self) -> f64 {
        self.accumulator_shift
    }

    pub fn operating_flow(&self) -> Option<f64> {
        self.operating_flow
    }

    pub fn shifted_operating_flow(&self) -> Option<f64> {
        self.shifted_operating_flow
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    scenario: String,
    generated_at: DateTime<Utc>,
    records: Vec<SweepRecord>,
}

impl SweepReport {
    pub fn new(scenario: &str, records: Vec<SweepRecord>) -> SweepReport {
        SweepReport {
            scenario: scenario.to_string(),
            generated_at: Utc::now(),
            records,
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn records(&self) -> &[SweepRecord] {
        &self.records
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SweepError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn written_report_carries_records_and_nulls() {
        let records = vec![
            SweepRecord::new(
                "Single P.",
                5.0,
                2.0,
                1.0,
                2.5,
                Some(Intersection::new(80.0, 158.0)),
                Some(Intersection::new(84.0, 171.0)),
            ),
            // Curves that never cross stay in the table as nulls.
            SweepRecord::new("100%+100%", 0.0, 1.0, 1.0, 0.0, None, None),
        ];
        let report = SweepReport::new("unit", records);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unit_results.json");
        report.write_json(&path).unwrap();

        let file = File::open(&path).unwrap();
        let value: serde_json::Value = serde_json::from_reader(file).unwrap();
        assert_eq!(value["scenario"], "unit");
        assert!(value["generated_at"].is_string());

        let rows = value["records"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["group"], "Single P.");
        assert_eq!(rows[0]["volume"], 5.0);
        assert_eq!(rows[0]["accumulator_shift"], 2.5);
        assert_eq!(rows[0]["operating_flow"], 80.0);
        assert_eq!(rows[0]["shifted_operating_head"], 171.0);
        assert!(rows[1]["operating_flow"].is_null());
        assert!(rows[1]["shifted_operating_flow"].is_null());
    }
}
