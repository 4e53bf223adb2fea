use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::math::curve::sampledcurve::SampledCurve;
use crate::plot::ploterror::PlotError;

#[derive(Debug, Clone)]
pub struct ChartSeries {
    label: String,
    samples: SampledCurve,
}

impl ChartSeries {
    pub fn new(label: &str, samples: SampledCurve) -> ChartSeries {
        ChartSeries { label: label.to_string(), samples }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn samples(&self) -> &SampledCurve {
        &self.samples
    }
}

/// An operating point highlighted on the chart.
#[derive(Debug, Clone)]
pub struct ChartMarker {
    label: String,
    x: f64,
    y: f64,
}

impl ChartMarker {
    pub fn new(label: &str, x: f64, y: f64) -> ChartMarker {
        ChartMarker { label: label.to_string(), x, y }
    }
}

#[derive(Debug, Clone)]
pub struct ChartPanel {
    title: String,
    series: Vec<ChartSeries>,
    markers: Vec<ChartMarker>,
}

impl ChartPanel {
    pub fn new(title: &str, series: Vec<ChartSeries>, markers: Vec<ChartMarker>) -> ChartPanel {
        ChartPanel { title: title.to_string(), series, markers }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    pub fn markers(&self) -> &[ChartMarker] {
        &self.markers
    }

    fn ranges(&self) -> Result<(Range<f64>, Range<f64>), PlotError> {
        if self.series.is_empty() {
            return Err(PlotError::EmptyChart(format!(
                "panel '{}' has no series",
                self.title
            )));
        }
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for series in &self.series {
            x_min = x_min.min(series.samples.min_x());
            x_max = x_max.max(series.samples.max_x());
            y_max = y_max.max(series.samples.max_y());
        }
        if x_max <= x_min {
            x_max = x_min + 1.0;
        }
        if y_max <= 0.0 {
            y_max = 1.0;
        }
        Ok((x_min..x_max, 0.0..y_max * 1.05))
    }
}

/// Renders panels to PNG files. Styling is intentionally plain; the
/// numbers live in the sweep report, the figures are for eyeballing.
pub struct ChartWriter {
    width: u32,
    height: u32,
}

impl ChartWriter {
    pub fn new(width: u32, height: u32) -> ChartWriter {
        ChartWriter { width, height }
    }

    pub fn write(&self, path: &Path, panel: &ChartPanel) -> Result<(), PlotError> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend)?;
        draw_panel(&root, panel)?;
        root.present().map_err(backend)?;
        Ok(())
    }

    pub fn write_grid(
        &self,
        path: &Path,
        title: &str,
        panels: &[ChartPanel],
        columns: usize,
    ) -> Result<(), PlotError> {
        if panels.is_empty() {
            return Err(PlotError::EmptyChart("grid with no panels".to_string()));
        }
        let columns = columns.clamp(1, panels.len());
        let rows = panels.len().div_ceil(columns);

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend)?;
        let titled = root.titled(title, ("sans-serif", 24)).map_err(backend)?;
        let cells = titled.split_evenly((rows, columns));
        for (panel, cell) in panels.iter().zip(cells.iter()) {
            draw_panel(cell, panel)?;
        }
        root.present().map_err(backend)?;
        Ok(())
    }
}

impl Default for ChartWriter {
    fn default() -> ChartWriter {
        ChartWriter::new(900, 900)
    }
}

fn backend<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Backend(err.to_string())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &ChartPanel,
) -> Result<(), PlotError> {
    let (x_range, y_range) = panel.ranges()?;
    let label_offset = (y_range.end - y_range.start) * 0.02;

    let mut builder = ChartBuilder::on(area);
    builder.margin(10).x_label_area_size(40).y_label_area_size(50);
    if !panel.title.is_empty() {
        builder.caption(&panel.title, ("sans-serif", 16));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(backend)?;
    chart
        .configure_mesh()
        .x_desc("Flow Rate (m^3/h)")
        .y_desc("Head (m)")
        .draw()
        .map_err(backend)?;

    for (index, series) in panel.series.iter().enumerate() {
        let style = Palette99::pick(index).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                series.samples.points().iter().map(|pt| (pt.x(), pt.y())),
                style,
            ))
            .map_err(backend)?
            .label(series.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], style));
    }

    for marker in &panel.markers {
        chart
            .draw_series(std::iter::once(Circle::new(
                (marker.x, marker.y),
                4,
                GREEN.filled(),
            )))
            .map_err(backend)?;
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{} Q={:.2}", marker.label, marker.x),
                (marker.x, marker.y + label_offset),
                ("sans-serif", 12).into_font(),
            )))
            .map_err(backend)?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(backend)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::math::curve::sampledcurve::SamplePoint;

    use super::*;

    fn series(label: &str, values: &[(f64, f64)]) -> ChartSeries {
        let points = values.iter().map(|&(x, y)| SamplePoint::new(x, y)).collect();
        ChartSeries::new(label, SampledCurve::new(points).unwrap())
    }

    #[test]
    fn ranges_span_all_series() {
        let panel = ChartPanel::new(
            "test",
            vec![
                series("a", &[(0.0, 10.0), (5.0, 40.0)]),
                series("b", &[(-2.0, 5.0), (8.0, 20.0)]),
            ],
            Vec::new(),
        );
        let (x_range, y_range) = panel.ranges().unwrap();
        assert_eq!(x_range, -2.0..8.0);
        assert_eq!(y_range, 0.0..42.0);
    }

    #[test]
    fn empty_panel_is_an_error() {
        let panel = ChartPanel::new("empty", Vec::new(), Vec::new());
        assert!(matches!(panel.ranges(), Err(PlotError::EmptyChart(_))));
    }
}
