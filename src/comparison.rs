// mmwave-eval: Experiment Automation and Trace Analysis for mmWave TCP Simulations
// Copyright (C) 2025-2026 The mmwave-eval Authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Comparison of aggregated trace series across congestion-control
//! variants, rendered as one multi-panel figure.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use plotly::{
    common::{Marker, MarkerSymbol, Mode},
    layout::{Axis, GridPattern, Layout, LayoutGrid},
    Plot, Scatter,
};
use serde::Serialize;

use crate::{
    experiments::CongestionControl,
    timeseries::{self, Series},
    trace::{self, ParseError, PdcpAction},
    util,
};

/// Trace attributes that can be charted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Attribute {
    Throughput,
    Rtt,
}

impl Attribute {
    pub fn unit(&self) -> &'static str {
        match self {
            Attribute::Throughput => "Mb/s",
            Attribute::Rtt => "ms",
        }
    }
}

/// Explicit per-invocation configuration of the comparison; there are no
/// shared defaults across calls.
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// Directory holding one trace folder per congestion-control variant.
    pub trace_root: PathBuf,
    pub attributes: Vec<Attribute>,
    pub cong_controls: Vec<CongestionControl>,
    /// Bucket width in seconds for rate smoothing and delay sampling.
    pub time_interval: f64,
    pub graph_filename: String,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            trace_root: PathBuf::from("scripts/traces"),
            attributes: vec![Attribute::Throughput, Attribute::Rtt],
            cong_controls: vec![
                CongestionControl::TcpIllinois,
                CongestionControl::TcpVegas,
                CongestionControl::TcpCubic,
                CongestionControl::Tcp5G,
            ],
            time_interval: 0.075,
            graph_filename: "comparison.html".to_string(),
        }
    }
}

/// One sub-plot of the comparison figure: a single attribute with one
/// aggregated series per condition that had a readable trace file.
#[derive(Debug, Clone)]
pub struct Panel {
    pub attribute: Attribute,
    pub series: Vec<(CongestionControl, Series)>,
}

/// Aggregate the traces of all configured conditions into one [`Panel`] per
/// attribute. Conditions whose trace file is absent are skipped; a present
/// but malformed file is an error.
pub fn collect_panels(config: &ComparisonConfig) -> Result<Vec<Panel>, ParseError> {
    let mut panels = Vec::new();
    for &attribute in &config.attributes {
        let mut series = Vec::new();
        for &cong_control in &config.cong_controls {
            if let Some(s) = attribute_series(config, cong_control, attribute)? {
                series.push((cong_control, s));
            }
        }
        panels.push(Panel { attribute, series });
    }
    Ok(panels)
}

fn attribute_series(
    config: &ComparisonConfig,
    cong_control: CongestionControl,
    attribute: Attribute,
) -> Result<Option<Series>, ParseError> {
    let dir = util::trace_dir(&config.trace_root, cong_control);
    match attribute {
        Attribute::Throughput => {
            let file = dir.join(util::DATA_SINK_FILE);
            if !file.is_file() {
                log::debug!("no data sink trace for {cong_control}, skipping");
                return Ok(None);
            }
            let matrix = trace::read_matrix(&file)?;
            if matrix.iter().any(|row| row.len() < 2) {
                return Err(ParseError::WrongFieldCount {
                    path: file,
                    line: 1,
                    expected: 2,
                    found: matrix.first().map(Vec::len).unwrap_or(0),
                });
            }
            let events = matrix.iter().map(|row| (row[0], row[1])).collect_vec();
            Ok(Some(timeseries::smoothed_rate(&events, config.time_interval)))
        }
        Attribute::Rtt => {
            let file = dir.join(util::PDCP_STATS_FILE);
            if !file.is_file() {
                log::debug!("no PDCP stats for {cong_control}, skipping");
                return Ok(None);
            }
            let records = trace::read_pdcp_stats(&file)?;
            // received packets only; the logged delay is in nanoseconds
            let delays = records
                .iter()
                .filter_map(|r| match (r.action, r.delay) {
                    (PdcpAction::Rx, Some(delay)) => Some((r.time, delay as f64 / 1e6)),
                    _ => None,
                })
                .collect_vec();
            // a run that never saw an Rx event still renders, as an empty
            // series
            if delays.is_empty() {
                return Ok(Some(Series::new()));
            }
            Ok(Some(timeseries::sample_mean(&delays, config.time_interval)))
        }
    }
}

#[derive(Debug, Serialize)]
struct SeriesRecord<'a> {
    attribute: &'a str,
    cong_control: CongestionControl,
    time: f64,
    value: f64,
}

/// Render the panels into a single figure at
/// `<base_dir>/<graph_filename>`, with the bucketed series exported as CSV
/// next to it. Returns the path of the figure.
pub fn render(
    config: &ComparisonConfig,
    panels: &[Panel],
    base_dir: impl AsRef<Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = base_dir.as_ref();
    let markers = [
        MarkerSymbol::Square,
        MarkerSymbol::Pentagon,
        MarkerSymbol::Cross,
        MarkerSymbol::Star,
        MarkerSymbol::Hexagon,
    ];

    // write raw data next to the figure
    let csv_path = base_dir.join(format!("{}.csv", config.graph_filename));
    let mut csv = csv::Writer::from_path(&csv_path)?;
    for panel in panels {
        let attribute = panel.attribute.to_string();
        for (cong_control, series) in &panel.series {
            for point in series {
                csv.serialize(SeriesRecord {
                    attribute: &attribute,
                    cong_control: *cong_control,
                    time: point.time,
                    value: point.value,
                })?;
            }
        }
    }
    csv.flush()?;

    let mut plot = Plot::new();
    for (panel_idx, panel) in panels.iter().enumerate() {
        let (x_axis, y_axis) = if panel_idx == 0 {
            ("x".to_string(), "y".to_string())
        } else {
            (format!("x{}", panel_idx + 1), format!("y{}", panel_idx + 1))
        };
        for (k, (cong_control, series)) in panel.series.iter().enumerate() {
            let scatter = Scatter::new(
                series.iter().map(|p| p.time).collect_vec(),
                series.iter().map(|p| p.value).collect_vec(),
            )
            .name(cong_control.to_string())
            .mode(Mode::Markers)
            .marker(Marker::new().symbol(markers[k % markers.len()].clone()))
            .x_axis(&x_axis)
            .y_axis(&y_axis);
            plot.add_trace(scatter);
        }
    }

    let mut layout = Layout::new()
        .grid(
            LayoutGrid::new()
                .rows(panels.len().max(1))
                .columns(1)
                .pattern(GridPattern::Independent),
        )
        .x_axis(Axis::new().title("Time(s)".to_string()));
    for (panel_idx, panel) in panels.iter().enumerate() {
        let axis = Axis::new().title(panel.attribute.unit().to_string());
        layout = match panel_idx {
            0 => layout.y_axis(axis),
            1 => layout.y_axis2(axis),
            2 => layout.y_axis3(axis),
            _ => layout.y_axis4(axis),
        };
    }
    plot.set_layout(layout);

    let output = base_dir.join(&config.graph_filename);
    log::debug!("Plotting {output:?}");
    plot.write_html(&output);
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn setup(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "mmwave_eval_comparison_{}_{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        // only TcpCubic produced traces; the other conditions stay absent
        let cubic = root.join("traces/TcpCubic");
        fs::create_dir_all(&cubic).unwrap();
        fs::write(
            cubic.join(util::DATA_SINK_FILE),
            "0.01 1400\n0.02 1400\n0.03 1400\n0.2 1400\n0.3 1400\n",
        )
        .unwrap();
        fs::write(
            cubic.join(util::PDCP_STATS_FILE),
            "Tx 0.01 1 1 3 1400 0\nRx 0.02 1 1 3 1400 2000000\nRx 0.03 1 1 3 1400 4000000\nRx 0.5 1 1 3 1400 1000000\n",
        )
        .unwrap();
        root
    }

    fn config(root: &Path) -> ComparisonConfig {
        ComparisonConfig {
            trace_root: root.join("traces"),
            time_interval: 0.075,
            ..Default::default()
        }
    }

    #[test]
    fn absent_conditions_are_skipped() {
        let root = setup("skip");
        let panels = collect_panels(&config(&root)).unwrap();
        assert_eq!(panels.len(), 2);
        for panel in &panels {
            assert_eq!(panel.series.len(), 1);
            assert_eq!(panel.series[0].0, CongestionControl::TcpCubic);
        }
    }

    #[test]
    fn rtt_panel_averages_rx_delays_in_ms() {
        let root = setup("rtt");
        let panels = collect_panels(&config(&root)).unwrap();
        let rtt = panels.iter().find(|p| p.attribute == Attribute::Rtt).unwrap();
        let series = &rtt.series[0].1;
        // the two Rx delays in the first bucket average to 3ms; Tx rows are
        // excluded
        assert_eq!(series[0].time, 0.0);
        assert_eq!(series[0].value, 3.0);
    }

    #[test]
    fn tx_only_pdcp_yields_empty_rtt_series() {
        let root = std::env::temp_dir().join(format!(
            "mmwave_eval_comparison_{}_tx_only",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        let vegas = root.join("traces/TcpVegas");
        fs::create_dir_all(&vegas).unwrap();
        fs::write(
            vegas.join(util::PDCP_STATS_FILE),
            "Tx 0.01 1 1 3 1400 0\nTx 0.02 1 1 3 1400 0\n",
        )
        .unwrap();
        let panels = collect_panels(&config(&root)).unwrap();
        let rtt = panels.iter().find(|p| p.attribute == Attribute::Rtt).unwrap();
        assert_eq!(rtt.series.len(), 1);
        let (cong_control, series) = &rtt.series[0];
        assert_eq!(*cong_control, CongestionControl::TcpVegas);
        assert!(series.is_empty());
    }

    #[test]
    fn render_writes_figure_and_csv() {
        let root = setup("render");
        let config = config(&root);
        let panels = collect_panels(&config).unwrap();
        let out_dir = root.join("out");
        fs::create_dir_all(&out_dir).unwrap();
        let figure = render(&config, &panels, &out_dir).unwrap();
        assert_eq!(figure, out_dir.join("comparison.html"));
        assert!(figure.is_file());
        assert!(out_dir.join("comparison.html.csv").is_file());
    }
}
