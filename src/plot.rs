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
use std::{fs, path::PathBuf, process, str::FromStr};

use clap::Parser;

use mmwave_eval::{
    comparison::{self, Attribute, ComparisonConfig},
    experiments::CongestionControl,
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Overwrite the input path for traces, one folder per variant.
    #[arg(short, long, default_value = "./scripts/traces/")]
    trace_root: String,
    /// Overwrite the output path for the comparison figure.
    #[arg(short, long, default_value = "./scripts/")]
    output_path: String,
    /// Attributes to chart, one panel each.
    #[arg(short, long, value_delimiter = ',', default_value = "throughput,rtt")]
    attributes: Vec<String>,
    /// Congestion-control variants to compare.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "TcpIllinois,TcpVegas,TcpCubic,Tcp5G"
    )]
    cong_control: Vec<String>,
    /// Bucket width in seconds for rate smoothing and delay sampling.
    #[arg(long, default_value_t = 0.075)]
    time_interval: f64,
    /// Filename of the generated figure.
    #[arg(long, default_value = "comparison.html")]
    graph_filename: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();

    let args = Args::parse();
    let trace_root = PathBuf::from(&args.trace_root);
    if !trace_root.exists() {
        log::error!("Could not read traces in {trace_root:?}!");
        process::exit(1)
    }
    fs::create_dir_all(&args.output_path)?;

    let config = ComparisonConfig {
        trace_root,
        attributes: args
            .attributes
            .iter()
            .map(|s| Attribute::from_str(s))
            .collect::<Result<Vec<_>, _>>()?,
        cong_controls: args
            .cong_control
            .iter()
            .map(|s| CongestionControl::from_str(s))
            .collect::<Result<Vec<_>, _>>()?,
        time_interval: args.time_interval,
        graph_filename: args.graph_filename,
    };

    let panels = comparison::collect_panels(&config)?;
    for panel in &panels {
        log::info!(
            "{}: {} of {} conditions have traces",
            panel.attribute,
            panel.series.len(),
            config.cong_controls.len()
        );
    }
    let figure = comparison::render(&config, &panels, &args.output_path)?;
    log::info!("wrote comparison figure to {figure:?}");

    Ok(())
}
