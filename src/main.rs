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
use std::{fs, path::PathBuf, str::FromStr};

use clap::Parser;

use mmwave_eval::{
    cleanup,
    experiments::{run_all, CongestionControl, ExperimentConfig, RetryPolicy},
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Congestion-control variants to simulate, one simulator process each.
    #[arg(short, long, value_delimiter = ',', default_value = "TcpIllinois,TcpVegas")]
    cong_control: Vec<String>,
    /// Directory containing the ns-3 `waf` build wrapper.
    #[arg(short, long, default_value = ".")]
    waf_dir: String,
    /// Overwrite the output root for simulator traces.
    #[arg(short, long, default_value = "scripts/traces/")]
    result_root: String,
    /// Number of UEs to simulate.
    #[arg(long, default_value_t = 1)]
    num_ues: u32,
    /// Number of EnodeBs to simulate.
    #[arg(long, default_value_t = 1)]
    num_enbs: u32,
    /// Number of packets to send per UE.
    #[arg(long, default_value_t = 1000)]
    num_packets: u32,
    /// Enable the simulator's own logging.
    #[arg(long)]
    log: bool,
    /// Maximum attempts per run before giving up.
    #[arg(long, default_value_t = 3)]
    max_attempts: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();

    let args = Args::parse();
    let cong_controls = args
        .cong_control
        .iter()
        .map(|s| CongestionControl::from_str(s))
        .collect::<Result<Vec<_>, _>>()?;

    let config = ExperimentConfig {
        cong_controls,
        waf_dir: PathBuf::from(args.waf_dir),
        result_root: PathBuf::from(args.result_root),
        num_ues: args.num_ues,
        num_enbs: args.num_enbs,
        num_packets: args.num_packets,
        log: args.log,
        ..Default::default()
    };
    let policy = RetryPolicy {
        max_attempts: args.max_attempts,
        ..Default::default()
    };

    // give every variant a clean trace directory before launching
    for cong_control in &config.cong_controls {
        let dir = util::trace_dir(&config.result_root, *cong_control);
        fs::create_dir_all(&dir)?;
        let removed = cleanup::delete_matching(&dir, cleanup::ARTIFACT_PATTERNS);
        if removed > 0 {
            log::info!("removed {removed} stale artifacts from {dir:?}");
        }
    }

    // keep a record of the run parameters next to the traces
    let meta_path = config.result_root.join(format!(
        "run_{}.json",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    ));
    fs::write(&meta_path, serde_json::to_string_pretty(&config)?)?;

    run_all(&config, &policy).await?;
    log::info!("all simulation runs finished");

    Ok(())
}
