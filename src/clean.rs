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
use clap::Parser;

use mmwave_eval::{cleanup, util};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Workspace root to clean.
    #[arg(short, long, default_value = ".")]
    root: String,
    /// Also remove generated comparison figures.
    #[arg(long)]
    plots: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();

    let args = Args::parse();
    let patterns = if args.plots {
        cleanup::PLOT_PATTERNS
    } else {
        cleanup::ARTIFACT_PATTERNS
    };
    let removed = cleanup::clean_workspace(&args.root, patterns);
    log::info!("removed {removed} artifact files below {:?}", args.root);

    Ok(())
}
