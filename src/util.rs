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
//! Utility module collection of functions

use std::path::{Path, PathBuf};

use crate::experiments::CongestionControl;

/// TCP data sink trace of the first UE, one `(time, bytes)` row per received
/// segment.
pub const DATA_SINK_FILE: &str = "mmWave-tcp-data-0.txt";
/// Downlink PDCP event log of the whole run.
pub const PDCP_STATS_FILE: &str = "DlPdcpStats.txt";

pub fn init_logging() {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();
}

/// Trace directory of one congestion-control variant below the trace root.
pub fn trace_dir(root: impl AsRef<Path>, cong_control: CongestionControl) -> PathBuf {
    root.as_ref().join(cong_control.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trace_dir_uses_label_as_folder() {
        assert_eq!(
            trace_dir("scripts/traces", CongestionControl::Tcp5G),
            PathBuf::from("scripts/traces/Tcp5G")
        );
    }
}
