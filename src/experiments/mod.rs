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
//! Module describing and running simulation experiments for the different
//! congestion-control variants.

pub mod runner;

pub use runner::*;

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// TCP congestion-control variants understood by the simulator. The string
/// form doubles as the per-condition trace directory name and the plot
/// legend label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
pub enum CongestionControl {
    TcpNewReno,
    TcpCubic,
    TcpIllinois,
    TcpVegas,
    Tcp5G,
}

/// Parameters of one batch of simulation runs, mapping 1:1 to the CLI of the
/// `mmwave-tcp-multiple-ue` simulator program.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExperimentConfig {
    /// One independent simulator process is launched per variant.
    pub cong_controls: Vec<CongestionControl>,
    /// Directory containing the ns-3 `waf` build wrapper.
    pub waf_dir: PathBuf,
    /// Simulator program to hand to `waf --run`.
    pub program: String,
    /// Root folder the simulator writes its traces to, one subdirectory per
    /// congestion-control variant.
    pub result_root: PathBuf,
    pub num_ues: u32,
    pub num_enbs: u32,
    pub num_packets: u32,
    /// Enable the simulator's own logging output.
    pub log: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            cong_controls: vec![CongestionControl::TcpIllinois, CongestionControl::TcpVegas],
            waf_dir: PathBuf::from("."),
            program: "mmwave-tcp-multiple-ue".to_string(),
            result_root: PathBuf::from("scripts/traces/"),
            num_ues: 1,
            num_enbs: 1,
            num_packets: 1000,
            log: false,
        }
    }
}

/// Bounded-attempt retry with exponential backoff for failed simulation
/// runs.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_backoff: Duration,
    pub factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
            factor: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Backoff to wait before retry number `retry` (0-based).
    pub fn backoff(&self, retry: usize) -> Duration {
        self.initial_backoff.mul_f64(self.factor.powi(retry as i32))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn cong_control_label_round_trip() {
        for cc in CongestionControl::iter() {
            assert_eq!(CongestionControl::from_str(&cc.to_string()), Ok(cc));
        }
        assert_eq!(CongestionControl::Tcp5G.to_string(), "Tcp5G");
        assert!(CongestionControl::from_str("TcpFancy").is_err());
    }

    #[test]
    fn backoff_grows_exponentially() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_secs(2));
        assert_eq!(policy.backoff(1), Duration::from_secs(4));
        assert_eq!(policy.backoff(2), Duration::from_secs(8));
    }
}
