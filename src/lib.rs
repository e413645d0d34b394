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
//! Library for automating LTE/mmWave TCP simulation experiments and
//! analyzing the trace files they produce.
//!
//! The external simulator is launched as a subprocess (one run per
//! congestion-control variant) and writes text traces to disk; this crate
//! parses those traces, aggregates them into time-bucketed throughput and
//! RTT series, and renders a comparison figure across variants.

pub mod cleanup;
pub mod comparison;
pub mod experiments;
pub mod timeseries;
pub mod trace;
pub mod util;

pub mod prelude {
    pub use super::{
        comparison::{Attribute, ComparisonConfig},
        experiments::{CongestionControl, ExperimentConfig, RetryPolicy},
        timeseries::{Point, Series},
        trace::ParseError,
    };
}
