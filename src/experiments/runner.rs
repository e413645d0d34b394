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
//! Module that launches one simulator process per congestion-control variant
//! and waits for all of them, retrying failed runs with bounded backoff.
//!
//! The simulator is an opaque collaborator: it is only invoked through
//! `./waf --run "..."` and communicates exclusively through the trace files
//! it writes. There is no coordination between the runs beyond all of them
//! having to exit before the analysis starts.

use std::process::{ExitStatus, Stdio};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::process::Command;

use super::{CongestionControl, ExperimentConfig, RetryPolicy};

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Join Error: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("simulation for {cong_control} failed after {attempts} attempts (last exit status: {last_status:?})")]
    Failed {
        cong_control: CongestionControl,
        attempts: usize,
        last_status: Option<ExitStatus>,
    },
    #[error("interrupted by the operator")]
    Interrupted,
}

/// The `--run` argument handed to `waf` for one variant.
pub fn simulation_args(config: &ExperimentConfig, cong_control: CongestionControl) -> Vec<String> {
    vec![
        "--run".to_string(),
        format!(
            "{} --CongControl={cong_control} --ResultFolder={} --numUEs={} --numEnbs={} --numPackets={} --log={}",
            config.program,
            config.result_root.display(),
            config.num_ues,
            config.num_enbs,
            config.num_packets,
            config.log,
        ),
    ]
}

fn simulation_command(config: &ExperimentConfig, cong_control: CongestionControl) -> Command {
    let mut cmd = Command::new(config.waf_dir.join("waf"));
    cmd.args(simulation_args(config, cong_control))
        .current_dir(&config.waf_dir)
        .stdout(Stdio::null())
        .kill_on_drop(true);
    cmd
}

/// Run the simulation for a single congestion-control variant, retrying
/// failed runs according to `policy`. A Ctrl-C kills the child and returns
/// [`RunnerError::Interrupted`].
pub async fn run_one(
    config: &ExperimentConfig,
    policy: &RetryPolicy,
    cong_control: CongestionControl,
) -> Result<(), RunnerError> {
    let mut last_status = None;
    for attempt in 0..policy.max_attempts {
        if attempt > 0 {
            let backoff = policy.backoff(attempt - 1);
            log::debug!(
                "retrying {cong_control} in {backoff:?} (attempt {}/{})",
                attempt + 1,
                policy.max_attempts
            );
            tokio::time::sleep(backoff).await;
        }
        log::debug!("launching the simulator for {cong_control}");
        let mut child = simulation_command(config, cong_control).spawn()?;
        tokio::select! {
            status = child.wait() => {
                let status = status?;
                if status.success() {
                    log::info!("simulation for {cong_control} finished");
                    return Ok(());
                }
                log::error!("simulation for {cong_control} exited with {status}");
                last_status = Some(status);
            }
            _ = tokio::signal::ctrl_c() => {
                log::error!("interrupt received, killing the {cong_control} run");
                child.kill().await?;
                return Err(RunnerError::Interrupted);
            }
        }
    }
    Err(RunnerError::Failed {
        cong_control,
        attempts: policy.max_attempts,
        last_status,
    })
}

/// Launch all configured variants concurrently and wait for every run to
/// finish, even when some of them fail; the first error is reported only
/// after all runs have completed, so no simulator child is left detached.
pub async fn run_all(config: &ExperimentConfig, policy: &RetryPolicy) -> Result<(), RunnerError> {
    let bar = ProgressBar::new(config.cong_controls.len() as u64);
    bar.set_style(ProgressStyle::with_template("{wide_bar} {pos}/{len} runs, time: {elapsed}").unwrap());
    bar.tick();

    let jobs = config
        .cong_controls
        .iter()
        .copied()
        .map(|cong_control| {
            let config = config.clone();
            let policy = *policy;
            tokio::spawn(async move { run_one(&config, &policy, cong_control).await })
        })
        .collect::<Vec<_>>();

    let mut first_error = None;
    for job in jobs {
        match job.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                first_error.get_or_insert(e);
            }
            Err(e) => {
                first_error.get_or_insert(e.into());
            }
        }
        bar.inc(1);
    }
    bar.finish();

    match first_error {
        None => Ok(()),
        Some(e) => Err(e),
    }
}
