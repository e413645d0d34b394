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
//! Removal of generated trace and log artifacts between simulation runs.
//!
//! Deletion is best-effort: a file that cannot be removed is logged and
//! skipped, never fatal.

use std::{fs, path::Path};

use glob::glob;

/// Artifacts the simulator leaves behind after a run.
pub const ARTIFACT_PATTERNS: &[&str] = &["*.txt", "*.pcap"];
/// Run artifacts plus generated comparison figures.
pub const PLOT_PATTERNS: &[&str] = &["*.txt", "*.pcap", "*.png", "*.html"];

/// Subfolders of the scripts directory holding one trace directory per
/// experiment condition.
pub const LOG_FOLDERS: &[&str] = &["scripts/traces", "scripts/results", "scripts/moving"];

/// Delete all files directly inside `dir` matching one of the glob
/// `patterns`. Returns the number of files removed.
pub fn delete_matching(dir: impl AsRef<Path>, patterns: &[&str]) -> usize {
    let dir = dir.as_ref();
    let mut removed = 0;
    for pattern in patterns {
        let full_pattern = dir.join(pattern).display().to_string();
        let Ok(paths) = glob(&full_pattern) else {
            log::error!("invalid glob pattern {full_pattern:?}");
            continue;
        };
        for entry in paths {
            match entry {
                Ok(path) => match fs::remove_file(&path) {
                    Ok(()) => {
                        log::debug!("deleted {path:?}");
                        removed += 1;
                    }
                    Err(e) => log::error!("failed to delete {path:?}: {e}"),
                },
                Err(e) => log::error!("failed to read a glob match: {e}"),
            }
        }
    }
    removed
}

/// Clean run artifacts below `root`: the root itself, the scripts folder,
/// and every condition subdirectory of the known log folders. Returns the
/// number of files removed.
pub fn clean_workspace(root: impl AsRef<Path>, patterns: &[&str]) -> usize {
    let root = root.as_ref();
    let mut removed = delete_matching(root, patterns);
    removed += delete_matching(root.join("scripts"), patterns);

    for log_folder in LOG_FOLDERS {
        let dir = root.join(log_folder);
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                removed += delete_matching(&path, patterns);
            }
        }
    }
    removed
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn setup(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("mmwave_eval_cleanup_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        let trace_dir = root.join("scripts/traces/TcpCubic");
        fs::create_dir_all(&trace_dir).unwrap();
        fs::write(root.join("mmWave-tcp-data-0.txt"), "0.0 1400\n").unwrap();
        fs::write(root.join("run.pcap"), "").unwrap();
        fs::write(root.join("scripts").join("DlPdcpStats.txt"), "").unwrap();
        fs::write(trace_dir.join("mmWave-tcp-rtt-0.txt"), "").unwrap();
        fs::write(trace_dir.join("keep.json"), "{}").unwrap();
        root
    }

    #[test]
    fn removes_only_matching_files() {
        let root = setup("match");
        let removed = clean_workspace(&root, ARTIFACT_PATTERNS);
        assert_eq!(removed, 4);
        // the metadata file survives
        assert!(root.join("scripts/traces/TcpCubic/keep.json").is_file());
        assert!(!root.join("scripts/traces/TcpCubic/mmWave-tcp-rtt-0.txt").exists());
    }

    #[test]
    fn missing_folders_are_skipped() {
        let root = std::env::temp_dir().join(format!("mmwave_eval_cleanup_none_{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        assert_eq!(clean_workspace(&root, ARTIFACT_PATTERNS), 0);
    }
}
