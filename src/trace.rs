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
//! Readers for the text trace formats written by the simulator.
//!
//! All readers preserve the on-disk row order and never sort or deduplicate.
//! A malformed line (wrong field count, unparsable field) aborts the whole
//! read with a [`ParseError`]; no partial parse is returned.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}:{line}: expected {expected} fields, found {found}", path.display())]
    WrongFieldCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{}:{line}: cannot parse field `{field}` from {token:?}", path.display())]
    BadField {
        path: PathBuf,
        line: usize,
        field: &'static str,
        token: String,
    },
    #[error("{}: missing column `{column}` in the header", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}: trace file is empty", path.display())]
    Empty { path: PathBuf },
}

/// Direction of a PDCP event.
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
pub enum PdcpAction {
    Tx,
    Rx,
}

/// One row of a PDCP statistics trace (e.g. `DlPdcpStats.txt`).
///
/// The delay is reported by the simulator in nanoseconds and is only present
/// for received packets; `Tx` rows carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PdcpRecord {
    pub action: PdcpAction,
    pub time: f64,
    pub cell_id: u32,
    pub rnti: u32,
    pub lcid: u32,
    pub packet_size: u64,
    pub delay: Option<u64>,
}

/// One row of a byte-counter table, projected to the columns used for rate
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct IntervalRecord {
    pub start: f64,
    pub end: f64,
    pub rx_bytes: u64,
}

const PDCP_FIELDS: usize = 7;

fn parse_field<T: FromStr>(
    token: &str,
    field: &'static str,
    path: &Path,
    line: usize,
) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::BadField {
        path: path.to_path_buf(),
        line,
        field,
        token: token.to_string(),
    })
}

/// Read a PDCP event-log trace.
///
/// Every line is whitespace-tokenized into the fixed fields
/// `[action, time, cellID, RNTI, LCID, packetSize, delay]`.
pub fn read_pdcp_stats(path: impl AsRef<Path>) -> Result<Vec<PdcpRecord>, ParseError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != PDCP_FIELDS {
            return Err(ParseError::WrongFieldCount {
                path: path.to_path_buf(),
                line: line_no,
                expected: PDCP_FIELDS,
                found: tokens.len(),
            });
        }
        let action = parse_field::<PdcpAction>(tokens[0], "action", path, line_no)?;
        let delay = match action {
            PdcpAction::Tx => None,
            PdcpAction::Rx => Some(parse_field(tokens[6], "delay", path, line_no)?),
        };
        records.push(PdcpRecord {
            action,
            time: parse_field(tokens[1], "time", path, line_no)?,
            cell_id: parse_field(tokens[2], "cellID", path, line_no)?,
            rnti: parse_field(tokens[3], "RNTI", path, line_no)?,
            lcid: parse_field(tokens[4], "LCID", path, line_no)?,
            packet_size: parse_field(tokens[5], "packetSize", path, line_no)?,
            delay,
        });
    }
    Ok(records)
}

/// Read a byte-counter table with named columns (e.g. `UlPdcpStats.txt`).
///
/// The simulator prefixes the header line with a `%` marker; it is stripped
/// in memory so the file on disk stays untouched. Rows are projected to the
/// `start`, `end` and `RxBytes` columns.
pub fn read_interval_table(path: impl AsRef<Path>) -> Result<Vec<IntervalRecord>, ParseError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();
    let header = lines.next().ok_or_else(|| ParseError::Empty {
        path: path.to_path_buf(),
    })?;
    let header = header.trim_start_matches('%').trim_start();
    let columns: Vec<&str> = header.split_whitespace().collect();
    let position = |column: &'static str| {
        columns
            .iter()
            .position(|c| *c == column)
            .ok_or_else(|| ParseError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
    };
    let start_col = position("start")?;
    let end_col = position("end")?;
    let bytes_col = position("RxBytes")?;

    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        // the header is line 1
        let line_no = idx + 2;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != columns.len() {
            return Err(ParseError::WrongFieldCount {
                path: path.to_path_buf(),
                line: line_no,
                expected: columns.len(),
                found: tokens.len(),
            });
        }
        records.push(IntervalRecord {
            start: parse_field(tokens[start_col], "start", path, line_no)?,
            end: parse_field(tokens[end_col], "end", path, line_no)?,
            rx_bytes: parse_field(tokens[bytes_col], "RxBytes", path, line_no)?,
        });
    }
    Ok(records)
}

/// Read a headerless whitespace-delimited numeric table (e.g. the TCP data
/// sink or RTT traces). Every row must have the same arity as the first.
pub fn read_matrix(path: impl AsRef<Path>) -> Result<Vec<Vec<f64>>, ParseError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let Some(first) = rows.first() {
            if tokens.len() != first.len() {
                return Err(ParseError::WrongFieldCount {
                    path: path.to_path_buf(),
                    line: line_no,
                    expected: first.len(),
                    found: tokens.len(),
                });
            }
        }
        rows.push(
            tokens
                .iter()
                .map(|token| parse_field(token, "value", path, line_no))
                .collect::<Result<_, _>>()?,
        );
    }
    Ok(rows)
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_tmp(name: &str, content: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("mmwave_eval_trace_{}_{name}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn pdcp_rows_and_delay() {
        let path = write_tmp(
            "pdcp",
            "Tx 0.1 1 1 3 1024 0\n\
             Rx 0.2 1 1 3 1024 140000\n\
             Tx 0.3 1 2 3 512 0\n\
             Rx 0.4 1 2 3 512 150000\n",
        );
        let records = read_pdcp_stats(&path).unwrap();
        assert_eq!(records.len(), 4);
        for r in &records {
            assert_eq!(r.delay.is_none(), r.action == PdcpAction::Tx);
        }
        assert_eq!(records[1].delay, Some(140000));
        assert_eq!(records[1].time, 0.2);
        assert_eq!(records[3].packet_size, 512);
    }

    #[test]
    fn pdcp_wrong_arity_is_fatal() {
        let path = write_tmp("pdcp_arity", "Tx 0.1 1 1 3 1024 0\nRx 0.2 1 1\n");
        let err = read_pdcp_stats(&path).unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongFieldCount { line: 2, expected: 7, found: 4, .. }
        ));
    }

    #[test]
    fn pdcp_bad_field_is_fatal() {
        let path = write_tmp("pdcp_field", "Rx abc 1 1 3 1024 140000\n");
        let err = read_pdcp_stats(&path).unwrap_err();
        assert!(matches!(err, ParseError::BadField { field: "time", .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_pdcp_stats("/nonexistent/DlPdcpStats.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }

    #[test]
    fn interval_table_strips_marker_in_memory() {
        let content = "% start\tend\tCellId\tRxBytes\n\
                       0.0\t0.25\t1\t1000\n\
                       0.25\t0.5\t1\t2000\n";
        let path = write_tmp("interval", content);
        let records = read_interval_table(&path).unwrap();
        assert_eq!(
            records,
            vec![
                IntervalRecord { start: 0.0, end: 0.25, rx_bytes: 1000 },
                IntervalRecord { start: 0.25, end: 0.5, rx_bytes: 2000 },
            ]
        );
        // non-destructive read: the marker is still on disk
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn interval_table_missing_column() {
        let path = write_tmp("interval_col", "% start end TxBytes\n0.0 0.25 1000\n");
        let err = read_interval_table(&path).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn { column: "RxBytes", .. }));
    }

    #[test]
    fn matrix_preserves_order() {
        let path = write_tmp("matrix", "0.5 1400\n0.25 1400\n0.75 700\n");
        let rows = read_matrix(&path).unwrap();
        assert_eq!(rows, vec![vec![0.5, 1400.0], vec![0.25, 1400.0], vec![0.75, 700.0]]);
    }

    #[test]
    fn matrix_ragged_rows_are_fatal() {
        let path = write_tmp("matrix_ragged", "0.5 1400\n0.25\n");
        let err = read_matrix(&path).unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongFieldCount { line: 2, expected: 2, found: 1, .. }
        ));
    }
}
