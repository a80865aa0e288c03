// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GPU telemetry samples and query-output parsing

use serde::{Deserialize, Serialize};

use crate::error::GpuError;

/// Fields requested from the monitoring tool, in this exact order.
pub const QUERY_FIELDS: &str = "index,memory.used,utilization.gpu";

/// Output format requested from the monitoring tool.
pub const QUERY_FORMAT: &str = "csv,noheader,nounits";

/// One device row of a telemetry snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuSample {
    /// Global device index assigned by the driver
    pub index: u32,
    /// Memory in use, MiB
    pub memory_used_mib: u64,
    /// Utilization, percent
    pub utilization_pct: u32,
}

impl GpuSample {
    pub fn new(index: u32, memory_used_mib: u64, utilization_pct: u32) -> Self {
        Self {
            index,
            memory_used_mib,
            utilization_pct,
        }
    }

    /// Whether both readings are strictly below the thresholds
    pub fn is_idle(&self, mem_threshold_mib: u64, util_threshold_pct: u32) -> bool {
        self.memory_used_mib < mem_threshold_mib && self.utilization_pct < util_threshold_pct
    }
}

/// Parse `index, memory.used, utilization.gpu` rows.
///
/// Blank lines are skipped. Any row without exactly three integer fields
/// fails the whole parse.
pub fn parse_query_output(output: &str) -> Result<Vec<GpuSample>, GpuError> {
    output
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Result<GpuSample, GpuError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [index, memory, utilization] = fields.as_slice() else {
        return Err(GpuError::Parse {
            line: line.to_string(),
            reason: format!("expected 3 fields, found {}", fields.len()),
        });
    };

    let parse_err = |field: &str, e: std::num::ParseIntError| GpuError::Parse {
        line: line.to_string(),
        reason: format!("{}: {}", field, e),
    };

    Ok(GpuSample {
        index: index.parse().map_err(|e| parse_err("index", e))?,
        memory_used_mib: memory.parse().map_err(|e| parse_err("memory.used", e))?,
        utilization_pct: utilization
            .parse()
            .map_err(|e| parse_err("utilization.gpu", e))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let samples = parse_query_output("0, 500, 5\n1, 2000, 50\n2, 100, 2\n").unwrap();
        assert_eq!(
            samples,
            vec![
                GpuSample::new(0, 500, 5),
                GpuSample::new(1, 2000, 50),
                GpuSample::new(2, 100, 2),
            ]
        );
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let samples = parse_query_output("\n3, 50, 1\n\n").unwrap();
        assert_eq!(samples, vec![GpuSample::new(3, 50, 1)]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_query_output("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_non_numeric_memory() {
        let err = parse_query_output("0, [N/A], 5").unwrap_err();
        match err {
            GpuError::Parse { line, reason } => {
                assert_eq!(line, "0, [N/A], 5");
                assert!(reason.starts_with("memory.used"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let err = parse_query_output("0, 500").unwrap_err();
        assert!(err.to_string().contains("expected 3 fields"));
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert!(parse_query_output("0, -1, 5").is_err());
    }

    #[test]
    fn test_is_idle_strict() {
        let sample = GpuSample::new(0, 1000, 9);
        assert!(!sample.is_idle(1000, 10));
        assert!(sample.is_idle(1001, 10));
        assert!(!GpuSample::new(0, 0, 10).is_idle(1000, 10));
    }
}
