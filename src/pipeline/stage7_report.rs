use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::{CrossCheckStats, FairnessStats, GroupMetrics, Report};

#[derive(Debug)]
pub struct Stage7Input {
    pub overall_accuracy: f64,
    pub per_group: BTreeMap<String, GroupMetrics>,
    pub parity: FairnessStats,
    pub cross_check: Option<CrossCheckStats>,
}

/// Pure aggregation of the upstream stage outputs into the report value.
/// No recomputation happens here.
pub fn assemble(input: Stage7Input) -> Report {
    let report = Report {
        overall_accuracy: input.overall_accuracy,
        per_group: input.per_group,
        parity: input.parity,
        cross_check: input.cross_check,
    };
    debug_assert!(
        report
            .per_group
            .keys()
            .all(|g| report.parity.group_positive_rate.contains_key(g))
    );
    report
}

/// Serializes the full report in memory before touching the filesystem, so a
/// failed run can never leave a partial report file behind.
pub fn write_report(report: &Report, out_dir: &Path) -> std::io::Result<PathBuf> {
    let mut json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    json.push('\n');
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join("fairness_report.json");
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
