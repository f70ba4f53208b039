use std::collections::BTreeMap;

use crate::report::CrossCheckStats;

/// Alternate parity computation used only to validate the primary path.
///
/// Availability is a build capability resolved exactly once at startup via
/// [`backend`]; the report assembler checks the resolved option once and
/// never re-probes. When the capability is absent the report's `cross_check`
/// section is omitted entirely.
#[derive(Debug, Clone, Copy)]
pub struct CrossCheck;

pub fn backend() -> Option<CrossCheck> {
    if cfg!(feature = "cross-check") {
        Some(CrossCheck)
    } else {
        None
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct GroupCounts {
    records: u64,
    predicted_favorable: u64,
}

impl CrossCheck {
    pub fn name(&self) -> &'static str {
        "contingency-v1"
    }

    /// Recomputes statistical parity difference and disparate impact from
    /// per-group integer contingency counts over the same true/predicted
    /// indicators and group assignments the primary path consumed. Shares no
    /// intermediate state with the primary computation.
    pub fn audit(
        &self,
        true_favorable: &[bool],
        predicted_favorable: &[bool],
        group_ids: &[String],
        privileged: &str,
        unprivileged: &str,
    ) -> CrossCheckStats {
        debug_assert_eq!(true_favorable.len(), predicted_favorable.len());
        debug_assert_eq!(predicted_favorable.len(), group_ids.len());
        let mut counts: BTreeMap<&str, GroupCounts> = BTreeMap::new();
        for (p, group) in predicted_favorable.iter().zip(group_ids) {
            let entry = counts.entry(group.as_str()).or_default();
            entry.records += 1;
            if *p {
                entry.predicted_favorable += 1;
            }
        }

        let privileged_counts = counts.get(privileged).copied().unwrap_or_default();
        let unprivileged_counts = counts.get(unprivileged).copied().unwrap_or_default();

        let statistical_parity_difference =
            selection_rate(unprivileged_counts) - selection_rate(privileged_counts);
        let disparate_impact = if privileged_counts.predicted_favorable > 0 {
            Some(selection_rate(unprivileged_counts) / selection_rate(privileged_counts))
        } else {
            None
        };

        CrossCheckStats {
            statistical_parity_difference,
            disparate_impact,
        }
    }
}

fn selection_rate(counts: GroupCounts) -> f64 {
    if counts.records == 0 {
        0.0
    } else {
        counts.predicted_favorable as f64 / counts.records as f64
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/crosscheck/tests.rs"]
mod tests;
