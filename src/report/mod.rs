use std::collections::BTreeMap;

use serde::Serialize;

/// Per-group classification quality. Only groups with non-zero support are
/// ever emitted; zero-support metrics would be meaningless placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub accuracy: f64,
    pub f1_macro: f64,
    pub support: usize,
}

/// Group-fairness statistics for one favorable category.
///
/// `disparate_impact` is `None` when the privileged group's positive rate is
/// zero: the ratio is undefined as a domain fact, reported as JSON `null`,
/// never substituted with zero or infinity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FairnessStats {
    pub group_positive_rate: BTreeMap<String, f64>,
    pub statistical_parity_difference: f64,
    pub disparate_impact: Option<f64>,
}

/// Independently recomputed parity statistics from the cross-check backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossCheckStats {
    pub statistical_parity_difference: f64,
    pub disparate_impact: Option<f64>,
}

/// The write-once audit report. Owns copies of every computed value; the
/// `cross_check` section is omitted entirely when the capability is absent,
/// which is structurally different from a computed null inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub overall_accuracy: f64,
    pub per_group: BTreeMap<String, GroupMetrics>,
    pub parity: FairnessStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_check: Option<CrossCheckStats>,
}
