use std::collections::BTreeMap;

use crate::model::categories::Category;
use crate::report::FairnessStats;

/// Reference groups for the parity statistics. A convention supplied by the
/// caller, not derived from the data.
#[derive(Debug, Clone)]
pub struct ParityParams<'a> {
    pub privileged: &'a str,
    pub unprivileged: &'a str,
}

/// Reduces categories to binary favorable indicators. Applied independently
/// to true and predicted labels; the favorable category is a parameter, not
/// baked-in logic.
pub fn favorable_indicators(categories: &[Category], favorable: Category) -> Vec<bool> {
    categories.iter().map(|c| *c == favorable).collect()
}

/// Stateless reduction of one population snapshot into per-group favorable
/// rates, statistical parity difference, and disparate impact.
///
/// A designated group absent from the sample contributes a rate of 0.0;
/// group definitions may be broader than what a given sample contains.
/// Disparate impact is undefined (`None`) when the privileged rate is zero.
pub fn run_stage6(
    predicted_favorable: &[bool],
    group_ids: &[String],
    params: &ParityParams<'_>,
) -> FairnessStats {
    let mut totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (favorable, group) in predicted_favorable.iter().zip(group_ids) {
        let entry = totals.entry(group.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if *favorable {
            entry.1 += 1;
        }
    }

    // every key here has at least one record, so no division by zero
    let group_positive_rate: BTreeMap<String, f64> = totals
        .iter()
        .map(|(group, (n, positive))| (group.to_string(), *positive as f64 / *n as f64))
        .collect();

    let privileged_rate = group_positive_rate
        .get(params.privileged)
        .copied()
        .unwrap_or(0.0);
    let unprivileged_rate = group_positive_rate
        .get(params.unprivileged)
        .copied()
        .unwrap_or(0.0);

    let statistical_parity_difference = unprivileged_rate - privileged_rate;
    let disparate_impact = if privileged_rate > 0.0 {
        Some(unprivileged_rate / privileged_rate)
    } else {
        None
    };

    FairnessStats {
        group_positive_rate,
        statistical_parity_difference,
        disparate_impact,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_parity.rs"]
mod tests;
