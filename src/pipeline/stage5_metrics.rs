use std::collections::BTreeMap;

use crate::model::categories::Category;
use crate::report::GroupMetrics;

#[derive(Debug)]
pub struct Stage5Output {
    pub overall_accuracy: f64,
    pub per_group: BTreeMap<String, GroupMetrics>,
}

/// Partitions the evaluation population by group id and scores each
/// non-empty group. Groups are disjoint, so supports sum to the population
/// size; empty groups exist only by absence and are never emitted.
pub fn run_stage5(
    truth: &[Category],
    predicted: &[Category],
    group_ids: &[String],
) -> Stage5Output {
    let mut partition: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, group) in group_ids.iter().enumerate() {
        partition.entry(group.as_str()).or_default().push(idx);
    }

    let mut per_group = BTreeMap::new();
    for (group, indices) in &partition {
        per_group.insert(
            group.to_string(),
            GroupMetrics {
                accuracy: accuracy(truth, predicted, indices),
                f1_macro: macro_f1(truth, predicted, indices),
                support: indices.len(),
            },
        );
    }

    let all: Vec<usize> = (0..truth.len()).collect();
    Stage5Output {
        overall_accuracy: accuracy(truth, predicted, &all),
        per_group,
    }
}

fn accuracy(truth: &[Category], predicted: &[Category], indices: &[usize]) -> f64 {
    let correct = indices
        .iter()
        .filter(|&&i| truth[i] == predicted[i])
        .count();
    correct as f64 / indices.len() as f64
}

/// Unweighted mean of per-category F1 over exactly the three categories.
/// A category absent from both true and predicted labels contributes 0,
/// a defined outcome rather than a skipped term.
fn macro_f1(truth: &[Category], predicted: &[Category], indices: &[usize]) -> f64 {
    let mut sum = 0.0;
    for category in Category::ALL {
        let mut tp = 0usize;
        let mut fp = 0usize;
        let mut fn_count = 0usize;
        for &i in indices {
            match (truth[i] == category, predicted[i] == category) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_count += 1,
                (false, false) => {}
            }
        }
        sum += class_f1(tp, fp, fn_count);
    }
    sum / Category::ALL.len() as f64
}

fn class_f1(tp: usize, fp: usize, fn_count: usize) -> f64 {
    let precision = if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    };
    let recall = if tp + fn_count == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_count) as f64
    };
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_metrics.rs"]
mod tests;
