use tracing::info;

use crate::input::table::FeatureTable;
use crate::model::groups::GroupDistribution;

#[derive(Debug)]
pub struct Stage3Output {
    pub group_ids: Vec<String>,
}

/// Attaches exactly one protected-group id to every evaluation record.
///
/// When the table carries a real protected-attribute column the ids come
/// from the data; otherwise they are drawn from the configured categorical
/// distribution with a single seeded generator.
pub fn run_stage3(eval: &FeatureTable, distribution: &GroupDistribution, seed: u64) -> Stage3Output {
    let group_ids = match &eval.groups {
        Some(ids) => {
            info!("group ids read from the evaluation table");
            ids.clone()
        }
        None => {
            info!("group ids synthesized from the configured distribution (seed {seed})");
            distribution.sample(eval.len(), seed)
        }
    };
    Stage3Output { group_ids }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_groups.rs"]
mod tests;
