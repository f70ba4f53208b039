use crate::input::InputError;
use crate::input::table::FeatureTable;
use crate::model::categories::Category;
use crate::model::thresholds::CategoryThresholds;

#[derive(Debug)]
pub struct Stage2Output {
    pub thresholds: CategoryThresholds,
    pub true_categories: Vec<Category>,
}

/// Synthesizes true categories for the evaluation population from quantile
/// thresholds of the reference population's label feature. The reference is
/// an explicit input shared with the training side, not re-derived from the
/// evaluation sample.
pub fn run_stage2(
    reference: &FeatureTable,
    eval: &FeatureTable,
    label_feature: &str,
) -> Result<Stage2Output, InputError> {
    let reference_scores = reference.column(label_feature).ok_or_else(|| {
        InputError::InvalidInput(format!(
            "reference population has no {label_feature:?} column"
        ))
    })?;
    let thresholds = CategoryThresholds::from_reference(&reference_scores).ok_or_else(|| {
        InputError::InvalidInput(
            "reference population is empty; category thresholds are undefined".to_string(),
        )
    })?;

    let eval_scores = eval.column(label_feature).ok_or_else(|| {
        InputError::InvalidInput(format!(
            "evaluation population has no {label_feature:?} column"
        ))
    })?;
    let true_categories = eval_scores
        .iter()
        .map(|score| thresholds.label(*score))
        .collect();

    Ok(Stage2Output {
        thresholds,
        true_categories,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_label.rs"]
mod tests;
