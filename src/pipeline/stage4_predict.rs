use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::input::InputError;
use crate::input::artifact::ModelArtifact;
use crate::input::table::FeatureTable;
use crate::model::categories::Category;

#[derive(Debug)]
pub struct Stage4Output {
    pub predicted: Vec<Category>,
}

/// Runs the classifier over every evaluation record and decodes the encoded
/// labels back to category names through the artifact's label map.
pub fn run_stage4(artifact: &ModelArtifact, eval: &FeatureTable) -> Result<Stage4Output, InputError> {
    let mut predicted = Vec::with_capacity(eval.len());
    for row in &eval.rows {
        let code = artifact.predict(row);
        let category = artifact.decode(code).ok_or_else(|| {
            InputError::InvalidInput(format!(
                "classifier produced label code {code} outside the artifact's label map"
            ))
        })?;
        predicted.push(category);
    }
    Ok(Stage4Output { predicted })
}

/// Best-effort per-record prediction log. Failure to persist it must never
/// fail the audit; it is surfaced on the diagnostic channel instead.
pub fn log_predictions(
    out_dir: &Path,
    group_ids: &[String],
    truth: &[Category],
    predicted: &[Category],
) {
    if let Err(e) = write_predictions_tsv(out_dir, group_ids, truth, predicted) {
        warn!("failed to write prediction log: {e}");
    }
}

fn write_predictions_tsv(
    out_dir: &Path,
    group_ids: &[String],
    truth: &[Category],
    predicted: &[Category],
) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join("predictions.tsv");
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "record\tgroup\ttrue\tpredicted")?;
    for (i, ((group, t), p)) in group_ids.iter().zip(truth).zip(predicted).enumerate() {
        writeln!(out, "{i}\t{group}\t{}\t{}", t.name(), p.name())?;
    }
    out.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_predict.rs"]
mod tests;
