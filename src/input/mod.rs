use std::path::Path;

pub mod artifact;
pub mod table;

use artifact::{ModelArtifact, load_artifact};
use table::{FeatureTable, load_table};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Everything one audit run consumes: the classifier artifact plus the two
/// population snapshots. Built once in `run()` and passed down by reference;
/// no component reaches for hidden global state.
#[derive(Debug)]
pub struct AuditBundle {
    pub artifact: ModelArtifact,
    pub reference: FeatureTable,
    pub eval: FeatureTable,
}

pub fn load_bundle(
    artifact_path: &Path,
    reference_path: &Path,
    eval_path: &Path,
    group_column: Option<&str>,
) -> Result<AuditBundle, InputError> {
    let artifact = load_artifact(artifact_path)?;
    let reference = load_table(reference_path, &artifact.schema, None)?;
    let eval = load_table(eval_path, &artifact.schema, group_column)?;
    if eval.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "evaluation population {} contains no records",
            eval_path.display()
        )));
    }
    Ok(AuditBundle {
        artifact,
        reference,
        eval,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
