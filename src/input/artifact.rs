use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::model::categories::Category;

/// On-disk shape of the model bundle produced by the training pipeline.
#[derive(Debug, Deserialize)]
struct ArtifactFile {
    schema: Vec<String>,
    label_feature: String,
    label_map: BTreeMap<String, i64>,
    model: ModelSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelSpec {
    /// Two cut points on one named feature; codes for low/medium/high.
    ScoreCut {
        feature: String,
        cut_low: f64,
        cut_high: f64,
    },
    /// Per-category weight vectors over the full schema, argmax decision.
    /// Weight rows are ordered low, medium, high.
    Linear {
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
    },
}

#[derive(Debug)]
enum Model {
    ScoreCut {
        feature_idx: usize,
        cut_low: f64,
        cut_high: f64,
    },
    Linear {
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
    },
}

/// Loaded, validated classifier bundle: feature schema, label encoding, and
/// the callable model. One handle is constructed per run and passed to every
/// component that predicts.
#[derive(Debug)]
pub struct ModelArtifact {
    pub schema: Vec<String>,
    pub label_feature: String,
    /// Encoded label per category, indexed in `Category::ALL` order.
    codes: [i64; 3],
    model: Model,
}

pub fn load_artifact(path: &Path) -> Result<ModelArtifact, InputError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            InputError::MissingInput(format!("classifier artifact not found at {}", path.display()))
        } else {
            InputError::Io(e)
        }
    })?;
    let file: ArtifactFile = serde_json::from_str(&raw).map_err(|e| {
        InputError::Parse(format!(
            "classifier artifact {} is malformed: {e}",
            path.display()
        ))
    })?;
    resolve(file).map_err(|msg| {
        InputError::InvalidInput(format!("classifier artifact {}: {msg}", path.display()))
    })
}

fn resolve(file: ArtifactFile) -> Result<ModelArtifact, String> {
    if file.schema.is_empty() {
        return Err("feature schema is empty".to_string());
    }
    for (i, name) in file.schema.iter().enumerate() {
        if file.schema[..i].contains(name) {
            return Err(format!("duplicate feature {name:?} in schema"));
        }
    }

    let codes = resolve_label_map(&file.label_map)?;

    if !file.schema.contains(&file.label_feature) {
        return Err(format!(
            "label feature {:?} is not part of the schema",
            file.label_feature
        ));
    }

    let model = match file.model {
        ModelSpec::ScoreCut {
            feature,
            cut_low,
            cut_high,
        } => {
            let feature_idx = file
                .schema
                .iter()
                .position(|name| *name == feature)
                .ok_or_else(|| format!("model feature {feature:?} is not part of the schema"))?;
            if cut_low > cut_high {
                return Err(format!(
                    "model cut points are inverted ({cut_low} > {cut_high})"
                ));
            }
            Model::ScoreCut {
                feature_idx,
                cut_low,
                cut_high,
            }
        }
        ModelSpec::Linear { weights, bias } => {
            if weights.len() != Category::ALL.len() || bias.len() != Category::ALL.len() {
                return Err(format!(
                    "linear model must carry {} weight rows and biases",
                    Category::ALL.len()
                ));
            }
            for row in &weights {
                if row.len() != file.schema.len() {
                    return Err(format!(
                        "linear weight row has {} entries, schema has {}",
                        row.len(),
                        file.schema.len()
                    ));
                }
            }
            Model::Linear { weights, bias }
        }
    };

    Ok(ModelArtifact {
        schema: file.schema,
        label_feature: file.label_feature,
        codes,
        model,
    })
}

fn resolve_label_map(map: &BTreeMap<String, i64>) -> Result<[i64; 3], String> {
    if map.len() != Category::ALL.len() {
        return Err(format!(
            "label map must cover exactly {} categories, found {}",
            Category::ALL.len(),
            map.len()
        ));
    }
    let mut codes = [0i64; 3];
    for (name, code) in map {
        let category = Category::from_name(name)
            .ok_or_else(|| format!("label map names unknown category {name:?}"))?;
        codes[category as usize] = *code;
    }
    for (i, a) in codes.iter().enumerate() {
        if codes[..i].contains(a) {
            return Err(format!("label map assigns code {a} to more than one category"));
        }
    }
    Ok(codes)
}

impl ModelArtifact {
    /// Runs the classifier on one record and returns the encoded label.
    /// `features` is aligned to `self.schema`; the ingestion boundary
    /// guarantees the length.
    pub fn predict(&self, features: &[f64]) -> i64 {
        debug_assert_eq!(features.len(), self.schema.len());
        match &self.model {
            Model::ScoreCut {
                feature_idx,
                cut_low,
                cut_high,
            } => {
                let x = features[*feature_idx];
                if x <= *cut_low {
                    self.codes[Category::Low as usize]
                } else if x <= *cut_high {
                    self.codes[Category::Medium as usize]
                } else {
                    self.codes[Category::High as usize]
                }
            }
            Model::Linear { weights, bias } => {
                let mut best = 0usize;
                let mut best_score = f64::NEG_INFINITY;
                for (k, row) in weights.iter().enumerate() {
                    let score: f64 = bias[k]
                        + row
                            .iter()
                            .zip(features.iter())
                            .map(|(w, x)| w * x)
                            .sum::<f64>();
                    if score > best_score {
                        best = k;
                        best_score = score;
                    }
                }
                self.codes[best]
            }
        }
    }

    /// Maps an encoded label back to its category name, the inverse of the
    /// artifact's label map.
    pub fn decode(&self, code: i64) -> Option<Category> {
        Category::ALL
            .iter()
            .position(|c| self.codes[*c as usize] == code)
            .map(|i| Category::ALL[i])
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/artifact.rs"]
mod tests;
