use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::input::artifact::load_artifact;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("fairqc_predict_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn score_cut_artifact() -> ModelArtifact {
    let json = r#"{
      "schema": ["score"],
      "label_feature": "score",
      "label_map": {"low": 0, "medium": 1, "high": 2},
      "model": {"kind": "score_cut", "feature": "score", "cut_low": 10.0, "cut_high": 15.0}
    }"#;
    let path = make_temp_dir().join("model.json");
    fs::write(&path, json).unwrap();
    load_artifact(&path).unwrap()
}

fn eval_table(values: &[f64]) -> FeatureTable {
    FeatureTable {
        schema: vec!["score".to_string()],
        rows: values.iter().map(|v| vec![*v]).collect(),
        groups: None,
    }
}

#[test]
fn test_predictions_decode_to_categories() {
    let artifact = score_cut_artifact();
    let eval = eval_table(&[8.0, 12.0, 20.0]);
    let out = run_stage4(&artifact, &eval).unwrap();
    assert_eq!(
        out.predicted,
        vec![Category::Low, Category::Medium, Category::High]
    );
}

#[test]
fn test_prediction_log_contents() {
    let dir = make_temp_dir();
    let groups = vec!["team_A".to_string(), "team_C".to_string()];
    let truth = vec![Category::High, Category::Low];
    let predicted = vec![Category::High, Category::Medium];
    write_predictions_tsv(&dir, &groups, &truth, &predicted).unwrap();

    let contents = fs::read_to_string(dir.join("predictions.tsv")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "record\tgroup\ttrue\tpredicted");
    assert_eq!(lines[1], "0\tteam_A\thigh\thigh");
    assert_eq!(lines[2], "1\tteam_C\tlow\tmedium");
}

#[test]
fn test_prediction_log_failure_does_not_panic() {
    // out dir path occupied by a regular file; create_dir_all fails
    let blocker = make_temp_dir().join("blocker");
    fs::write(&blocker, "x").unwrap();
    log_predictions(&blocker, &[], &[], &[]);
}
