mod crosscheck;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::input::load_bundle;
use crate::model::categories::Category;
use crate::model::groups::GroupDistribution;
use crate::pipeline::stage2_label::run_stage2;
use crate::pipeline::stage3_groups::run_stage3;
use crate::pipeline::stage4_predict::{log_predictions, run_stage4};
use crate::pipeline::stage5_metrics::run_stage5;
use crate::pipeline::stage6_parity::{ParityParams, favorable_indicators, run_stage6};
use crate::pipeline::stage7_report::{Stage7Input, assemble, write_report};

#[derive(Parser, Debug)]
#[command(name = "fairqc")]
#[command(version)]
#[command(about = "Group-fairness audit of priority-classifier predictions on held-out populations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit a classifier's predictions over an evaluation population
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Path to the classifier artifact (model bundle JSON)
    #[arg(long)]
    artifact: PathBuf,

    /// Reference population table used to derive category thresholds
    #[arg(long)]
    reference: PathBuf,

    /// Evaluation population table to audit
    #[arg(long)]
    eval: PathBuf,

    /// Output directory for the report
    #[arg(long)]
    out: PathBuf,

    /// Seed for synthetic group assignment
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Group distribution as id:weight pairs summing to 1.0
    #[arg(long, default_value = "team_A:0.7,team_B:0.2,team_C:0.1")]
    group_dist: String,

    /// Read group ids from this evaluation-table column instead of synthesizing
    #[arg(long)]
    group_column: Option<String>,

    /// Favorable category for the parity statistics
    #[arg(long, default_value = "high")]
    favorable: String,

    /// Privileged reference group
    #[arg(long, default_value = "team_A")]
    privileged: String,

    /// Unprivileged comparison group
    #[arg(long, default_value = "team_C")]
    unprivileged: String,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;

    let distribution = GroupDistribution::parse(&args.group_dist).map_err(|e| e.to_string())?;
    info!(
        "group distribution over: {}",
        distribution.group_ids().collect::<Vec<_>>().join(", ")
    );
    let favorable = Category::from_name(&args.favorable).ok_or_else(|| {
        format!(
            "invalid --favorable {:?} (use low|medium|high)",
            args.favorable
        )
    })?;

    let bundle = load_bundle(
        &args.artifact,
        &args.reference,
        &args.eval,
        args.group_column.as_deref(),
    )
    .map_err(|e| e.to_string())?;
    info!(
        "loaded artifact with {} features; reference {} records, evaluation {} records",
        bundle.artifact.schema.len(),
        bundle.reference.len(),
        bundle.eval.len()
    );

    let stage2 = run_stage2(&bundle.reference, &bundle.eval, &bundle.artifact.label_feature)
        .map_err(|e| e.to_string())?;
    info!(
        "category thresholds on {:?}: q1 {:.6}, q2 {:.6}",
        bundle.artifact.label_feature, stage2.thresholds.q1, stage2.thresholds.q2
    );

    let stage3 = run_stage3(&bundle.eval, &distribution, args.seed);
    let stage4 = run_stage4(&bundle.artifact, &bundle.eval).map_err(|e| e.to_string())?;

    log_predictions(
        &args.out,
        &stage3.group_ids,
        &stage2.true_categories,
        &stage4.predicted,
    );

    let stage5 = run_stage5(
        &stage2.true_categories,
        &stage4.predicted,
        &stage3.group_ids,
    );

    let true_favorable = favorable_indicators(&stage2.true_categories, favorable);
    let predicted_favorable = favorable_indicators(&stage4.predicted, favorable);
    let parity = run_stage6(
        &predicted_favorable,
        &stage3.group_ids,
        &ParityParams {
            privileged: &args.privileged,
            unprivileged: &args.unprivileged,
        },
    );

    let backend = crosscheck::backend();
    let cross_check = match backend {
        Some(backend) => {
            info!("cross-check backend available: {}", backend.name());
            Some(backend.audit(
                &true_favorable,
                &predicted_favorable,
                &stage3.group_ids,
                &args.privileged,
                &args.unprivileged,
            ))
        }
        None => {
            info!("cross-check backend unavailable; report will omit cross_check");
            None
        }
    };

    let report = assemble(Stage7Input {
        overall_accuracy: stage5.overall_accuracy,
        per_group: stage5.per_group,
        parity,
        cross_check,
    });
    let path = write_report(&report, &args.out).map_err(|e| e.to_string())?;
    info!("wrote {}", path.display());

    Ok(())
}
