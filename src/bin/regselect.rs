use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ndarray::Array2;
use serde::Serialize;

use regselect::config::TrainerConfig;
use regselect::estimators::Predict;
use regselect::evaluator::ScoreReport;
use regselect::logging;
use regselect::persist::{load_artifact, ArtifactMetadata};
use regselect::ModelTrainer;

#[derive(Debug, Parser)]
#[command(
    name = "regselect",
    version,
    about = "Train a family of regressors and keep the best one"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Train every configured model and persist the best one
    Train(TrainArgs),
    /// Print the metadata of a model artifact
    Inspect(InspectArgs),
    /// Predict targets for a JSON feature matrix
    Predict(PredictArgs),
}

#[derive(Debug, Parser)]
struct TrainArgs {
    /// JSON matrix, features followed by the target column
    #[arg(long)]
    train: PathBuf,
    #[arg(long)]
    test: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `artifact_path` from the config
    #[arg(long)]
    artifact: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct InspectArgs {
    artifact: PathBuf,
}

#[derive(Debug, Parser)]
struct PredictArgs {
    artifact: PathBuf,
    /// JSON matrix of features only
    #[arg(long)]
    input: PathBuf,
}

/// Printed by `train`. Serialized from borrowed fields so the score report
/// keeps its registry order.
#[derive(Debug, Serialize)]
struct TrainSummary<'a> {
    model: &'a str,
    r2: f64,
    artifact: &'a Path,
    scores: &'a ScoreReport,
}

#[derive(Debug, Serialize)]
struct InspectSummary<'a> {
    kind: &'static str,
    metadata: &'a ArtifactMetadata,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("regselect error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Train(args) => run_train(args),
        Command::Inspect(args) => run_inspect(args),
        Command::Predict(args) => run_predict(args),
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TrainerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TrainerConfig::default(),
    };
    if let Some(artifact) = args.artifact {
        config.artifact_path = artifact;
    }
    let _guard = logging::init(&config.logging).context("initializing logging")?;

    let train = read_matrix(&args.train)?;
    let test = read_matrix(&args.test)?;
    let outcome = ModelTrainer::new(config)
        .initiate_model_trainer(&train, &test)
        .context("training failed")?;

    let summary = TrainSummary {
        model: &outcome.model_name,
        r2: outcome.score,
        artifact: &outcome.artifact_path,
        scores: &outcome.report,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let artifact = load_artifact(&args.artifact)
        .with_context(|| format!("loading artifact {}", args.artifact.display()))?;
    let summary = InspectSummary {
        kind: artifact.model.kind(),
        metadata: &artifact.metadata,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let artifact = load_artifact(&args.artifact)
        .with_context(|| format!("loading artifact {}", args.artifact.display()))?;
    let records = read_matrix(&args.input)?;
    let predictions = artifact
        .model
        .predict(&records)
        .context("predicting")?;
    println!("{}", serde_json::to_string(&predictions.to_vec())?);
    Ok(())
}

/// Reads a row-major JSON matrix such as `[[1.0, 2.0], [3.0, 4.0]]`.
fn read_matrix(path: &Path) -> Result<Array2<f64>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows: Vec<Vec<f64>> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some(idx) = rows.iter().position(|row| row.len() != n_cols) {
        bail!(
            "{}: row {} has {} values, expected {}",
            path.display(),
            idx,
            rows[idx].len(),
            n_cols
        );
    }
    let n_rows = rows.len();
    let values = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), values)
        .with_context(|| format!("building matrix from {}", path.display()))
}
