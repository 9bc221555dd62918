use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use vehicle_price::application::ml::pipeline::ForestParams;
use vehicle_price::application::ml::trainer::{TrainerConfig, train};
use vehicle_price::infrastructure::dataset_loader::load_dataset;
use vehicle_price::infrastructure::model_store::{DEFAULT_MODEL_PATH, ModelStore};

#[derive(Parser, Debug)]
#[command(author, version, about = "Train the vehicle price model", long_about = None)]
struct Args {
    /// Path to the training dataset CSV
    #[arg(long, default_value = "dataset.csv")]
    input: PathBuf,

    /// Path to the output model file
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 200)]
    n_trees: usize,

    /// Maximum depth of trees (unbounded when omitted)
    #[arg(long)]
    max_depth: Option<u16>,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 2)]
    min_split: usize,

    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Seed for the train/test shuffle and the forest
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args = Args::parse();

    let dataset = load_dataset(&args.input)
        .with_context(|| format!("Failed to load training data from {:?}", args.input))?;
    println!(
        "Dataset loaded: {} labelled rows x {} columns ({} rows dropped for missing price)",
        dataset.len(),
        dataset.total_columns,
        dataset.dropped
    );
    println!("Features found: {:?}", dataset.present_features);

    let config = TrainerConfig {
        test_size: args.test_size,
        split_seed: args.seed,
        forest: ForestParams {
            n_trees: args.n_trees,
            max_depth: args.max_depth,
            min_samples_split: args.min_split,
            seed: args.seed,
        },
    };

    let outcome = train(dataset, &config).context("Training failed")?;
    let report = &outcome.report;

    println!(
        "Train rows: {}  Test rows: {}",
        report.train_rows, report.test_rows
    );
    if let Some(year) = report.reference_year {
        println!("Age derived against dataset max year {}", year);
    }
    match &report.metrics {
        Some(metrics) => println!("\n{}\n", metrics),
        None => println!("\nNo held-out rows; evaluation skipped.\n"),
    }

    let store = ModelStore::new(&args.output);
    store.save(&outcome.pipeline)?;
    println!("Model saved to: {:?}", store.path());

    Ok(())
}
