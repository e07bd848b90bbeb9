//! Offline trainer: fit the fake-news model and write the artifact the
//! server loads at startup.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use newstrust::classifier::train::{evaluate, fit, holdout_split, load_dataset, TrainOptions};

#[derive(Parser)]
#[command(name = "newstrust-train", version, about = "Train the fake-news classifier")]
struct Cli {
    /// Labeled CSV dataset with `text` and `label` (FAKE/REAL) columns
    #[arg(long, default_value = "news.csv")]
    dataset: PathBuf,

    /// Where to write the model artifact
    #[arg(long, default_value = "model.json")]
    output: PathBuf,

    /// Vocabulary cap for the TF-IDF vectorizer
    #[arg(long, default_value_t = 5000)]
    max_features: usize,

    /// Gradient descent iterations
    #[arg(long, default_value_t = 1000)]
    epochs: usize,

    #[arg(long, default_value_t = 1.0)]
    learning_rate: f64,

    /// L2 penalty on the weights
    #[arg(long, default_value_t = 1e-4)]
    l2: f64,

    /// Fraction held out for evaluation (0 disables evaluation; the final
    /// model is always fit on the full dataset)
    #[arg(long, default_value_t = 0.0)]
    holdout: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newstrust=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let opts = TrainOptions {
        max_features: cli.max_features,
        epochs: cli.epochs,
        learning_rate: cli.learning_rate,
        l2: cli.l2,
    };

    let examples = load_dataset(&cli.dataset)
        .with_context(|| format!("failed to load dataset {}", cli.dataset.display()))?;
    let fake_count = examples.iter().filter(|e| e.fake).count();
    tracing::info!(
        rows = examples.len(),
        fake = fake_count,
        real = examples.len() - fake_count,
        "dataset loaded"
    );

    if cli.holdout > 0.0 {
        let (train_set, held) = holdout_split(examples.clone(), cli.holdout);
        let probe = fit(&train_set, &opts).context("holdout training failed")?;
        let accuracy = evaluate(&probe, &held);
        tracing::info!(
            train_rows = train_set.len(),
            holdout_rows = held.len(),
            accuracy,
            "holdout evaluation"
        );
    }

    // Final model is fit on everything, like the artifact the server ships.
    let model = fit(&examples, &opts).context("training failed")?;
    model
        .save(&cli.output)
        .with_context(|| format!("failed to write model to {}", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), "model saved");

    Ok(())
}
