//! Offline training pipeline: labeled CSV in, model artifact out.
//!
//! The dataset is a CSV with `text` and `label` columns, labels `FAKE` or
//! `REAL` (`FAKE` is the positive class). Fitting is full-batch gradient
//! descent on L2-regularized logistic regression over TF-IDF rows.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use crate::classifier::model::{sigmoid, TfidfClassifier};
use crate::classifier::vectorizer::TfidfVectorizer;
use crate::error::{Result, TrustError};

/// Seed for the holdout shuffle, fixed so evaluation runs are repeatable.
pub const SHUFFLE_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct Example {
    pub text: String,
    pub fake: bool,
}

#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Vocabulary cap for the TF-IDF vectorizer.
    pub max_features: usize,
    /// Full-batch gradient descent iterations.
    pub epochs: usize,
    pub learning_rate: f64,
    /// L2 penalty on the weights (not the bias).
    pub l2: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            max_features: 5000,
            epochs: 1000,
            learning_rate: 1.0,
            l2: 1e-4,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DatasetRecord {
    text: String,
    label: String,
}

/// Load and validate the CSV dataset. Unknown labels and an empty dataset
/// are input errors, not silently skipped rows.
pub fn load_dataset(path: &Path) -> Result<Vec<Example>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| TrustError::Dataset {
        reason: format!("failed to open {}: {e}", path.display()),
    })?;

    let mut examples = Vec::new();
    for (line, record) in reader.deserialize::<DatasetRecord>().enumerate() {
        let record = record.map_err(|e| TrustError::Dataset {
            reason: format!("row {}: {e}", line + 1),
        })?;
        let fake = match record.label.as_str() {
            "FAKE" => true,
            "REAL" => false,
            other => {
                return Err(TrustError::Dataset {
                    reason: format!("row {}: unknown label {other:?} (expected FAKE or REAL)", line + 1),
                })
            }
        };
        examples.push(Example {
            text: record.text,
            fake,
        });
    }

    if examples.is_empty() {
        return Err(TrustError::Dataset {
            reason: format!("no rows in {}", path.display()),
        });
    }
    Ok(examples)
}

/// Fit vectorizer and logistic regression on the full set of examples.
pub fn fit(examples: &[Example], opts: &TrainOptions) -> Result<TfidfClassifier> {
    if examples.is_empty() {
        return Err(TrustError::Dataset {
            reason: "cannot fit on an empty dataset".into(),
        });
    }

    let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
    let vectorizer = TfidfVectorizer::fit(&texts, opts.max_features);

    let rows: Vec<Vec<(usize, f64)>> = texts.iter().map(|t| vectorizer.transform(t)).collect();
    let targets: Vec<f64> = examples
        .iter()
        .map(|e| if e.fake { 1.0 } else { 0.0 })
        .collect();

    let n = rows.len() as f64;
    let mut weights = vec![0.0f64; vectorizer.dimension()];
    let mut bias = 0.0f64;
    let mut gradient = vec![0.0f64; weights.len()];

    for _ in 0..opts.epochs {
        gradient.iter_mut().for_each(|g| *g = 0.0);
        let mut bias_gradient = 0.0f64;

        for (row, &target) in rows.iter().zip(&targets) {
            let score: f64 = row
                .iter()
                .map(|&(index, value)| weights[index] * value)
                .sum::<f64>()
                + bias;
            let residual = sigmoid(score) - target;
            for &(index, value) in row {
                gradient[index] += residual * value;
            }
            bias_gradient += residual;
        }

        for (weight, &g) in weights.iter_mut().zip(&gradient) {
            *weight -= opts.learning_rate * (g / n + opts.l2 * *weight);
        }
        bias -= opts.learning_rate * bias_gradient / n;
    }

    Ok(TfidfClassifier {
        vectorizer,
        weights,
        bias,
    })
}

/// Plain accuracy over a labeled set.
pub fn evaluate(model: &TfidfClassifier, examples: &[Example]) -> f64 {
    if examples.is_empty() {
        return 0.0;
    }
    let correct = examples
        .iter()
        .filter(|e| (model.probability_fake(&e.text) >= 0.5) == e.fake)
        .count();
    correct as f64 / examples.len() as f64
}

/// Shuffle with a fixed seed and split off the trailing `fraction` as the
/// holdout set. `fraction` is clamped so both sides stay non-empty.
pub fn holdout_split(mut examples: Vec<Example>, fraction: f64) -> (Vec<Example>, Vec<Example>) {
    let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
    examples.shuffle(&mut rng);

    let holdout = ((examples.len() as f64 * fraction) as usize)
        .max(1)
        .min(examples.len() - 1);
    let held = examples.split_off(examples.len() - holdout);
    (examples, held)
}
