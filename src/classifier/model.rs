//! Trained model artifact — TF-IDF vectorizer plus logistic regression.
//!
//! The artifact is a single JSON file written by `newstrust-train` and loaded
//! read-only at server startup. The positive class is "fake".

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::vectorizer::TfidfVectorizer;
use crate::classifier::{Classifier, Label, Prediction};
use crate::error::{Result, TrustError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfClassifier {
    pub(crate) vectorizer: TfidfVectorizer,
    /// One weight per vectorizer column.
    pub(crate) weights: Vec<f64>,
    pub(crate) bias: f64,
}

impl TfidfClassifier {
    /// Load an artifact from disk. A missing file and a malformed file are
    /// distinct startup failures.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TrustError::ModelNotFound {
                    path: path.display().to_string(),
                }
            } else {
                TrustError::Io(e)
            }
        })?;
        let model: TfidfClassifier =
            serde_json::from_str(&contents).map_err(|e| TrustError::InvalidModel {
                reason: e.to_string(),
            })?;
        if model.weights.len() != model.vectorizer.dimension() {
            return Err(TrustError::InvalidModel {
                reason: format!(
                    "weight count {} does not match vocabulary size {}",
                    model.weights.len(),
                    model.vectorizer.dimension()
                ),
            });
        }
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Probability that `text` is fake news.
    pub fn probability_fake(&self, text: &str) -> f64 {
        let row = self.vectorizer.transform(text);
        let score: f64 = row
            .iter()
            .map(|&(index, value)| self.weights[index] * value)
            .sum::<f64>()
            + self.bias;
        sigmoid(score)
    }
}

impl Classifier for TfidfClassifier {
    fn predict(&self, text: &str) -> Prediction {
        let p_fake = self.probability_fake(text);
        let label = if p_fake >= 0.5 {
            Label::Fake
        } else {
            Label::Real
        };
        Prediction {
            label,
            confidence: p_fake.max(1.0 - p_fake),
        }
    }
}

pub(crate) fn sigmoid(score: f64) -> f64 {
    1.0 / (1.0 + (-score).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::train::{fit, Example, TrainOptions};

    fn training_corpus() -> Vec<Example> {
        let fake = [
            "shocking miracle cure doctors hate this secret trick",
            "aliens secretly control the government shocking proof",
            "celebrity scandal shocking secret exposed miracle",
            "secret trick banks hate shocking miracle revealed",
        ];
        let real = [
            "parliament passed the budget bill after committee review",
            "the central bank held interest rates steady on tuesday",
            "city council approved funding for the new transit line",
            "researchers published peer reviewed findings on climate data",
        ];
        fake.iter()
            .map(|&text| Example {
                text: text.to_string(),
                fake: true,
            })
            .chain(real.iter().map(|&text| Example {
                text: text.to_string(),
                fake: false,
            }))
            .collect()
    }

    #[test]
    fn trained_model_separates_classes() {
        let model = fit(&training_corpus(), &TrainOptions::default()).unwrap();

        let fake = model.predict("shocking secret miracle trick exposed");
        assert_eq!(fake.label, Label::Fake);
        assert!(fake.confidence >= 0.5);

        let real = model.predict("committee approved the budget after review");
        assert_eq!(real.label, Label::Real);
        assert!(real.confidence >= 0.5);
    }

    #[test]
    fn save_and_load_round_trips_predictions() {
        let model = fit(&training_corpus(), &TrainOptions::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        model.save(&path).unwrap();
        let loaded = TfidfClassifier::load(&path).unwrap();

        let text = "shocking miracle cure";
        assert!((model.probability_fake(text) - loaded.probability_fake(text)).abs() < 1e-12);
    }

    #[test]
    fn load_missing_file_is_model_not_found() {
        let err = TfidfClassifier::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, TrustError::ModelNotFound { .. }));
    }

    #[test]
    fn load_malformed_file_is_invalid_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = TfidfClassifier::load(&path).unwrap_err();
        assert!(matches!(err, TrustError::InvalidModel { .. }));
    }

    #[test]
    fn out_of_vocabulary_text_falls_back_to_bias() {
        let model = fit(&training_corpus(), &TrainOptions::default()).unwrap();
        let p = model.probability_fake("zzzz qqqq xxxx");
        assert!((0.0..=1.0).contains(&p));
    }
}
