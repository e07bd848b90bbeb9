//! TF-IDF feature extraction for news text.
//!
//! Tokens are lowercase alphanumeric runs of at least two characters with
//! English stop words removed. The fitted vocabulary is capped to the most
//! frequent terms across the corpus; IDF is smoothed and each transformed
//! row is L2-normalized. The fitted state serializes with the model artifact.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// English stop words dropped before counting.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
    "you", "your", "yours", "yourself", "yourselves",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercased alphanumeric runs, minimum length two, stop words removed.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2 && !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> column index. Indices are dense in `0..idf.len()`.
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column.
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and IDF over a corpus, keeping at most `max_features`
    /// terms ordered by total frequency across the corpus.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        let n_docs = documents.len();
        let mut corpus_counts: HashMap<String, u64> = HashMap::new();
        let mut doc_frequency: HashMap<String, u64> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            let mut seen: HashSet<&str> = HashSet::new();
            for token in &tokens {
                *corpus_counts.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token) {
                    *doc_frequency.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        // Keep the top max_features terms; ties break alphabetically so the
        // fitted vocabulary is deterministic for a given corpus.
        let mut terms: Vec<(String, u64)> = corpus_counts.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(max_features);

        let mut selected: Vec<String> = terms.into_iter().map(|(term, _)| term).collect();
        selected.sort();

        let mut vocabulary = HashMap::with_capacity(selected.len());
        let mut idf = Vec::with_capacity(selected.len());
        for (index, term) in selected.into_iter().enumerate() {
            let df = doc_frequency.get(&term).copied().unwrap_or(0);
            idf.push((((1 + n_docs) as f64) / ((1 + df) as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    /// Number of feature columns.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Transform text into a sparse L2-normalized TF-IDF row, sorted by
    /// column index. Text with no in-vocabulary tokens yields an empty row.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, u64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(token.as_str()) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count as f64 * self.idf[index]))
            .collect();
        row.sort_by_key(|&(index, _)| index);

        let norm = row.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for entry in &mut row {
                entry.1 /= norm;
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_word_list_is_sorted_for_binary_search() {
        let mut sorted = STOP_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(STOP_WORDS, sorted.as_slice());
    }

    #[test]
    fn tokenize_lowercases_and_drops_stop_words() {
        let tokens = tokenize("The Quick BROWN fox, and a dog!");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "dog"]);
    }

    #[test]
    fn tokenize_drops_single_characters() {
        let tokens = tokenize("x marks 1 spot");
        assert_eq!(tokens, vec!["marks", "spot"]);
    }

    #[test]
    fn fit_caps_vocabulary_size() {
        let docs = ["alpha beta gamma delta", "alpha beta gamma", "alpha beta"];
        let vectorizer = TfidfVectorizer::fit(&docs, 2);

        assert_eq!(vectorizer.dimension(), 2);
        // alpha and beta are the most frequent terms
        assert!(vectorizer.transform("alpha beta").len() == 2);
        assert!(vectorizer.transform("delta").is_empty());
    }

    #[test]
    fn transform_rows_are_l2_normalized() {
        let docs = ["apples oranges pears", "apples bananas"];
        let vectorizer = TfidfVectorizer::fit(&docs, 100);

        let row = vectorizer.transform("apples oranges oranges pears");
        let norm: f64 = row.iter().map(|&(_, v)| v * v).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let docs = ["common rare", "common other", "common word"];
        let vectorizer = TfidfVectorizer::fit(&docs, 100);

        // "common" appears in every document, "rare" in one, so the rare
        // term must carry the larger normalized weight.
        let row = vectorizer.transform("common rare");
        let common_index = vectorizer.transform("common")[0].0;
        let rare_index = vectorizer.transform("rare")[0].0;
        let common_weight = row.iter().find(|&&(i, _)| i == common_index).unwrap().1;
        let rare_weight = row.iter().find(|&&(i, _)| i == rare_index).unwrap().1;
        assert!(rare_weight > common_weight);
    }
}
