//! A first-order Markov model of word successions.
//!
//! The model counts, for every word of a corpus, how often each other word
//! directly follows it. Text is generated from those counts either by taking
//! the most frequent successors or by sampling them in proportion to their
//! counts.

use std::{collections::HashMap, fs, path::Path};

use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::text;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct WordProbabilityModel {
    chain: HashMap<String, HashMap<String, usize>>,
}

impl WordProbabilityModel {
    /// Builds the model in a single pass over `corpus`.
    ///
    /// A token that normalises to nothing (e.g. `"--"`) ends the current run,
    /// so the words on either side of it are not linked.
    pub fn from_text(corpus: &str) -> Self {
        let mut chain: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut previous: Option<String> = None;

        for word in text::words(corpus) {
            if let (Some(previous), Some(word)) = (&previous, &word) {
                *chain
                    .entry(previous.clone())
                    .or_default()
                    .entry(word.clone())
                    .or_insert(0) += 1;
            }
            previous = word;
        }

        let model = Self { chain };
        debug!(
            "built word model with {} words and {} distinct transitions",
            model.vocabulary_size(),
            model.chain.values().map(HashMap::len).sum::<usize>()
        );
        model
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let corpus = fs::read_to_string(path).map_err(|e| ModelError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_text(&corpus))
    }

    /// How often each word follows `word`.
    pub fn successors(&self, word: &str) -> Option<&HashMap<String, usize>> {
        self.chain.get(word)
    }

    /// Number of words that have at least one successor.
    pub fn vocabulary_size(&self) -> usize {
        self.chain.len()
    }

    /// The up to `k` most probable successors of `seed`, most probable first,
    /// separated by spaces. Equally probable words are listed alphabetically.
    pub fn generate_text(&self, seed: &str, k: usize) -> String {
        let Some(successors) = self.lookup(seed) else {
            return String::new();
        };

        let mut ranked: Vec<(&String, &usize)> = successors.iter().collect();
        ranked.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
        ranked
            .into_iter()
            .take(k)
            .map(|(word, _)| word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `n` words starting with `seed`, each followed by its most frequent
    /// successor (alphabetically first on ties).
    pub fn generate_text_one(&self, seed: &str, n: usize) -> String {
        self.walk(seed, n, |successors| {
            successors
                .iter()
                .max_by(|(a, a_count), (b, b_count)| a_count.cmp(b_count).then_with(|| b.cmp(a)))
                .map(|(word, _)| word.as_str())
        })
    }

    /// `n` words starting with `seed`, each followed by a successor drawn
    /// with probability proportional to how often it follows.
    pub fn generate_text_all<R: Rng + ?Sized>(&self, seed: &str, n: usize, rng: &mut R) -> String {
        self.walk(seed, n, |successors| {
            // Sorting keeps the outcome a function of the generator alone.
            let mut candidates: Vec<(&String, &usize)> = successors.iter().collect();
            candidates.sort();

            let total: usize = candidates.iter().map(|(_, &count)| count).sum();
            if total == 0 {
                return None;
            }
            let mut target = rng.gen_range(0..total);
            for (word, &count) in candidates {
                if target < count {
                    return Some(word.as_str());
                }
                target -= count;
            }
            None
        })
    }

    // Emits `n` words starting from the normalised seed, choosing each next
    // word with `next`. Whenever a word has no successor the walk restarts
    // from the seed.
    fn walk<'a, F>(&'a self, seed: &str, n: usize, mut next: F) -> String
    where
        F: FnMut(&'a HashMap<String, usize>) -> Option<&'a str>,
    {
        let Some(seed) = text::normalize(seed) else {
            return String::new();
        };
        if n == 0 {
            return String::new();
        }

        let mut words: Vec<&str> = Vec::with_capacity(n);
        words.push(&seed);
        let mut current: &str = &seed;
        for _ in 1..n {
            current = self
                .chain
                .get(current)
                .and_then(&mut next)
                .unwrap_or(&seed);
            words.push(current);
        }
        words.join(" ")
    }

    fn lookup(&self, word: &str) -> Option<&HashMap<String, usize>> {
        text::normalize(word).and_then(|word| self.chain.get(&word))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    const CORPUS: &str = indoc! {"
        The cat sat. The cat ran. The dog sat.
        A cat -- a dog.
    "};

    fn count(model: &WordProbabilityModel, word: &str, next: &str) -> Option<usize> {
        model.successors(word)?.get(next).copied()
    }

    #[test]
    fn counts_successions() {
        let model = WordProbabilityModel::from_text(CORPUS);
        assert_eq!(count(&model, "the", "cat"), Some(2));
        assert_eq!(count(&model, "the", "dog"), Some(1));
        assert_eq!(count(&model, "cat", "sat"), Some(1));
        assert_eq!(count(&model, "sat", "the"), Some(1));
        assert_eq!(count(&model, "a", "cat"), Some(1));
    }

    #[test]
    fn empty_tokens_break_the_chain() {
        let model = WordProbabilityModel::from_text(CORPUS);
        assert_eq!(count(&model, "cat", "a"), None);
        assert!(model.successors("").is_none());
    }

    #[test]
    fn most_probable_successors() {
        let model = WordProbabilityModel::from_text(CORPUS);
        assert_eq!(model.generate_text("the", 1), "cat");
        assert_eq!(model.generate_text("The", 5), "cat dog");
        assert_eq!(model.generate_text("cat", 2), "ran sat");
        assert_eq!(model.generate_text("unknown", 3), "");
        assert_eq!(model.generate_text("the", 0), "");
    }

    #[test]
    fn one_follows_the_most_frequent_successor() {
        let model = WordProbabilityModel::from_text(CORPUS);
        assert_eq!(model.generate_text_one("the", 5), "the cat ran the cat");
    }

    #[test]
    fn walks_restart_from_the_seed() {
        let model = WordProbabilityModel::from_text("alpha beta");
        assert_eq!(model.generate_text_one("alpha", 5), "alpha beta alpha beta alpha");
        assert_eq!(model.generate_text_one("omega", 3), "omega omega omega");
    }

    #[test]
    fn degenerate_walks() {
        let model = WordProbabilityModel::from_text(CORPUS);
        assert_eq!(model.generate_text_one("the", 0), "");
        assert_eq!(model.generate_text_one("the", 1), "the");
        assert_eq!(model.generate_text_one("...", 4), "");
    }

    #[test]
    fn all_samples_only_observed_successors() {
        let model = WordProbabilityModel::from_text(CORPUS);
        let mut rng = StdRng::seed_from_u64(11);
        let text = model.generate_text_all("the", 200, &mut rng);
        let words: Vec<&str> = text.split(' ').collect();
        assert_eq!(words.len(), 200);
        for pair in words.windows(2) {
            let observed = count(&model, pair[0], pair[1]).is_some();
            let restarted = model.successors(pair[0]).is_none() && pair[1] == "the";
            assert!(observed || restarted, "{:?}", pair);
        }
    }

    #[test]
    fn all_is_reproducible_with_a_seeded_rng() {
        let model = WordProbabilityModel::from_text(CORPUS);
        let first = model.generate_text_all("the", 30, &mut StdRng::seed_from_u64(5));
        let second = model.generate_text_all("the", 30, &mut StdRng::seed_from_u64(5));
        assert_eq!(first, second);
    }

    #[test]
    fn missing_corpus() {
        assert!(matches!(
            WordProbabilityModel::from_file("/nonexistent/corpus.txt"),
            Err(ModelError::Io { .. })
        ));
    }
}
