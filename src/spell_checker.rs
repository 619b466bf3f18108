//! A dictionary-based spell checker backed by a binary search tree.

use std::{fs, path::Path};

use thiserror::Error;

use crate::{bst::BinarySearchTree, text};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpellCheckError {
    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },
}

#[derive(Debug, Default)]
pub struct SpellChecker {
    dictionary: BinarySearchTree<String>,
}

impl SpellChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        let mut checker = Self::new();
        for word in words {
            checker.add_to_dictionary(word.as_ref());
        }
        checker
    }

    /// Loads a dictionary of whitespace-separated words.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpellCheckError> {
        let contents = read(path.as_ref())?;
        Ok(Self::from_words(contents.split_whitespace()))
    }

    pub fn add_to_dictionary(&mut self, word: &str) {
        if let Some(word) = text::normalize(word) {
            self.dictionary.add(word);
        }
    }

    pub fn remove_from_dictionary(&mut self, word: &str) {
        if let Some(word) = text::normalize(word) {
            self.dictionary.remove(&word);
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        text::normalize(word).map_or(false, |word| self.dictionary.contains(&word))
    }

    pub fn dictionary_size(&self) -> usize {
        self.dictionary.len()
    }

    /// Returns every distinct word of `document` missing from the dictionary,
    /// in alphabetical order.
    pub fn spell_check(&self, document: &str) -> Vec<String> {
        let misspelled: BinarySearchTree<String> = text::words(document)
            .flatten()
            .filter(|word| !self.dictionary.contains(word))
            .collect();
        misspelled.to_vec()
    }

    pub fn spell_check_file(&self, path: impl AsRef<Path>) -> Result<Vec<String>, SpellCheckError> {
        let document = read(path.as_ref())?;
        Ok(self.spell_check(&document))
    }
}

fn read(path: &Path) -> Result<String, SpellCheckError> {
    fs::read_to_string(path).map_err(|e| SpellCheckError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
