use crate::document::Document;
use crate::lexer::tokenize;
use std::collections::HashMap;

/// Word → occurrence count over every document fed in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    total_tokens: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable::default()
    }

    pub fn from_documents(documents: &[Document]) -> Self {
        let mut table = FrequencyTable::new();
        for document in documents {
            table.add_text(&document.contents);
        }
        table
    }

    pub fn add_text(&mut self, text: &str) {
        for token in tokenize(text) {
            *self.counts.entry(token).or_insert(0) += 1;
            self.total_tokens += 1;
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    pub(crate) fn into_counts(self) -> HashMap<String, u64> {
        self.counts
    }
}
