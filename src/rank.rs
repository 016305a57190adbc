use crate::frequency::FrequencyTable;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOccurrence {
    pub word: String,
    pub count: u64,
}

impl WordOccurrence {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        WordOccurrence {
            word: word.into(),
            count,
        }
    }
}

/// Every distinct word, most frequent first.
///
/// Equal counts are ordered alphabetically so the output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedList {
    entries: Vec<WordOccurrence>,
}

impl RankedList {
    pub fn from_table(table: FrequencyTable) -> Self {
        let mut entries: Vec<WordOccurrence> = table
            .into_counts()
            .into_iter()
            .map(|(word, count)| WordOccurrence { word, count })
            .collect();
        entries.sort_by(by_rank);
        RankedList { entries }
    }

    /// The first `n` entries, or all of them when fewer than `n` exist.
    pub fn top(&self, n: usize) -> &[WordOccurrence] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[WordOccurrence] {
        &self.entries
    }
}

fn by_rank(a: &WordOccurrence, b: &WordOccurrence) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
}
