//! Importance scoring for atomic units

use crate::config::Lexicon;

/// An atomic unit with its importance score and original position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredUnit {
    pub text: String,
    pub score: usize,
    /// Index within the section before any reordering
    pub position: usize,
}

/// Counts importance keyword occurrences
#[derive(Debug, Clone)]
pub struct Scorer {
    keywords: Vec<String>,
}

impl Scorer {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            keywords: lexicon
                .important_words
                .iter()
                .filter(|w| !w.is_empty())
                .cloned()
                .collect(),
        }
    }

    /// Sum of non-overlapping literal occurrences of every keyword
    pub fn score(&self, unit: &str) -> usize {
        self.keywords.iter().map(|k| unit.matches(k.as_str()).count()).sum()
    }

    pub fn score_units(&self, units: Vec<String>) -> Vec<ScoredUnit> {
        units
            .into_iter()
            .enumerate()
            .map(|(position, text)| ScoredUnit {
                score: self.score(&text),
                text,
                position,
            })
            .collect()
    }
}
