// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeSet;

use serde::Serialize;

/// Output of the rule-based analysis of a single document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub word_count: usize,
    pub character_count: usize,
    pub key_terms: BTreeSet<String>,
    pub structure: DocumentStructure,
    pub summary: String,
    pub obligations: Vec<String>,
    pub risks: Vec<String>,
    pub readability: Readability,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStructure {
    /// Numbered section headings, e.g. "3. CONFIDENTIALITY"
    pub sections: Vec<String>,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_sentence_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityTier {
    Easy,
    Moderate,
    Difficult,
    /// No sentences to measure
    Unscored,
}

impl ReadabilityTier {
    /// Tier for a given average sentence length in words.
    pub fn from_average(avg_words_per_sentence: f64) -> Self {
        if avg_words_per_sentence < 15.0 {
            Self::Easy
        } else if avg_words_per_sentence < 25.0 {
            Self::Moderate
        } else {
            Self::Difficult
        }
    }

    pub fn level(&self) -> &'static str {
        match self {
            Self::Easy => "Easy to read",
            Self::Moderate => "Moderate difficulty",
            Self::Difficult => "Difficult to read",
            Self::Unscored => "Unable to calculate",
        }
    }

    pub fn score(&self) -> &'static str {
        match self {
            Self::Easy => "Good",
            Self::Moderate => "Fair",
            Self::Difficult => "Complex",
            Self::Unscored => "N/A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readability {
    pub tier: ReadabilityTier,
    pub level: &'static str,
    pub score: &'static str,
    /// Rounded to one decimal; `None` when there are no sentences
    pub avg_words_per_sentence: Option<f64>,
    pub total_words: usize,
    pub total_sentences: usize,
}

impl Readability {
    pub fn new(total_words: usize, total_sentences: usize) -> Self {
        if total_sentences == 0 {
            return Self {
                tier: ReadabilityTier::Unscored,
                level: ReadabilityTier::Unscored.level(),
                score: ReadabilityTier::Unscored.score(),
                avg_words_per_sentence: None,
                total_words,
                total_sentences,
            };
        }

        let avg = total_words as f64 / total_sentences as f64;
        let tier = ReadabilityTier::from_average(avg);
        Self {
            tier,
            level: tier.level(),
            score: tier.score(),
            avg_words_per_sentence: Some((avg * 10.0).round() / 10.0),
            total_words,
            total_sentences,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.tier != ReadabilityTier::Unscored
    }
}
