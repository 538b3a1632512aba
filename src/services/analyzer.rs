// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{AnalysisReport, DocumentStructure, Indicator, Readability};

use super::text::{normalize, sentences, word_count};

const MAX_SUMMARY_SENTENCES: usize = 4;
/// Segments must be longer than this (untrimmed) to enter the summary
const MIN_SUMMARY_SEGMENT_CHARS: usize = 20;
const MAX_OBLIGATIONS: usize = 6;
const MAX_RISKS: usize = 5;
const PREVIEW_CHARS: usize = 300;

pub const RISK_MARKER: &str = "⚠️ ";

/// Applied in order, each over the whole sentence before the next one.
pub const OBLIGATION_REWRITES: &[(&str, &str)] = &[
    ("The Client", "You"),
    ("The Provider", "The service provider"),
    ("shall", "must"),
];

/// Ordered term patterns, all case-insensitive.
static TERM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+Agreement\b",
        r"(?i)\bterms?\s+(?:and\s+)?conditions?\b",
        r"(?i)\bliability\b",
        r"(?i)\bindemnif\w+\b",
        r"(?i)\bwarrant\w+\b",
        r"(?i)\bgoverning\s+law\b",
        r"(?i)\bjurisdiction\b",
        r"(?i)\barbitration\b",
        r"(?i)\bconfidential\w*\b",
        r"(?i)\btermination\b",
        r"(?i)\bpayment\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").unwrap());

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

pub struct DocumentAnalyzer;

impl DocumentAnalyzer {
    /// Run the full rule-based pipeline over raw document text.
    ///
    /// Section and paragraph detection look at the raw lines, since
    /// normalization folds newlines away; every other step works on the
    /// normalized text. Never fails: degenerate input yields empty fields.
    pub fn analyze(raw: &str) -> AnalysisReport {
        let cleaned = normalize(raw);

        let report = AnalysisReport {
            word_count: word_count(&cleaned),
            character_count: cleaned.chars().count(),
            key_terms: extract_key_terms(&cleaned),
            structure: analyze_structure(raw, &cleaned),
            summary: summarize(&cleaned),
            obligations: extract_obligations(&cleaned),
            risks: extract_risks(&cleaned),
            readability: score_readability(&cleaned),
            preview: preview(&cleaned),
        };

        debug!(
            words = report.word_count,
            terms = report.key_terms.len(),
            sections = report.structure.sections.len(),
            obligations = report.obligations.len(),
            risks = report.risks.len(),
            readability = report.readability.level,
            "document analyzed"
        );

        report
    }
}

/// Union of all term pattern matches, as written in the document.
pub fn extract_key_terms(cleaned: &str) -> BTreeSet<String> {
    TERM_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(cleaned))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn analyze_structure(raw: &str, cleaned: &str) -> DocumentStructure {
    let sections = raw
        .lines()
        .map(str::trim)
        .filter(|line| SECTION_HEADING.is_match(line))
        .map(normalize)
        .collect();

    let paragraph_count = PARAGRAPH_BREAK
        .split(raw)
        .filter(|p| !p.trim().is_empty())
        .count();

    let sentence_lengths: Vec<usize> = sentences(cleaned).map(word_count).collect();
    let avg_sentence_length = if sentence_lengths.is_empty() {
        0.0
    } else {
        sentence_lengths.iter().sum::<usize>() as f64 / sentence_lengths.len() as f64
    };

    DocumentStructure {
        sections,
        sentence_count: sentence_lengths.len(),
        paragraph_count,
        avg_sentence_length,
    }
}

/// First substantial sentence plus up to three more that carry a summary
/// indicator. Returns `"."` when nothing qualifies.
pub fn summarize(cleaned: &str) -> String {
    let mut candidates = cleaned
        .split('.')
        .filter(|s| s.chars().count() > MIN_SUMMARY_SEGMENT_CHARS)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut selected: Vec<&str> = Vec::with_capacity(MAX_SUMMARY_SENTENCES);
    if let Some(first) = candidates.next() {
        selected.push(first);
    }

    for sentence in candidates {
        if selected.len() >= MAX_SUMMARY_SENTENCES {
            break;
        }
        if Indicator::Summary.matches(sentence) {
            selected.push(sentence);
        }
    }

    format!("{}.", selected.join(". "))
}

pub fn rewrite_obligation(sentence: &str) -> String {
    OBLIGATION_REWRITES
        .iter()
        .fold(sentence.to_string(), |acc, (from, to)| acc.replace(from, to))
}

pub fn extract_obligations(cleaned: &str) -> Vec<String> {
    sentences(cleaned)
        .filter(|s| Indicator::Obligation.matches(s))
        .take(MAX_OBLIGATIONS)
        .map(rewrite_obligation)
        .collect()
}

pub fn extract_risks(cleaned: &str) -> Vec<String> {
    sentences(cleaned)
        .filter(|s| Indicator::Risk.matches(s))
        .take(MAX_RISKS)
        .map(|s| format!("{RISK_MARKER}{s}"))
        .collect()
}

pub fn score_readability(cleaned: &str) -> Readability {
    Readability::new(word_count(cleaned), sentences(cleaned).count())
}

/// First 300 characters, with an ellipsis when the text was cut.
pub fn preview(cleaned: &str) -> String {
    if cleaned.chars().count() > PREVIEW_CHARS {
        let head: String = cleaned.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        cleaned.to_string()
    }
}
