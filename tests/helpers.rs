// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeSet;

use plainterms::domain::{AnalysisReport, AnalysisResults, DocumentInfo, SAMPLE_AGREEMENT};
use plainterms::services::analyzer::DocumentAnalyzer;

/// Report for the built-in service agreement
#[allow(dead_code)]
pub fn sample_report() -> AnalysisReport {
    DocumentAnalyzer::analyze(SAMPLE_AGREEMENT)
}

/// Key terms folded to lowercase, for case-insensitive membership checks
#[allow(dead_code)]
pub fn lowercase_terms(report: &AnalysisReport) -> BTreeSet<String> {
    report.key_terms.iter().map(|t| t.to_lowercase()).collect()
}

/// Wrap a report with fixed document info so output is deterministic
#[allow(dead_code)]
pub fn make_results(source: &str, report: AnalysisReport) -> AnalysisResults {
    let info = DocumentInfo {
        source: source.to_string(),
        word_count: report.word_count,
        character_count: report.character_count,
        analyzed_at: "2026-01-02 09:30:00".to_string(),
    };
    AnalysisResults::new(info, report)
}

/// `n` words followed by a period
#[allow(dead_code)]
pub fn sentence_of(n: usize) -> String {
    let words: Vec<&str> = std::iter::repeat_n("word", n).collect();
    format!("{}.", words.join(" "))
}
