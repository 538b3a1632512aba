// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use console::style;

use crate::domain::{AiAnalysis, AnalysisResults};

const RULE_WIDTH: usize = 70;
const MAX_LISTED_TERMS: usize = 10;

pub struct ReportPresenter;

impl ReportPresenter {
    /// Console rendering of a full analysis. Empty sections are left out.
    pub fn render(results: &AnalysisResults, max_sections: usize) -> String {
        let info = &results.document_info;
        let report = &results.report;
        let rule = "=".repeat(RULE_WIDTH);
        let mut out: Vec<String> = Vec::new();

        out.push(rule.clone());
        out.push(style("LEGAL DOCUMENT ANALYSIS RESULTS").bold().to_string());
        out.push(rule.clone());
        out.push(String::new());
        out.push(format!("Document: {}", info.source));
        out.push(format!(
            "Stats:    {} words, {} characters",
            info.word_count, info.character_count
        ));
        out.push(format!("Analyzed: {}", info.analyzed_at));

        heading(&mut out, "READABILITY");
        let readability = &report.readability;
        out.push(format!(
            "  Complexity: {} ({})",
            readability.level, readability.score
        ));
        let average = readability
            .avg_words_per_sentence
            .map(|avg| format!("{avg:.1}"))
            .unwrap_or_else(|| "N/A".into());
        out.push(format!("  Average words per sentence: {average}"));

        if !report.key_terms.is_empty() {
            heading(&mut out, "LEGAL TERMS FOUND");
            out.extend(
                report
                    .key_terms
                    .iter()
                    .take(MAX_LISTED_TERMS)
                    .map(|t| format!("  • {t}")),
            );
        }

        if report.summary != "." {
            heading(&mut out, "PLAIN LANGUAGE SUMMARY");
            out.push(format!("  {}", report.summary));
        }

        if !report.obligations.is_empty() {
            heading(&mut out, "KEY OBLIGATIONS");
            out.extend(
                report
                    .obligations
                    .iter()
                    .enumerate()
                    .map(|(i, o)| format!("  {}. {o}", i + 1)),
            );
        }

        if !report.risks.is_empty() {
            heading(&mut out, "RISKS AND IMPORTANT WARNINGS");
            out.extend(
                report
                    .risks
                    .iter()
                    .map(|r| format!("  {}", style(r).yellow())),
            );
        }

        let sections = &report.structure.sections;
        if !sections.is_empty() {
            heading(&mut out, "DOCUMENT STRUCTURE");
            out.push(format!("  Sections found: {}", sections.len()));
            out.extend(
                sections
                    .iter()
                    .take(max_sections)
                    .map(|s| format!("  • {s}")),
            );
        }

        match results.ai_analysis {
            Some(ref ai) => render_ai(&mut out, ai),
            None => {
                out.push(String::new());
                out.push(rule.clone());
                out.push(format!(
                    "{} This analysis uses rule-based processing only.",
                    style("Tip:").cyan()
                ));
                out.push("     Configure an AI provider (plainterms init) for richer explanations.".into());
            }
        }

        out.push(rule);
        out.join("\n")
    }
}

fn heading(out: &mut Vec<String>, title: &str) {
    out.push(String::new());
    out.push(style(title).bold().underlined().to_string());
}

fn render_ai(out: &mut Vec<String>, ai: &AiAnalysis) {
    let source = if ai.fallback {
        format!("{}, partly rule-based", ai.provider)
    } else {
        ai.provider.clone()
    };
    heading(out, &format!("AI ANALYSIS ({source})"));

    if let Some(ref error) = ai.error {
        out.push(format!("  {} {error}", style("Provider error:").red()));
    }

    for (title, body) in [
        ("Summary", &ai.summary),
        ("Key points", &ai.key_points),
        ("Potential risks", &ai.risks),
    ] {
        out.push(String::new());
        out.push(format!("  {}", style(title).bold()));
        out.extend(body.lines().map(|line| format!("  {line}")));
    }
    out.push(String::new());
}
