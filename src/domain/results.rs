// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use chrono::{DateTime, Local};
use serde::Serialize;

use super::AnalysisReport;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    /// File path, or `<sample>` / `<stdin>`
    pub source: String,
    pub word_count: usize,
    pub character_count: usize,
    pub analyzed_at: String,
}

impl DocumentInfo {
    pub fn new(source: impl Into<String>, report: &AnalysisReport, at: DateTime<Local>) -> Self {
        Self {
            source: source.into(),
            word_count: report.word_count,
            character_count: report.character_count,
            analyzed_at: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// AI-generated explanations, or rule-based stand-ins when the provider
/// could not answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiAnalysis {
    pub provider: String,
    pub summary: String,
    pub key_points: String,
    pub risks: String,
    /// At least one field came from the rule-based report
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiAnalysis {
    /// Every field filled from the rule-based report.
    pub fn from_report(provider: &str, report: &AnalysisReport, error: Option<String>) -> Self {
        Self {
            provider: provider.to_string(),
            summary: fallback_summary(report),
            key_points: fallback_key_points(report),
            risks: fallback_risks(report),
            fallback: true,
            error,
        }
    }
}

pub fn fallback_summary(report: &AnalysisReport) -> String {
    report.summary.clone()
}

pub fn fallback_key_points(report: &AnalysisReport) -> String {
    if report.obligations.is_empty() {
        return "No key points identified.".into();
    }
    report
        .obligations
        .iter()
        .map(|o| format!("• {o}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn fallback_risks(report: &AnalysisReport) -> String {
    if report.risks.is_empty() {
        return "No obvious risks identified.".into();
    }
    report.risks.join("\n")
}

/// Everything persisted for one analysed document.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResults {
    pub document_info: DocumentInfo,
    pub report: AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
}

impl AnalysisResults {
    pub fn new(document_info: DocumentInfo, report: AnalysisReport) -> Self {
        Self {
            document_info,
            report,
            ai_analysis: None,
        }
    }
}
