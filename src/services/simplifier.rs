// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{
    AiAnalysis, AnalysisReport, PromptKind, fallback_key_points, fallback_risks, fallback_summary,
};
use crate::error::{Error, Result};

use super::llm::LlmProvider;
use super::text::normalize;

pub struct Simplifier;

impl Simplifier {
    /// Ask `provider` for a summary, key points and risks of `text`.
    ///
    /// A failed or empty answer is replaced by the matching rule-based
    /// content from `report`; only cancellation is returned as an error.
    pub async fn simplify(
        provider: &LlmProvider,
        text: &str,
        report: &AnalysisReport,
        token_tx: mpsc::Sender<String>,
        cancel: &CancellationToken,
    ) -> Result<AiAnalysis> {
        let cleaned = normalize(text);
        let mut errors: Vec<String> = Vec::new();
        let mut fallback = false;
        let mut answers: Vec<String> = Vec::with_capacity(PromptKind::ALL.len());

        for &kind in PromptKind::ALL {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            if !provider.supports(kind) {
                debug!(
                    kind = kind.as_str(),
                    provider = provider.name(),
                    "not supported, using rule-based"
                );
                fallback = true;
                answers.push(rule_based(kind, report));
                continue;
            }

            match provider
                .summarize(&cleaned, kind, token_tx.clone(), cancel.clone())
                .await
            {
                Ok(answer) if !answer.trim().is_empty() => answers.push(answer),
                Ok(_) => {
                    warn!(kind = kind.as_str(), "empty response from provider");
                    fallback = true;
                    answers.push(rule_based(kind, report));
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => {
                    warn!(kind = kind.as_str(), error = %e, "provider failed, using rule-based");
                    errors.push(e.to_string());
                    fallback = true;
                    answers.push(rule_based(kind, report));
                }
            }
        }

        let mut answers = answers.into_iter();
        Ok(AiAnalysis {
            provider: provider.name().to_string(),
            summary: answers.next().unwrap_or_default(),
            key_points: answers.next().unwrap_or_default(),
            risks: answers.next().unwrap_or_default(),
            fallback,
            error: (!errors.is_empty()).then(|| errors.join("; ")),
        })
    }
}

fn rule_based(kind: PromptKind, report: &AnalysisReport) -> String {
    match kind {
        PromptKind::Summary => fallback_summary(report),
        PromptKind::KeyPoints => fallback_key_points(report),
        PromptKind::Risks => fallback_risks(report),
    }
}
