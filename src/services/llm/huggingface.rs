// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

use super::{provider_error, request_error};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
const NAME: &str = "huggingface";

/// Summarization models accept about 1024 tokens; chunk by characters.
const CHUNK_CHARS: usize = 1024;
const MAX_CHUNKS: usize = 3;
/// Chunks this short are not worth a request
const MIN_CHUNK_CHARS: usize = 100;

const SUMMARY_MAX_LENGTH: u32 = 150;
const SUMMARY_MIN_LENGTH: u32 = 50;

/// HuggingFace Inference API, summarization pipeline only.
pub struct HuggingFaceProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
}

#[derive(Serialize)]
struct SummarizationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}

impl HuggingFaceProvider {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config
                .huggingface_base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: config.model().to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
        }
    }

    pub async fn verify_connection(&self) -> Result<()> {
        // The inference API has no cheap authenticated ping
        if self.api_key.is_empty() {
            return Err(provider_error(NAME, "API token not configured"));
        }
        Ok(())
    }

    /// Summarize the first few substantial chunks of `text` and join the results.
    pub async fn summarize(
        &self,
        text: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String> {
        let mut summaries = Vec::new();

        for chunk in summary_chunks(text) {
            let summary = tokio::select! {
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                result = self.summarize_chunk(&chunk) => result?,
            };
            let _ = token_tx.send(summary.clone()).await;
            summaries.push(summary);
        }

        debug!(chunks = summaries.len(), "huggingface summaries received");
        Ok(summaries.join(" "))
    }

    async fn summarize_chunk(&self, chunk: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .bearer_auth(&self.api_key)
            .json(&SummarizationRequest {
                inputs: chunk,
                parameters: SummarizationParameters {
                    max_length: SUMMARY_MAX_LENGTH,
                    min_length: SUMMARY_MIN_LENGTH,
                    do_sample: false,
                },
            })
            .send()
            .await
            .map_err(|e| request_error(NAME, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| request_error(NAME, e))?;

        if !status.is_success() {
            // The API reports "model is loading" and similar as {"error": "..."}
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(provider_error(NAME, format!("HTTP {status}: {message}")));
        }

        let outputs: Vec<SummaryOutput> = serde_json::from_str(&body)
            .map_err(|e| provider_error(NAME, format!("unexpected response: {e}")))?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .ok_or_else(|| provider_error(NAME, "empty summary list"))
    }

    pub fn name(&self) -> &str {
        NAME
    }
}

/// First `MAX_CHUNKS` fixed-size chunks of `text`, minus the ones too
/// short to summarize.
pub fn summary_chunks(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(CHUNK_CHARS)
        .take(MAX_CHUNKS)
        .map(|c| c.iter().collect::<String>())
        .filter(|c| c.trim().chars().count() > MIN_CHUNK_CHARS)
        .collect()
}
