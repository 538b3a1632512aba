// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Error, Result};

use super::{SYSTEM_PROMPT, provider_error, request_error, take_lines};

const NAME: &str = "ollama";

/// Local models served by Ollama; the document never leaves the machine.
pub struct OllamaProvider {
    client: Client,
    host: String,
    model: String,
    temperature: f32,
    num_predict: u32,
    max_prompt_chars: usize,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaProvider {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            // Avoid //api/generate
            host: config.ollama_host.trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            temperature: config.temperature,
            num_predict: config.max_tokens,
            max_prompt_chars: config.max_prompt_chars,
        }
    }

    pub fn max_prompt_chars(&self) -> usize {
        self.max_prompt_chars
    }

    /// Names of the locally available models.
    pub async fn health_check(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.host))
            .send()
            .await
            .map_err(|_| Error::OllamaNotRunning {
                host: self.host.clone(),
            })?;

        if !response.status().is_success() {
            return Err(provider_error(
                NAME,
                format!("HTTP {} from /api/tags", response.status()),
            ));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| provider_error(NAME, e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    pub async fn verify_model(&self) -> Result<()> {
        let available = self.health_check().await?;

        // "llama3" is served as "llama3:latest"
        let found = available
            .iter()
            .any(|name| name == &self.model || name == &format!("{}:latest", self.model));

        if !found {
            return Err(Error::ModelNotFound {
                model: self.model.clone(),
                available,
            });
        }

        Ok(())
    }

    pub async fn generate(
        &self,
        prompt: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.host))
            .json(&GenerateRequest {
                model: &self.model,
                system: SYSTEM_PROMPT,
                prompt,
                stream: true,
                options: GenerateOptions {
                    temperature: self.temperature,
                    num_predict: self.num_predict,
                },
            })
            .send()
            .await
            .map_err(|e| request_error(NAME, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(provider_error(NAME, format!("HTTP {status}: {body}")));
        }

        let mut stream = response.bytes_stream();
        let mut answer = String::new();
        let mut line_buffer = String::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(Error::Cancelled);
                }
                chunk = stream.next() => {
                    let Some(chunk) = chunk else { break };
                    let chunk = chunk.map_err(|e| provider_error(NAME, e.to_string()))?;
                    line_buffer.push_str(&String::from_utf8_lossy(&chunk));

                    // Newline-delimited JSON
                    for line in take_lines(&mut line_buffer) {
                        let Ok(resp) = serde_json::from_str::<GenerateResponse>(&line) else {
                            continue;
                        };
                        answer.push_str(&resp.response);
                        let _ = token_tx.send(resp.response).await;
                        if resp.done {
                            return Ok(answer.trim().to_string());
                        }
                    }
                }
            }
        }

        // Last object may arrive without a trailing newline
        if let Ok(resp) = serde_json::from_str::<GenerateResponse>(line_buffer.trim()) {
            answer.push_str(&resp.response);
        }

        Ok(answer.trim().to_string())
    }

    pub fn name(&self) -> &str {
        NAME
    }
}
