// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub mod huggingface;
pub mod ollama;
pub mod openai;

use crate::config::{Config, Provider};
use crate::domain::PromptKind;
use crate::error::{Error, Result};

pub(crate) const SYSTEM_PROMPT: &str = r#"You explain legal documents to people without legal training.

RULES:
1. Use everyday language; define any legal term you must keep
2. Only describe what the document actually says - never invent clauses
3. Be concise: short paragraphs or bullet points
4. You are not giving legal advice; say so if asked for a recommendation"#;

/// A configured AI backend. Built from `Config` and handed to the
/// simplifier explicitly; nothing here is global.
pub enum LlmProvider {
    OpenAi(openai::OpenAiProvider),
    HuggingFace(huggingface::HuggingFaceProvider),
    Ollama(ollama::OllamaProvider),
}

impl LlmProvider {
    pub async fn verify(&self) -> Result<()> {
        match self {
            Self::OpenAi(p) => p.verify_connection().await,
            Self::HuggingFace(p) => p.verify_connection().await,
            Self::Ollama(p) => p.verify_model().await,
        }
    }

    /// Whether the backend can answer this kind of question at all.
    pub fn supports(&self, kind: PromptKind) -> bool {
        match self {
            Self::HuggingFace(_) => kind == PromptKind::Summary,
            Self::OpenAi(_) | Self::Ollama(_) => true,
        }
    }

    /// Answer `kind` about `text`, streaming partial output to `token_tx`.
    pub async fn summarize(
        &self,
        text: &str,
        kind: PromptKind,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String> {
        match self {
            Self::OpenAi(p) => {
                let prompt = kind.to_prompt(text, p.max_prompt_chars());
                p.generate(&prompt, token_tx, cancel).await
            }
            Self::Ollama(p) => {
                let prompt = kind.to_prompt(text, p.max_prompt_chars());
                p.generate(&prompt, token_tx, cancel).await
            }
            Self::HuggingFace(p) => {
                if kind != PromptKind::Summary {
                    return Err(provider_error(
                        p.name(),
                        format!("{} needs a chat model", kind.as_str()),
                    ));
                }
                p.summarize(text, token_tx, cancel).await
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::OpenAi(p) => p.name(),
            Self::HuggingFace(p) => p.name(),
            Self::Ollama(p) => p.name(),
        }
    }
}

/// Split complete lines off the front of `buffer`, keeping any trailing
/// partial line. Stream chunks are not aligned to newlines.
pub(crate) fn take_lines(buffer: &mut String) -> Vec<String> {
    let Some(last_newline) = buffer.rfind('\n') else {
        return Vec::new();
    };
    let rest = buffer.split_off(last_newline + 1);
    let complete = std::mem::replace(buffer, rest);
    complete
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub(crate) fn provider_error(provider: &str, message: impl Into<String>) -> Error {
    Error::Provider {
        provider: provider.into(),
        message: message.into(),
    }
}

pub(crate) fn request_error(provider: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        provider_error(provider, "request timed out")
    } else {
        provider_error(provider, e.to_string())
    }
}

pub fn create_provider(config: &Config) -> Result<LlmProvider> {
    match config.provider {
        Provider::None => Err(Error::ProviderDisabled),
        Provider::OpenAI => Ok(LlmProvider::OpenAi(openai::OpenAiProvider::new(config))),
        Provider::HuggingFace => Ok(LlmProvider::HuggingFace(
            huggingface::HuggingFaceProvider::new(config),
        )),
        Provider::Ollama => Ok(LlmProvider::Ollama(ollama::OllamaProvider::new(config))),
    }
}
