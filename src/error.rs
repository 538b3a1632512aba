// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Document not found: {path}")]
    #[diagnostic(
        code(plainterms::loader::not_found),
        help("Check the path, or try the built-in agreement with: plainterms sample")
    )]
    DocumentNotFound { path: String },

    #[error("Could not read {path}: {message}")]
    #[diagnostic(code(plainterms::loader::unreadable))]
    Unreadable { path: String, message: String },

    #[error("No text entered")]
    #[diagnostic(
        code(plainterms::loader::empty_input),
        help("Pipe the contract text in, e.g.: cat contract.txt | plainterms analyze -")
    )]
    EmptyInput,

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("No AI provider configured")]
    #[diagnostic(
        code(plainterms::provider::disabled),
        help("Pass --provider openai|huggingface|ollama or set `provider` in the config file")
    )]
    ProviderDisabled,

    #[error("Cannot connect to Ollama at {host}")]
    #[diagnostic(
        code(plainterms::ollama::not_running),
        help("Start Ollama with: ollama serve")
    )]
    OllamaNotRunning { host: String },

    #[error("Model '{model}' not found. Available: {}", available.join(", "))]
    #[diagnostic(
        code(plainterms::ollama::model_not_found),
        help("Pull the model with: ollama pull {model}")
    )]
    ModelNotFound {
        model: String,
        available: Vec<String>,
    },

    #[error("Provider '{provider}' error: {message}")]
    #[diagnostic(code(plainterms::provider::error))]
    Provider { provider: String, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(plainterms::config::error))]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(plainterms::export::json))]
    Json(#[from] serde_json::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(plainterms::keyring::error),
        help("Check your system keychain configuration")
    )]
    Keyring(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
