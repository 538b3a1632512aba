// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Directory for JSON results saved without an explicit path (default: ".")
    #[serde(default = "default_json_dir")]
    pub json_dir: PathBuf,

    /// Number of section headings listed in the console report (default: 5)
    #[serde(default = "default_show_sections")]
    pub show_sections: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            json_dir: default_json_dir(),
            show_sections: default_show_sections(),
        }
    }
}

fn default_json_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_show_sections() -> usize {
    5
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Rule-based analysis only
    #[default]
    None,
    OpenAI,
    HuggingFace,
    Ollama,
}

impl Provider {
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::OpenAI => "gpt-3.5-turbo",
            Self::HuggingFace => "sshleifer/distilbart-cnn-12-6",
            Self::Ollama => "qwen3:4b",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI | Self::HuggingFace)
    }

    fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::HuggingFace => Some("HF_API_TOKEN"),
            Self::None | Self::Ollama => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::OpenAI => write!(f, "openai"),
            Self::HuggingFace => write!(f, "huggingface"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "openai" => Ok(Self::OpenAI),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            other => Err(Error::Config(format!(
                "unknown provider '{other}' (expected none, openai, huggingface, ollama)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: Provider,

    /// Model name; each provider has its own default
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for OpenAI-compatible APIs (default: https://api.openai.com/v1)
    #[serde(default)]
    pub openai_base_url: Option<String>,

    /// Base URL for the HuggingFace Inference API (default: https://api-inference.huggingface.co)
    #[serde(default)]
    pub huggingface_base_url: Option<String>,

    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,

    /// Request timeout in seconds (default 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// LLM temperature (0.0-2.0, default 0.3)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate per answer (default 500)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Document characters included in each prompt (default 2000)
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,

    #[serde(default)]
    pub output: OutputOptions,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".into()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_tokens() -> u32 {
    500
}
fn default_max_prompt_chars() -> usize {
    2_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            api_key: None,
            openai_base_url: None,
            huggingface_base_url: None,
            ollama_host: default_ollama_host(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_prompt_chars: default_max_prompt_chars(),
            output: OutputOptions::default(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.plainterms.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".plainterms.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // PLAINTERMS_PROVIDER, PLAINTERMS_OUTPUT__JSON_DIR, ...
        figment = figment.merge(Env::prefixed("PLAINTERMS_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // CLI overrides (highest priority); applied before key lookup so
        // --provider picks up the matching key
        config.apply_cli(cli)?;
        config.resolve_api_key();
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "plainterms").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Configured model, or the provider's default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(ref p) = cli.provider {
            self.provider = p.parse()?;
        }
        if let Some(ref m) = cli.model {
            self.model = Some(m.clone());
        }
        Ok(())
    }

    fn resolve_api_key(&mut self) {
        if self.api_key.is_some() {
            return;
        }

        self.api_key = self
            .provider
            .api_key_env()
            .and_then(|var| std::env::var(var).ok());

        #[cfg(feature = "secure-storage")]
        if self.api_key.is_none() && self.provider.requires_api_key() {
            match crate::services::keychain::Keychain::lookup(self.provider) {
                Ok(key) => self.api_key = key,
                Err(e) => tracing::debug!(error = %e, "keychain lookup failed"),
            }
        }
    }

    /// Range and URL checks only. A missing API key is left to provider
    /// verification so rule-based runs keep working.
    pub fn validate(&self) -> Result<()> {
        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be 0.0–2.0, got {}",
                self.temperature
            )));
        }

        if !(16..=8_192).contains(&self.max_tokens) {
            return Err(Error::Config(format!(
                "max_tokens must be 16–8192, got {}",
                self.max_tokens
            )));
        }

        if !(100..=100_000).contains(&self.max_prompt_chars) {
            return Err(Error::Config(format!(
                "max_prompt_chars must be 100–100000, got {}",
                self.max_prompt_chars
            )));
        }

        validate_http_url("ollama_host", &self.ollama_host)?;
        if let Some(ref base) = self.openai_base_url {
            validate_http_url("openai_base_url", base)?;
        }
        if let Some(ref base) = self.huggingface_base_url {
            validate_http_url("huggingface_base_url", base)?;
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# plainterms configuration

# AI provider: none, openai, huggingface, ollama
# "none" keeps the analysis fully rule-based and offline.
provider = "none"

# Model name (defaults: gpt-3.5-turbo, sshleifer/distilbart-cnn-12-6, qwen3:4b)
# model = "gpt-3.5-turbo"

# Ollama server URL
ollama_host = "http://localhost:11434"

# Request timeout in seconds
timeout_secs = 60

# Characters of the document sent with each prompt
max_prompt_chars = 2000

[output]
# Where results are saved when no --output path is given
json_dir = "."

# Section headings listed in the console report
show_sections = 5
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Config(format!("{field} cannot be empty")));
    }

    let url = Url::parse(value)
        .map_err(|e| Error::Config(format!("{field} is not a valid URL ('{value}'): {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::Config(format!(
            "{field} must start with http:// or https://, got '{value}'"
        )));
    }

    Ok(())
}
