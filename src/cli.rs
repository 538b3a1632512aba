// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "plainterms")]
#[command(version)]
#[command(about = "Plain-language insights for legal documents", long_about = None)]
pub struct Cli {
    /// AI provider (none, openai, huggingface, ollama)
    #[arg(short, long, global = true, env = "PLAINTERMS_PROVIDER")]
    pub provider: Option<String>,

    /// Model name
    #[arg(short, long, global = true, env = "PLAINTERMS_MODEL")]
    pub model: Option<String>,

    /// Skip the AI analysis even if a provider is configured
    #[arg(long, global = true)]
    pub no_ai: bool,

    /// Save results as JSON to this path
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Print results as JSON instead of the console report
    #[arg(long, global = true)]
    pub json: bool,

    /// Never prompt (don't offer to save results)
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Analyze a .txt or .pdf document (`-` reads stdin)
    Analyze {
        /// Path to the document
        file: PathBuf,
    },
    /// Analyze the built-in sample service agreement
    Sample,
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Check configuration and provider connectivity
    Doctor,
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
    /// Store an API key in the system keychain
    #[cfg(feature = "secure-storage")]
    SetKey {
        /// Provider (openai, huggingface)
        provider: String,
    },
    /// Check whether an API key is stored in the system keychain
    #[cfg(feature = "secure-storage")]
    GetKey {
        /// Provider (openai, huggingface)
        provider: String,
    },
}
