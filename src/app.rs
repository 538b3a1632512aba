// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use miette::Diagnostic;
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::{Config, Provider};
use crate::domain::{AiAnalysis, AnalysisReport, AnalysisResults, DocumentInfo, SAMPLE_AGREEMENT};
use crate::error::{Error, Result};
#[cfg(feature = "secure-storage")]
use crate::services::keychain::Keychain;
use crate::services::{
    analyzer::DocumentAnalyzer, export::ResultsExporter, llm, loader::DocumentLoader,
    presenter::ReportPresenter, simplifier::Simplifier,
};

pub struct App {
    cli: Cli,
    config: Config,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            provider = %config.provider,
            model = %config.model(),
            timeout_secs = config.timeout_secs,
            "config loaded"
        );
        let cancel_token = CancellationToken::new();
        Ok(Self {
            cli,
            config,
            cancel_token,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup Ctrl+C handler with CancellationToken
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        match self.cli.command {
            Commands::Analyze { ref file } => self.analyze_file(file).await,
            Commands::Sample => {
                self.print_status("Using the built-in sample service agreement...");
                self.analyze_text("<sample>", SAMPLE_AGREEMENT).await
            }
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                self.show_config();
                Ok(())
            }
            Commands::Doctor => self.run_doctor().await,
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(shell, &mut cmd, "plainterms", &mut std::io::stdout());
                Ok(())
            }
            #[cfg(feature = "secure-storage")]
            Commands::SetKey { ref provider } => self.set_api_key(provider),
            #[cfg(feature = "secure-storage")]
            Commands::GetKey { ref provider } => self.get_api_key(provider),
        }
    }

    async fn analyze_file(&self, file: &Path) -> Result<()> {
        if file == Path::new("-") {
            let text = DocumentLoader::read_stdin().await?;
            return self.analyze_text("<stdin>", &text).await;
        }

        self.print_status(&format!("Analyzing document: {}", file.display()));
        let text = DocumentLoader::load_or_empty(file).await?;
        if text.trim().is_empty() {
            self.print_warning("No readable text found; the report will be empty");
        }
        self.analyze_text(&file.display().to_string(), &text).await
    }

    async fn analyze_text(&self, source: &str, text: &str) -> Result<()> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let report = DocumentAnalyzer::analyze(text);
        self.print_info(&format!("Document loaded: {} words", report.word_count));

        let info = DocumentInfo::new(source, &report, Local::now());
        let mut results = AnalysisResults::new(info, report);

        if self.ai_enabled() {
            results.ai_analysis = Some(self.run_ai(text, &results.report).await?);
        }

        if self.cli.json {
            println!("{}", ResultsExporter::to_json(&results)?);
        } else {
            println!(
                "\n{}",
                ReportPresenter::render(&results, self.config.output.show_sections)
            );
        }

        self.maybe_save(&results)
    }

    fn ai_enabled(&self) -> bool {
        !self.cli.no_ai && self.config.provider != Provider::None
    }

    async fn run_ai(&self, text: &str, report: &AnalysisReport) -> Result<AiAnalysis> {
        let provider = llm::create_provider(&self.config)?;
        self.print_status(&format!(
            "Getting AI analysis from {} ({})...",
            provider.name(),
            self.config.model()
        ));

        if let Err(e) = provider.verify().await {
            warn!(provider = provider.name(), error = %e, "provider unavailable");
            self.print_warning(&format!("{e}; falling back to rule-based analysis"));
            return Ok(AiAnalysis::from_report(
                provider.name(),
                report,
                Some(e.to_string()),
            ));
        }

        let spinner = self.spinner("Waiting for the model...");
        let (tx, mut rx) = mpsc::channel::<String>(64);
        let cancel_for_progress = self.cancel_token.clone();
        let progress = spinner.clone();
        let progress_handle = tokio::spawn(async move {
            let mut received = 0usize;
            loop {
                tokio::select! {
                    _ = cancel_for_progress.cancelled() => break,
                    token = rx.recv() => {
                        let Some(token) = token else { break };
                        received += token.len();
                        progress.set_message(format!("Receiving answer ({received} chars)..."));
                    }
                }
            }
        });

        let result = Simplifier::simplify(&provider, text, report, tx, &self.cancel_token).await;
        let _ = progress_handle.await;
        spinner.finish_and_clear();

        let analysis = result?;
        if let Some(ref error) = analysis.error {
            self.print_warning(&format!("Some answers are rule-based: {error}"));
        }
        Ok(analysis)
    }

    fn maybe_save(&self, results: &AnalysisResults) -> Result<()> {
        if let Some(ref path) = self.cli.output {
            let saved = ResultsExporter::save(results, path)?;
            self.print_info(&format!("Results saved to: {}", saved.display()));
            return Ok(());
        }

        if self.cli.yes || self.cli.json || !Self::is_interactive() {
            return Ok(());
        }

        let save = Confirm::new()
            .with_prompt("Save results to a JSON file?")
            .default(false)
            .interact()?;

        if save {
            let path: PathBuf = self
                .config
                .output
                .json_dir
                .join(ResultsExporter::default_file_name(Local::now()));
            let saved = ResultsExporter::save(results, &path)?;
            self.print_info(&format!("Results saved to: {}", saved.display()));
        }

        Ok(())
    }

    fn show_config(&self) {
        println!("Provider: {}", self.config.provider);
        println!("Model: {}", self.config.model());
        println!(
            "API key: {}",
            if self.config.api_key.is_some() {
                "configured"
            } else {
                "not set"
            }
        );
        println!("Ollama host: {}", self.config.ollama_host);
        println!("Timeout: {}s", self.config.timeout_secs);
        println!("Temperature: {}", self.config.temperature);
        println!("Max tokens: {}", self.config.max_tokens);
        println!("Max prompt chars: {}", self.config.max_prompt_chars);
        println!();
        println!("[output]");
        println!("  json_dir: {}", self.config.output.json_dir.display());
        println!("  show_sections: {}", self.config.output.show_sections);
    }

    async fn run_doctor(&self) -> Result<()> {
        self.print_status("Checking plainterms setup");

        eprintln!("\n{}", style("Configuration").bold().underlined());
        let config_file = match Config::config_path() {
            Some(path) if path.exists() => path.display().to_string(),
            Some(path) => format!("{} (not created, see plainterms init)", path.display()),
            None => "unavailable".into(),
        };
        for (label, value) in [
            ("config file", config_file),
            ("provider", self.config.provider.to_string()),
            ("model", self.config.model().to_string()),
            ("api key", self.api_key_status().to_string()),
            ("timeout", format!("{}s", self.config.timeout_secs)),
        ] {
            eprintln!("  {label:<12} {value}");
        }

        eprintln!("\n{}", style("AI provider").bold().underlined());
        let verdict = match llm::create_provider(&self.config) {
            Err(Error::ProviderDisabled) => Ok("disabled, analysis is rule-based only".to_string()),
            Err(e) => Err(e),
            Ok(provider) => provider.verify().await.map(|()| {
                format!("{} reachable, model {}", provider.name(), self.config.model())
            }),
        };
        match verdict {
            Ok(message) => eprintln!("  {} {message}", style("ok").green().bold()),
            Err(e) => {
                eprintln!("  {} {e}", style("failed").red().bold());
                if let Some(help) = e.help() {
                    eprintln!("  {}", style(help).yellow());
                }
            }
        }

        eprintln!("\n{}", style("Analyzer").bold().underlined());
        let report = DocumentAnalyzer::analyze(SAMPLE_AGREEMENT);
        eprintln!(
            "  sample agreement: {} sections, {} key terms, {} obligations, {} risks",
            report.structure.sections.len(),
            report.key_terms.len(),
            report.obligations.len(),
            report.risks.len()
        );

        Ok(())
    }

    fn api_key_status(&self) -> &'static str {
        match (self.config.provider.requires_api_key(), &self.config.api_key) {
            (false, _) => "not needed",
            (true, Some(_)) => "set",
            (true, None) => "missing",
        }
    }

    // ─── Keychain ───

    #[cfg(feature = "secure-storage")]
    fn set_api_key(&self, name: &str) -> Result<()> {
        let provider = Keychain::provider(name)?;
        let key = dialoguer::Password::new()
            .with_prompt(format!("{provider} API key (hidden)"))
            .interact()?;

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Config("API key cannot be empty".into()));
        }

        Keychain::store(provider, key)?;
        self.print_info(&format!("{provider} API key saved to the system keychain"));
        Ok(())
    }

    #[cfg(feature = "secure-storage")]
    fn get_api_key(&self, name: &str) -> Result<()> {
        let provider = Keychain::provider(name)?;
        match Keychain::lookup(provider)? {
            Some(_) => self.print_info(&format!("{provider} API key is in the system keychain")),
            None => self.print_warning(&format!(
                "no {provider} API key stored, add one with: plainterms set-key {provider}"
            )),
        }
        Ok(())
    }

    // ─── Output Helpers ───

    fn is_interactive() -> bool {
        std::io::stdout().is_terminal() && std::io::stdin().is_terminal()
    }

    fn spinner(&self, msg: &str) -> ProgressBar {
        if !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}
