// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::model_resolver::ModelResolver;
use crate::providers::huggingface::HuggingFace;

mod app_config;
mod app_controller;
mod cue_translator;
mod errors;
mod file_utils;
mod language_utils;
mod model_resolver;
mod providers;
mod subtitle_processor;

/// CLI wrapper for log levels to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate an SRT subtitle file (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for srtai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input SRT file to translate
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: String,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: String,

    /// Hugging Face API token (falls back to the saved one)
    #[arg(long, env = "HF_TOKEN")]
    token: Option<String>,

    /// Output directory (defaults to ~/Downloads)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// srtai - SRT AI Translator
///
/// Translates SRT subtitle files between natural languages using
/// Helsinki-NLP translation models resolved dynamically by language pair.
#[derive(Parser, Debug)]
#[command(name = "srtai")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered SRT subtitle translation")]
#[command(long_about = "srtai translates SRT subtitle files using Helsinki-NLP machine-translation
models hosted on the Hugging Face Hub, picked automatically for the requested
language pair.

EXAMPLES:
    srtai movie.srt -s en -t pt                 # English to Portuguese
    srtai movie.srt -s en -t pt --token hf_xxx  # Supply and save an API token
    srtai movie.srt -s en -t es -o ./out        # Write somewhere other than ~/Downloads
    srtai completions bash > srtai.bash         # Generate bash completions

The translated file is written as translated_<input-basename> in the output
directory. A supplied --token is saved for later runs; the saved one is used
when the flag is omitted.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input SRT file to translate
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Hugging Face API token (falls back to the saved one)
    #[arg(long, env = "HF_TOKEN")]
    token: Option<String>,

    /// Output directory (defaults to ~/Downloads)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// The log level requested anywhere on the command line, defaulting to Info
fn selected_log_level(cli: &CommandLineOptions) -> LevelFilter {
    let requested = match &cli.command {
        Some(Commands::Translate(args)) => args.log_level.clone(),
        _ => cli.log_level.clone(),
    };
    requested.map(LevelFilter::from).unwrap_or(LevelFilter::Info)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CommandLineOptions::parse();

    // The logger can only be installed once, so it is constructed with the
    // level parsed from the command line rather than adjusted afterwards
    CustomLogger::init(selected_log_level(&cli))?;

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtai", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - treat top-level args as the translate command
            let input_file = cli
                .input_file
                .ok_or_else(|| anyhow!("INPUT_FILE is required when no subcommand is specified"))?;
            let source_language = cli
                .source_language
                .ok_or_else(|| anyhow!("--source-language is required"))?;
            let target_language = cli
                .target_language
                .ok_or_else(|| anyhow!("--target-language is required"))?;

            run_translate(TranslateArgs {
                input_file,
                source_language,
                target_language,
                token: cli.token,
                output_dir: cli.output_dir,
                log_level: cli.log_level,
            })
            .await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if !file_utils::FileManager::file_exists(&options.input_file) {
        return Err(anyhow!(
            "Input file does not exist: {:?}",
            options.input_file
        ));
    }

    language_utils::validate_language_code(&options.source_language)
        .context("Invalid source language")?;
    language_utils::validate_language_code(&options.target_language)
        .context("Invalid target language")?;

    // Resolve the token: an explicitly supplied one wins and is persisted
    // for later runs, otherwise fall back to the saved one.
    let config_path = Config::default_path();
    let mut config = Config::load(&config_path).unwrap_or_default();
    let token = match &options.token {
        Some(token) => {
            if config.hf_token.as_deref() != Some(token.as_str()) {
                config.hf_token = Some(token.clone());
                if let Err(e) = config.save(&config_path) {
                    error!("Could not save API token: {}", e);
                }
            }
            token.clone()
        }
        None => config.hf_token.clone().unwrap_or_default(),
    };

    let provider = HuggingFace::new(token);
    let resolver = ModelResolver::new(Box::new(provider));
    let controller = match options.output_dir {
        Some(dir) => Controller::with_output_dir(resolver, dir),
        None => Controller::new(resolver),
    };

    let progress_bar = ProgressBar::new(0);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} cues ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let result = controller
        .run(
            &options.input_file,
            &options.source_language,
            &options.target_language,
            |current, total| {
                if progress_bar.length() != Some(total as u64) {
                    progress_bar.set_length(total as u64);
                }
                progress_bar.set_position(current as u64);
            },
        )
        .await;

    match result {
        Ok(output_path) => {
            progress_bar.finish_and_clear();
            info!("Translated file saved to: {}", output_path.display());
            println!("{}", output_path.display());
            Ok(())
        }
        Err(e) => {
            progress_bar.abandon();
            error!("Translation failed: {}", e);
            Err(e.into())
        }
    }
}
