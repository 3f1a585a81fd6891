// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::{Controller, RunOptions};

mod app_config;
mod app_controller;
mod doubled_hymns;
mod errors;
mod file_utils;
mod indent_rules;
mod markup_emitter;
mod meter;
mod record_matcher;
mod stanza_engine;
mod transcript_processor;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a hymn transcript into ebook section markup (default command)
    Build(BuildArgs),

    /// Generate shell completions for hymnbook
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Transcript base name, e.g. book-1; the trailing digit selects the book
    #[arg(value_name = "BASE_NAME")]
    base_name: String,

    /// Metadata CSV file (default: ../<prefix><base name>.csv)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output file (default: <base name>.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Hymnbook - Olney Hymns transcript converter
///
/// Converts a plain-text hymn transcript into the XHTML section markup of a
/// digital-book page, validating every hymn against the collection's
/// metadata table along the way.
#[derive(Parser, Debug)]
#[command(name = "hymnbook")]
#[command(version = "1.0.0")]
#[command(about = "Hymn transcript to ebook markup converter")]
#[command(long_about = "Hymnbook pairs every hymn block of a transcript with its row in the
collection's metadata table, validates titles, author flags, meters and
stanza line counts, and writes the hymns as XHTML sections.

EXAMPLES:
    hymnbook book-1                             # Convert Book I using default config
    hymnbook --csv ../olney-book-2.csv book-2   # Explicit metadata table
    hymnbook -o out/book-3.txt book-3           # Explicit output file
    hymnbook --log-level debug book-1           # Trace every hymn and stanza
    hymnbook completions bash > hymnbook.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript base name, e.g. book-1; the trailing digit selects the book
    #[arg(value_name = "BASE_NAME")]
    base_name: Option<String>,

    /// Metadata CSV file (default: ../<prefix><base name>.csv)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output file (default: <base name>.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

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

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "hymnbook", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Build(args)) => run_build(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let base_name = cli
                .base_name
                .ok_or_else(|| anyhow!("BASE_NAME is required when no subcommand is specified"))?;

            let build_args = BuildArgs {
                base_name,
                csv: cli.csv,
                output: cli.output,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_build(build_args)
        }
    }
}

fn run_build(options: BuildArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();

        // Apply command line log level to default config if specified
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller and run the conversion
    let controller = Controller::with_config(config)?;
    controller.run(&RunOptions {
        base_name: options.base_name,
        csv_path: options.csv,
        output_path: options.output,
    })
}
