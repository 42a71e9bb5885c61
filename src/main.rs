// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod document;
mod errors;
mod file_utils;
mod frame_extractor;
mod subtitle_processor;

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
    /// Convert a captioned video into an illustrated org document (default command)
    #[command(alias = "convert")]
    Convert(ConvertArgs),

    /// Generate shell completions for videobook
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Video file to capture chapter frames from
    #[arg(value_name = "VIDEO")]
    video_path: PathBuf,

    /// Timed-text subtitle file (format marker on line 1)
    #[arg(value_name = "SUBTITLE")]
    subtitle_path: PathBuf,

    /// Directory receiving the document and chapter images
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// JPEG quality for captured frames (1 best - 31 worst)
    #[arg(short = 'q', long)]
    image_quality: Option<u8>,

    /// Path of the ffmpeg binary to invoke
    #[arg(long)]
    ffmpeg_path: Option<String>,
}

/// videobook - Captioned Video to Illustrated Document Converter
///
/// Converts a video plus its subtitle file into a paginated org document
/// where every cue becomes a chapter illustrated with a still frame.
#[derive(Parser, Debug)]
#[command(name = "videobook")]
#[command(version = "1.0.0")]
#[command(about = "Turn a captioned video into an illustrated org document")]
#[command(long_about = "videobook reads a timed-text subtitle file, captures one still frame per
cue from the video with ffmpeg, and writes a single org document where
every cue is a chapter with its frame and caption text.

EXAMPLES:
    videobook movie.mkv movie.vtt out/          # Convert with default config
    videobook -q 5 movie.mkv movie.vtt out/     # Lower-quality chapter frames
    videobook --log-level debug movie.mkv movie.vtt out/
    videobook completions bash > videobook.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.

NOTES:
    ffmpeg must be reachable (PATH or --ffmpeg-path). Frames captured by a
    previous run are never overwritten; the document file is rewritten on
    every run.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video file to capture chapter frames from
    #[arg(value_name = "VIDEO")]
    video_path: Option<PathBuf>,

    /// Timed-text subtitle file (format marker on line 1)
    #[arg(value_name = "SUBTITLE")]
    subtitle_path: Option<PathBuf>,

    /// Directory receiving the document and chapter images
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// JPEG quality for captured frames (1 best - 31 worst)
    #[arg(short = 'q', long)]
    image_quality: Option<u8>,

    /// Path of the ffmpeg binary to invoke
    #[arg(long)]
    ffmpeg_path: Option<String>,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "videobook", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let video_path = cli.video_path.ok_or_else(|| {
                anyhow!("VIDEO is required when no subcommand is specified")
            })?;
            let subtitle_path = cli.subtitle_path.ok_or_else(|| {
                anyhow!("SUBTITLE is required when no subcommand is specified")
            })?;
            let output_dir = cli.output_dir.ok_or_else(|| {
                anyhow!("OUTPUT_DIR is required when no subcommand is specified")
            })?;

            let convert_args = ConvertArgs {
                video_path,
                subtitle_path,
                output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
                image_quality: cli.image_quality,
                ffmpeg_path: cli.ffmpeg_path,
            };
            run_convert(convert_args).await
        }
    }
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(quality) = options.image_quality {
        config.capture.image_quality = quality;
    }
    if let Some(ffmpeg_path) = &options.ffmpeg_path {
        config.capture.ffmpeg_path = ffmpeg_path.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller and run the conversion pipeline
    let controller = Controller::with_config(config)?;
    controller.run(options.video_path, options.subtitle_path, options.output_dir).await
}
