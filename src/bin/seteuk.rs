//! Seteuk CLI
//!
//! Command-line front end for the record shortener: reads text from a file or
//! stdin, shortens each subject section, and writes the download format or JSON.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use seteuk_lib::{
    // Config
    default_config_path, FillStrategy, SegmentMode, ShortenConfig,
    // Core
    char_len, ShortenedSection, Shortener,
    // Export
    decode_upload, render_export,
};

/// Default per-section character budget
const DEFAULT_TARGET: usize = 250;

const EMPTY_INPUT_NOTICE: &str = "Input is empty; paste text or pass a text file first";

#[derive(Parser)]
#[command(name = "seteuk")]
#[command(about = "Seteuk CLI - shorten subject-specific record comments to a character budget", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten every section of the input
    Shorten {
        /// Input file (or - to read from stdin; stdin when omitted)
        input: Option<String>,
        /// Maximum characters per section
        #[arg(short, long, default_value_t = DEFAULT_TARGET)]
        target: usize,
        /// Unit granularity
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        /// Order units by importance score instead of input order
        #[arg(short, long)]
        priority: bool,
        /// Budget strategy
        #[arg(long, value_enum)]
        fill: Option<FillArg>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,
        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show {
        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the default config file location
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    LineItem,
    Sentence,
}

impl From<ModeArg> for SegmentMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::LineItem => SegmentMode::LineItem,
            ModeArg::Sentence => SegmentMode::Sentence,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FillArg {
    Proportional,
    Greedy,
}

impl From<FillArg> for FillStrategy {
    fn from(arg: FillArg) -> Self {
        match arg {
            FillArg::Proportional => FillStrategy::Proportional,
            FillArg::Greedy => FillStrategy::Greedy,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

// ============ Output Types ============

#[derive(Serialize)]
struct SectionOutput {
    title: String,
    text: String,
    original_chars: usize,
    final_chars: usize,
}

#[derive(Serialize)]
struct WrittenOutput {
    status: String,
    path: String,
    sections: usize,
}

#[derive(Serialize)]
struct ConfigPathOutput {
    path: String,
    exists: bool,
}

#[derive(Serialize)]
struct WarningOutput {
    warning: String,
}

#[derive(Serialize)]
struct ErrorOutput {
    error: String,
}

// ============ Main ============

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Shorten {
            input,
            target,
            mode,
            priority,
            fill,
            format,
            output,
            config,
        } => {
            let options = ShortenOptions {
                input,
                target,
                mode: mode.map(Into::into),
                priority,
                fill: fill.map(Into::into),
                format,
                output,
                config,
            };
            handle_shorten(options)
        }
        Commands::Config { action } => handle_config(action),
    };

    match result {
        Ok(out) if out.is_empty() || out.ends_with('\n') => print!("{}", out),
        Ok(out) => println!("{}", out),
        Err(e) => {
            let error = ErrorOutput { error: e.to_string() };
            match serde_json::to_string(&error) {
                Ok(json) => println!("{}", json),
                Err(_) => eprintln!("{}", e),
            }
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "seteuk=debug,seteuk_lib=debug" } else { "seteuk=info,seteuk_lib=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

// ============ Handlers ============

struct ShortenOptions {
    input: Option<String>,
    target: usize,
    mode: Option<SegmentMode>,
    priority: bool,
    fill: Option<FillStrategy>,
    format: FormatArg,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn handle_shorten(options: ShortenOptions) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = ShortenConfig::load(options.config.as_deref())?;
    if let Some(mode) = options.mode {
        config = config.with_mode(mode);
    }
    if options.priority {
        config = config.with_priority(true);
    }
    if let Some(fill) = options.fill {
        config = config.with_fill(fill);
    }

    let raw = read_input(options.input.as_deref())?;
    let shortener = Shortener::new(config)?;
    // Validates the target before looking at the input
    let sections = shortener.shorten(&raw, options.target)?;
    if sections.is_empty() {
        tracing::warn!("{}", EMPTY_INPUT_NOTICE);
        return empty_input_notice(options.format);
    }
    tracing::info!(sections = sections.len(), target = options.target, "Shortened document");

    let rendered = match options.format {
        FormatArg::Text => render_export(&sections),
        FormatArg::Json => serde_json::to_string(&section_outputs(&shortener, &raw, &sections))?,
    };

    match options.output {
        Some(path) => {
            fs::write(&path, rendered.as_bytes())?;
            let written = WrittenOutput {
                status: "written".to_string(),
                path: path.display().to_string(),
                sections: sections.len(),
            };
            Ok(serde_json::to_string(&written)?)
        }
        None => Ok(rendered),
    }
}

fn empty_input_notice(format: FormatArg) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        FormatArg::Text => Ok(EMPTY_INPUT_NOTICE.to_string()),
        FormatArg::Json => Ok(serde_json::to_string(&WarningOutput {
            warning: EMPTY_INPUT_NOTICE.to_string(),
        })?),
    }
}

/// Pair each result with the length of the section body it came from
fn section_outputs(
    shortener: &Shortener,
    raw: &str,
    sections: &[ShortenedSection],
) -> Vec<SectionOutput> {
    let originals = shortener.sections(raw);
    sections
        .iter()
        .zip(originals.iter())
        .map(|(section, original)| SectionOutput {
            title: section.title.clone(),
            text: section.text.clone(),
            original_chars: char_len(original.body.trim()),
            final_chars: char_len(&section.text),
        })
        .collect()
}

fn read_input(input: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = match input {
        None | Some("-") => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read(path)?,
    };
    Ok(decode_upload(bytes)?)
}

fn handle_config(action: ConfigAction) -> Result<String, Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { config } => {
            let config = ShortenConfig::load(config.as_deref())?;
            Ok(serde_json::to_string_pretty(&config)?)
        }

        ConfigAction::Path => {
            let path = default_config_path()?;
            let output = ConfigPathOutput {
                path: path.display().to_string(),
                exists: path.exists(),
            };
            Ok(serde_json::to_string(&output)?)
        }
    }
}
