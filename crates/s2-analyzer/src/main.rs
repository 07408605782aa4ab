//! # s2-analyzer
//!
//! Replay binary: feeds captured S2 traffic (frame dumps and/or log
//! files) through the analysis engine and prints the correlated
//! message sequence.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use s2_engine::Analyzer;
use s2_settings::{AnalyzerSettings, LogFormat, LoggingSettings, OutputFormat};

/// S2 session replay and analysis.
#[derive(Parser, Debug)]
#[command(
    name = "s2-analyzer",
    about = "Replay captured S2 traffic into a correlated message sequence"
)]
struct Cli {
    /// Log files to replay, in order.
    files: Vec<PathBuf>,

    /// Frame dump to replay first (one JSON envelope per line).
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Settings file (defaults to `~/.s2-analyzer/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output format (overrides settings).
    #[arg(long, value_enum)]
    output: Option<OutputArg>,

    /// Also print the accumulated raw text log.
    #[arg(long)]
    include_raw: bool,
}

/// CLI-side mirror of [`OutputFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputArg {
    /// One JSON record per line, most recent first.
    Jsonl,
    /// Per-kind record counts plus the error count.
    Summary,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Jsonl => Self::Jsonl,
            OutputArg::Summary => Self::Summary,
        }
    }
}

fn load_settings(cli_path: Option<&PathBuf>) -> AnalyzerSettings {
    let result = match cli_path {
        Some(path) => s2_settings::load_settings_from_path(path),
        None => s2_settings::load_settings(),
    };
    // A broken settings file must not block replay.
    result.unwrap_or_default()
}

/// Initialize the tracing subscriber from settings.
///
/// Logs go to stderr; stdout is reserved for replay output.
fn init_logging(settings: &LoggingSettings) {
    let filter = tracing_subscriber::EnvFilter::try_new(&settings.level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match settings.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn replay(analyzer: &mut Analyzer, args: &Cli) -> Result<()> {
    if let Some(frames_path) = &args.frames {
        let contents = std::fs::read_to_string(frames_path)
            .with_context(|| format!("failed to read frame dump {}", frames_path.display()))?;
        for frame in contents.lines().filter(|line| !line.trim().is_empty()) {
            analyzer.receive(frame);
        }
    }

    for file in &args.files {
        let contents = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read log file {}", file.display()))?;
        analyzer.ingest(&contents);
    }
    Ok(())
}

fn print_jsonl(analyzer: &Analyzer) -> Result<()> {
    for record in analyzer.current_sequence() {
        let line = serde_json::to_string(&record).context("failed to serialize record")?;
        println!("{line}");
    }
    Ok(())
}

fn print_summary(analyzer: &Analyzer) {
    let sequence = analyzer.current_sequence();
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for record in &sequence {
        *counts.entry(record.message_type.as_str()).or_default() += 1;
    }
    for (kind, count) in &counts {
        println!("{count:>6}  {kind}");
    }
    println!("{:>6}  records total", sequence.len());
    println!("{:>6}  parse errors", analyzer.errors().len());
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Settings before logging, so the subscriber honors the configured
    // level and format.
    let settings = load_settings(args.settings.as_ref());
    init_logging(&settings.logging);

    let mut analyzer = Analyzer::new();
    replay(&mut analyzer, &args)?;

    // Soft errors are data about the capture, not failures of the tool.
    for error in analyzer.errors() {
        tracing::warn!(
            sequence_index = error.sequence_index,
            cause = %error.cause,
            "input failed to parse"
        );
    }

    let format = args.output.map_or(settings.output.format, Into::into);
    match format {
        OutputFormat::Jsonl => print_jsonl(&analyzer)?,
        OutputFormat::Summary => print_summary(&analyzer),
    }

    if args.include_raw || settings.output.include_raw {
        println!("{}", analyzer.raw_text());
    }

    Ok(())
}
