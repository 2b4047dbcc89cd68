//! MindCache CLI - Command-line interface for the MindCache engine
//!
//! Commands:
//! - analyze: Analyze telemetry events into event reports (batch mode)
//! - run: Analyze events from stdin as they arrive (streaming mode)
//! - content: Run content analysis over a single payload
//! - behavior: Run behavior analysis over a single payload
//! - config: Print the effective analyzer configuration
//! - doctor: Diagnose engine health and configuration

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mindcache_engine::pipeline::{parse_array, parse_ndjson};
use mindcache_engine::{
    AnalysisError, AnalysisReport, AnalyzerConfig, EventAnalyzer, EventReport, ENGINE_VERSION,
    PRODUCER_NAME,
};

/// MindCache - On-device analysis of browsing telemetry
#[derive(Parser)]
#[command(name = "mindcache")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Turn browsing telemetry into content and reading insights", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze telemetry events into event reports (batch mode)
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Analyzer configuration file (JSON, partial overrides allowed)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Analyze events from stdin as they arrive (streaming mode)
    Run {
        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Analyzer configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Flush output after each record
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Run content analysis over a single payload
    Content {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Analyzer configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run behavior analysis over a single payload
    Behavior {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Analyzer configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective analyzer configuration
    Config {
        /// Analyzer configuration file to merge over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Diagnose engine health and configuration
    Doctor {
        /// Check an analyzer configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one event per line)
    Ndjson,
    /// JSON array of events
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one report per line)
    Ndjson,
    /// JSON array of reports
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable; RUST_LOG overrides `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), MindcacheCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            input_format,
            output_format,
            config,
        } => cmd_analyze(&input, &output, input_format, output_format, config.as_deref()),

        Commands::Run {
            output_format,
            config,
            flush,
        } => cmd_run(output_format, config.as_deref(), flush),

        Commands::Content { input, config } => cmd_content(&input, config.as_deref()),

        Commands::Behavior { input, config } => cmd_behavior(&input, config.as_deref()),

        Commands::Config { config } => cmd_config(config.as_deref()),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), MindcacheCliError> {
    let analyzer = EventAnalyzer::with_config(load_config(config)?);
    let input_data = read_input(input)?;

    let payloads = match input_format {
        InputFormat::Ndjson => parse_ndjson(&input_data)?,
        InputFormat::Json => parse_array(&input_data)?,
    };

    if payloads.is_empty() {
        return Err(MindcacheCliError::NoEvents);
    }

    let mut reports: Vec<EventReport> = Vec::with_capacity(payloads.len());
    for payload in &payloads {
        reports.push(analyzer.analyze_event(payload)?);
    }

    let analyzed = reports.iter().filter(|r| r.was_analyzed()).count();
    log::info!("Analyzed {} of {} events", analyzed, reports.len());

    let output_data = format_output(&reports, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_run(
    output_format: OutputFormat,
    config: Option<&Path>,
    flush: bool,
) -> Result<(), MindcacheCliError> {
    let analyzer = EventAnalyzer::with_config(load_config(config)?);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for (line_num, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let payload: Value = serde_json::from_str(trimmed).map_err(|e| {
            MindcacheCliError::ParseError(format!(
                "Failed to parse event on line {}: {}",
                line_num + 1,
                e
            ))
        })?;

        let report = analyzer.analyze_event(&payload)?;
        let record = match output_format {
            OutputFormat::Ndjson | OutputFormat::Json => serde_json::to_string(&report)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
        };

        writeln!(stdout, "{}", record)?;
        if flush {
            stdout.flush()?;
        }
    }

    stdout.flush()?;
    Ok(())
}

fn cmd_content(input: &Path, config: Option<&Path>) -> Result<(), MindcacheCliError> {
    let analyzer = EventAnalyzer::with_config(load_config(config)?);
    let payload: Value = serde_json::from_str(&read_input(input)?)?;

    let report = AnalysisReport::from(analyzer.analyze_content(&payload));
    print_single_report(&report)
}

fn cmd_behavior(input: &Path, config: Option<&Path>) -> Result<(), MindcacheCliError> {
    let analyzer = EventAnalyzer::with_config(load_config(config)?);
    let payload: Value = serde_json::from_str(&read_input(input)?)?;

    let report = AnalysisReport::from(analyzer.analyze_behavior(&payload));
    print_single_report(&report)
}

/// The report is printed either way; a failure also sets the exit code
fn print_single_report<T: Serialize>(report: &AnalysisReport<T>) -> Result<(), MindcacheCliError> {
    println!("{}", serde_json::to_string_pretty(report)?);

    match report.failure() {
        Some(failure) => Err(MindcacheCliError::AnalysisFailed(failure.error.clone())),
        None => Ok(()),
    }
}

fn cmd_config(config: Option<&Path>) -> Result<(), MindcacheCliError> {
    let config = load_config(config)?;
    println!("{}", config.to_json_pretty()?);
    Ok(())
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), MindcacheCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("MindCache engine version {}", ENGINE_VERSION),
    });

    // Check configuration file if provided
    let effective_config = match config {
        Some(config_path) if !config_path.exists() => {
            checks.push(DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Warning,
                message: "Config file does not exist, using defaults".to_string(),
            });
            AnalyzerConfig::default()
        }
        Some(config_path) => match load_config(Some(config_path)) {
            Ok(loaded) => {
                checks.push(DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Ok,
                    message: "Config file valid".to_string(),
                });
                loaded
            }
            Err(e) => {
                checks.push(DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: CliError::from(e).message,
                });
                AnalyzerConfig::default()
            }
        },
        None => AnalyzerConfig::default(),
    };

    let actions_check = if effective_config.analyzed_actions.is_empty() {
        DoctorCheck {
            name: "analyzed_actions".to_string(),
            status: CheckStatus::Warning,
            message: "No actions selected, events will pass through unanalyzed".to_string(),
        }
    } else {
        DoctorCheck {
            name: "analyzed_actions".to_string(),
            status: CheckStatus::Ok,
            message: format!("Analyzing actions: {}", effective_config.analyzed_actions.join(", ")),
        }
    };
    checks.push(actions_check);

    checks.push(self_test(&effective_config));

    // Check stdin is available (for streaming mode)
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("MindCache Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(MindcacheCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

/// Run both analyzers over a known-good payload
fn self_test(config: &AnalyzerConfig) -> DoctorCheck {
    let payload = serde_json::json!({
        "contentSummary": {
            "contentType": "article",
            "contentPreview": "The engine reads this sentence. It then reads another one."
        },
        "readingAnalysis": { "engagementScore": 50 },
        "focusTime": 90000
    });

    let analyzer = EventAnalyzer::with_config(config.clone());
    let content = analyzer.analyze_content(&payload);
    let behavior = analyzer.analyze_behavior(&payload);

    match (content, behavior) {
        (Ok(_), Ok(_)) => DoctorCheck {
            name: "self_test".to_string(),
            status: CheckStatus::Ok,
            message: "Content and behavior analyzers completed".to_string(),
        },
        (Err(failure), _) | (_, Err(failure)) => DoctorCheck {
            name: "self_test".to_string(),
            status: CheckStatus::Error,
            message: format!("Analyzer self-test failed: {}", failure.error),
        },
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, MindcacheCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig, MindcacheCliError> {
    match path {
        Some(path) => {
            let config = AnalyzerConfig::from_json(&fs::read_to_string(path)?)?;
            log::debug!("Loaded analyzer config from {}", path.display());
            Ok(config)
        }
        None => Ok(AnalyzerConfig::default()),
    }
}

fn format_output(reports: &[EventReport], format: &OutputFormat) -> Result<String, MindcacheCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports {
                lines.push(serde_json::to_string(report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(reports)?),
    }
}

// Error types

#[derive(Debug)]
enum MindcacheCliError {
    Io(io::Error),
    Analysis(AnalysisError),
    Json(serde_json::Error),
    NoEvents,
    AnalysisFailed(String),
    DoctorFailed,
    ParseError(String),
}

impl From<io::Error> for MindcacheCliError {
    fn from(e: io::Error) -> Self {
        MindcacheCliError::Io(e)
    }
}

impl From<AnalysisError> for MindcacheCliError {
    fn from(e: AnalysisError) -> Self {
        MindcacheCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for MindcacheCliError {
    fn from(e: serde_json::Error) -> Self {
        MindcacheCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MindcacheCliError> for CliError {
    fn from(e: MindcacheCliError) -> Self {
        match e {
            MindcacheCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            MindcacheCliError::Analysis(e) => {
                let hint = match e {
                    AnalysisError::ConfigError(_) => "Run 'mindcache config' to see valid settings",
                    AnalysisError::EmptyPayload | AnalysisError::NotAnObject(_) => {
                        "Each event must be a non-empty JSON object"
                    }
                    _ => "Check input format",
                };
                CliError {
                    code: "ANALYSIS_ERROR".to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            MindcacheCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            MindcacheCliError::NoEvents => CliError {
                code: "NO_EVENTS".to_string(),
                message: "No events found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            MindcacheCliError::AnalysisFailed(msg) => CliError {
                code: "ANALYSIS_FAILED".to_string(),
                message: msg,
                hint: Some("See the debug_info in the printed report".to_string()),
            },
            MindcacheCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            MindcacheCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
