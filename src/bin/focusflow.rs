//! FocusFlow CLI - Command-line interface for the FocusFlow engine
//!
//! Commands:
//! - score: Score an end-of-session telemetry request
//! - alert: Evaluate a distraction checkpoint request
//! - violation: Evaluate a fullscreen violation request
//! - moderate: Evaluate a study room moderation request
//! - refresh: Evaluate a cognitive refresh request
//! - validate: Check that a request parses for a given operation

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use focusflow_engine::pipeline::{
    AlertRequest, ModerationRequest, RefreshRequest, ScoreRequest, ViolationRequest,
};
use focusflow_engine::{
    cognitive_refresh_json, distraction_alert_json, fullscreen_violation_json,
    room_moderation_json, score_session_json, EngineError, ENGINE_VERSION,
};

/// FocusFlow - deterministic focus scoring and behavioral policy engine
#[derive(Parser)]
#[command(name = "focusflow")]
#[command(author = "FocusFlow Contributors")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Evaluate study-session telemetry into decisions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an end-of-session telemetry request
    Score {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Evaluate a distraction checkpoint request
    Alert {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Evaluate a fullscreen violation request
    Violation {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Evaluate a study room moderation request
    Moderate {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Evaluate a cognitive refresh request
    Refresh {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Check that a request parses for a given operation
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Operation the request is meant for
        #[arg(value_enum)]
        operation: Operation,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input file path (use - for stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Output file path (use - for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Operation {
    /// End-of-session scoring request
    Score,
    /// Distraction checkpoint request
    Alert,
    /// Fullscreen violation request
    Violation,
    /// Study room moderation request
    Moderate,
    /// Cognitive refresh request
    Refresh,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Score { io } => evaluate(&io, score_session_json),
        Commands::Alert { io } => evaluate(&io, distraction_alert_json),
        Commands::Violation { io } => evaluate(&io, fullscreen_violation_json),
        Commands::Moderate { io } => evaluate(&io, room_moderation_json),
        Commands::Refresh { io } => evaluate(&io, cognitive_refresh_json),
        Commands::Validate { input, operation } => cmd_validate(&input, operation),
    }
}

fn evaluate(io_args: &IoArgs, f: fn(&str) -> Result<String, EngineError>) -> Result<(), CliError> {
    let raw = read_input(&io_args.input)?;
    let report = f(&raw)?;
    write_output(&io_args.output, &report)
}

fn cmd_validate(input: &Path, operation: Operation) -> Result<(), CliError> {
    let raw = read_input(input)?;

    let result = match operation {
        Operation::Score => serde_json::from_str::<ScoreRequest>(&raw).map(|_| ()),
        Operation::Alert => serde_json::from_str::<AlertRequest>(&raw).map(|_| ()),
        Operation::Violation => serde_json::from_str::<ViolationRequest>(&raw).map(|_| ()),
        Operation::Moderate => serde_json::from_str::<ModerationRequest>(&raw).map(|_| ()),
        Operation::Refresh => serde_json::from_str::<RefreshRequest>(&raw).map(|_| ()),
    };

    match result {
        Ok(()) => {
            println!("OK: request is valid");
            Ok(())
        }
        Err(e) => Err(CliError::Validation(e.to_string())),
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading request from stdin (end with Ctrl-D)...");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn write_output(path: &Path, report: &str) -> Result<(), CliError> {
    if path.to_string_lossy() == "-" {
        let mut stdout = io::stdout();
        writeln!(stdout, "{report}")?;
        Ok(())
    } else {
        fs::write(path, report)?;
        Ok(())
    }
}

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Engine(EngineError),
    Validation(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Validation(msg) => write!(f, "invalid request: {msg}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        CliError::Engine(e)
    }
}
