use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use punch_payroll::api::{self, AppState};
use punch_payroll::calculation::run_payroll_from_path;
use punch_payroll::config::{ConfigLoader, PayrollConfig};
use punch_payroll::diagnostics::DiagnosticLog;
use punch_payroll::error::{EngineResult, PayrollError};
use punch_payroll::models::PayrollResult;
use punch_payroll::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "punch-payroll",
    about = "Calculate Regular/Overtime/Doubletime payroll from employee time punches",
    version
)]
struct Cli {
    /// YAML settings file (defaults to ./punch-payroll.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the diagnostic log file
    #[arg(long, global = true)]
    error_log: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate payroll for a punch document and print it as JSON (default command)
    Run(RunArgs),
    /// Start the HTTP service
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Punch document to process
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run_cli().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("application error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_cli() -> EngineResult<()> {
    let cli = Cli::parse();
    let mut config = ConfigLoader::load_or_default(cli.config.as_deref())?.into_config();
    if let Some(error_log) = cli.error_log {
        config.error_log_path = error_log;
    }

    telemetry::init(&config.log_level)?;

    match cli.command.unwrap_or_else(|| Command::Run(RunArgs::default())) {
        Command::Run(args) => run_file(config, args),
        Command::Serve(args) => run_server(config, args).await,
    }
}

/// Processes one punch document and prints the results to stdout.
///
/// A document that cannot be loaded is reported as a diagnostic and
/// produces no output; the process still exits successfully.
fn run_file(mut config: PayrollConfig, args: RunArgs) -> EngineResult<()> {
    if let Some(input) = args.input {
        config.input_path = input;
    }
    let sink = DiagnosticLog::new(&config.error_log_path);

    match run_payroll_from_path(&config.input_path, &config.tiers, &sink) {
        Some(results) => write_results(&results, args.pretty),
        None => Ok(()),
    }
}

/// Writes the results to stdout as a single JSON block.
fn write_results(results: &[PayrollResult], pretty: bool) -> EngineResult<()> {
    let to_error = |message: String| PayrollError::Output { message };

    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, results).map_err(|e| to_error(e.to_string()))?;
    } else {
        serde_json::to_writer(&mut stdout, results).map_err(|e| to_error(e.to_string()))?;
    }
    writeln!(stdout).map_err(|e| to_error(e.to_string()))
}

async fn run_server(mut config: PayrollConfig, args: ServeArgs) -> EngineResult<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let sink = Arc::new(DiagnosticLog::new(&config.error_log_path));
    let state = AppState::new(config.tiers.clone(), sink);
    let address = format!("{}:{}", config.server.host, config.server.port);

    info!(
        error_log = %config.error_log_path.display(),
        "Starting payroll API"
    );
    api::serve(&address, state).await
}
