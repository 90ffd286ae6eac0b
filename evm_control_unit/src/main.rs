//! # EVM Control Unit Simulator
//!
//! Tick-accurate simulator for the EVM controller. Loads a TOML
//! configuration (ballot labels + input policies), parses a session
//! script, drives the controller through it, and reports the observed
//! display outputs and final tallies.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use evm_common::config::{ConfigError, LogLevel};
use evm_common::state::Candidate;
use evm_control_unit::config::{load_config, SimConfig};
use evm_control_unit::cycle::Controller;
use evm_control_unit::script::{parse_script, Command, ScriptRunner};
use evm_control_unit::tally::WinnerResult;

/// EVM Control Unit — tick-accurate voting machine simulator
#[derive(Parser, Debug)]
#[command(name = "evm_control_unit")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Synchronous EVM controller simulator")]
struct Args {
    /// Path to the session script to execute.
    script: PathBuf,

    /// Path to the simulator configuration TOML. Defaults are used when
    /// omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // Config is loaded before the subscriber so its log_level can seed
    // the filter; errors at this stage go straight to stderr.
    let config = match load_sim_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {e}");
            process::exit(1);
        }
    };
    setup_tracing(&args, config.shared.log_level);

    info!("EVM Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));
    match &args.config {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => warn!("No config given; using built-in ballot and policies"),
    }
    info!(
        "Config OK: service={}, multi_vote={:?}, overflow={:?}",
        config.shared.service_name, config.policy.multi_vote, config.policy.overflow,
    );

    if let Err(e) = run(&args, &config) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn load_sim_config(args: &Args) -> Result<SimConfig, ConfigError> {
    match &args.config {
        Some(path) => load_config(path),
        None => Ok(SimConfig::default()),
    }
}

fn run(args: &Args, config: &SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.script)
        .map_err(|e| format!("failed to read {}: {e}", args.script.display()))?;
    let commands = parse_script(&text)?;
    info!("Script parsed: {} commands", commands.len());

    let mut cu = Controller::with_policy(config.policy);
    let mut runner = ScriptRunner::new();
    let observations = runner.run(&mut cu, &commands);

    for obs in &observations {
        match obs.command {
            Command::Show(candidate) => {
                info!(
                    "display: {} → {} votes",
                    config.ballot.label(candidate),
                    obs.output.result_count,
                );
            }
            Command::Winner => {
                if obs.output.invalid_results {
                    info!(
                        "winner query: TIE at {} votes — results invalid",
                        obs.output.result_count
                    );
                } else if let Some(candidate) = Candidate::from_id(obs.output.candidate_name) {
                    info!(
                        "winner query: {} with {} votes",
                        config.ballot.label(candidate),
                        obs.output.result_count,
                    );
                } else {
                    // Winner query before session close drives zeros.
                    warn!("winner query returned no result (session still open?)");
                }
            }
            _ => {}
        }
    }

    let stats = cu.stats();
    info!(
        "Session complete: {} ticks, {} votes accepted, {} ignored",
        stats.ticks, stats.votes_accepted, stats.votes_ignored,
    );
    for candidate in Candidate::ALL {
        info!(
            "final tally: {} = {}",
            config.ballot.label(candidate),
            cu.tally().count(candidate),
        );
    }
    match cu.tally().winner() {
        WinnerResult::Winner { candidate, count } => {
            info!("result: {} wins with {count} votes", config.ballot.label(candidate));
        }
        WinnerResult::Tie { count } => {
            info!("result: tie at {count} votes");
        }
    }

    Ok(())
}

/// Setup tracing subscriber from the configured log level; `--verbose`
/// overrides it with DEBUG.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        match log_level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
