//! ballot: command-line entry point for the vote ledger.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use ballot_election::{ElectionService, ServiceConfig};
use ballot_store_json::JsonFileStore;
use ballot_types::{CandidateId, ElectionId, UserId};
use ballot_utils::LogFormat;
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "ballot", about = "Tamper-evident vote ledger", version)]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BALLOT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// JSON file holding the whole ledger state.
    #[arg(long, env = "BALLOT_DATA_FILE", global = true)]
    data_file: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALLOT_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Threads used to seal blocks.
    #[arg(long, env = "BALLOT_WORK_THREADS", global = true)]
    work_threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Create the ledger file (genesis block and admin) if it does not exist.
    Init,
    /// Show the admin user.
    Admin,
    /// List every election.
    List,
    /// List registered voters.
    Voters,
    /// Create an election.
    CreateElection {
        #[arg(long)]
        title: String,
        /// Candidate name; repeat for each candidate.
        #[arg(long = "candidate", required = true)]
        candidates: Vec<String>,
        /// Creating user (defaults to the admin).
        #[arg(long)]
        creator: Option<String>,
    },
    /// Register a voter.
    AddVoter {
        #[arg(long)]
        name: String,
        /// Reference photo as a data URI.
        #[arg(long)]
        photo: Option<String>,
    },
    /// Cast a vote and print its receipt.
    Cast {
        #[arg(long)]
        voter: String,
        #[arg(long)]
        election: String,
        #[arg(long)]
        candidate: String,
    },
    /// Close an election.
    Close { id: String },
    /// Delete an election record (its votes stay in the chain).
    Delete { id: String },
    /// Count the votes of an election.
    Tally { id: String },
    /// Verify the chain; exits non-zero if it is broken.
    Verify,
}

/// Merge the optional config file with CLI flags and env vars.
fn resolve_config(cli: &Cli) -> anyhow::Result<ServiceConfig> {
    let base = match &cli.config {
        Some(path) => ServiceConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    Ok(ServiceConfig {
        data_file: cli.data_file.clone().unwrap_or(base.data_file),
        work_threads: cli.work_threads.unwrap_or(base.work_threads),
        log_format: cli.log_format.unwrap_or(base.log_format),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Execute one subcommand. Returns `false` when the chain failed verification.
fn run(cli: Cli, config: &ServiceConfig) -> anyhow::Result<bool> {
    let service = ElectionService::new(
        JsonFileStore::new(&config.data_file),
        config.work_generator()?,
    );

    match cli.command {
        Command::Init => {
            let admin = service.admin_user()?;
            let chain = service.verify_chain()?;
            tracing::info!("ledger ready at {}", config.data_file.display());
            print_json(&serde_json::json!({
                "data_file": config.data_file,
                "admin": admin,
                "chain": chain,
            }))?;
        }
        Command::Admin => print_json(&service.admin_user()?)?,
        Command::List => print_json(&service.list_elections()?)?,
        Command::Voters => print_json(&service.voters()?)?,
        Command::CreateElection {
            title,
            candidates,
            creator,
        } => {
            let creator = match creator {
                Some(id) => UserId::new(id),
                None => service.admin_user()?.user_id,
            };
            print_json(&service.create_election(&title, &candidates, &creator, None)?)?;
        }
        Command::AddVoter { name, photo } => {
            print_json(&service.add_voter(&name, photo.as_deref())?)?;
        }
        Command::Cast {
            voter,
            election,
            candidate,
        } => {
            let receipt = service.cast_vote(
                &UserId::new(voter),
                &ElectionId::new(election),
                &CandidateId::new(candidate),
            )?;
            print_json(&receipt)?;
        }
        Command::Close { id } => print_json(&service.close_election(&ElectionId::new(id))?)?,
        Command::Delete { id } => print_json(&service.delete_election(&ElectionId::new(id))?)?,
        Command::Tally { id } => print_json(&service.tally(&ElectionId::new(id))?)?,
        Command::Verify => {
            let report = service.verify_chain()?;
            print_json(&report)?;
            return Ok(report.ok);
        }
    }
    Ok(true)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    ballot_utils::init_logging(config.log_format, &config.log_level);
    tracing::debug!(
        data_file = %config.data_file.display(),
        work_threads = config.work_threads,
        "configuration resolved"
    );
    Ok(if run(cli, &config)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
