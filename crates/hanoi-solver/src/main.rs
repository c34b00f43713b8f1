//! CLI entry point for the Tower of Hanoi solver.
//!
//! Usage:
//!   hanoi-solver solve <discs> [options]
//!   hanoi-solver verify <moves.json> [options]
//!   hanoi-solver verify --stdin [options]
//!
//! Options (solve):
//!   --max-discs <n>       Reject more discs than this (default: 10)
//!   --warn-threshold <n>  Warn above this many discs (default: 10)
//!   --summary             Print only the move counts
//!
//! Options (verify):
//!   --discs <n>           Disc count the log claims to solve
//!   --replay              Also replay and check every move
//!
//! Logging goes to stderr and is controlled by RUST_LOG.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hanoi_solver::{
    replay, solve, validate_disc_count, verify, DiscPolicy, HanoiError, MoveRecord, SolveResponse,
    VerificationResult,
};

#[derive(Parser)]
#[command(name = "hanoi-solver")]
#[command(about = "Optimal Tower of Hanoi solver")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for a number of discs and print every move as JSON
    Solve {
        /// Number of discs
        #[arg(value_name = "DISCS", allow_negative_numbers = true)]
        discs: i64,

        /// Maximum number of discs accepted
        #[arg(long, default_value = "10")]
        max_discs: u8,

        /// Disc count above which a warning is logged
        #[arg(long, default_value = "10")]
        warn_threshold: u8,

        /// Print only the move counts
        #[arg(long)]
        summary: bool,
    },

    /// Verify a JSON move log
    Verify {
        /// Path to a move log (a list of moves or a solve response)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the move log from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Disc count the log claims to solve (taken from the log if omitted)
        #[arg(long)]
        discs: Option<i64>,

        /// Replay every move and check each snapshot
        #[arg(long)]
        replay: bool,
    },
}

/// Accepted shapes for a move log
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MoveLog {
    Response(SolveResponse),
    Moves(Vec<MoveRecord>),
}

#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: String,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    discs: u8,
    total_moves: u64,
    minimum_moves: u64,
}

#[derive(Debug, Serialize)]
struct VerifyOutput {
    #[serde(flatten)]
    verdict: VerificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    replay_error: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let success = match cli.command {
        Commands::Solve {
            discs,
            max_discs,
            warn_threshold,
            summary,
        } => {
            let policy = DiscPolicy {
                max_discs,
                warn_threshold,
            };
            run_solve(discs, &policy, summary)?
        }
        Commands::Verify {
            file,
            stdin,
            discs,
            replay: check_replay,
        } => run_verify(file, stdin, discs, check_replay)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

fn run_solve(discs: i64, policy: &DiscPolicy, summary: bool) -> Result<bool> {
    let result = match policy.check(discs).and_then(|n| solve(i64::from(n))) {
        Ok(result) => result,
        Err(err) => {
            print_json(&rejection(err)?)?;
            return Ok(false);
        }
    };
    let accepted = result.discs;
    info!(discs = accepted, moves = result.total_moves(), "solved");

    if summary {
        print_json(&SummaryOutput {
            discs: result.discs,
            total_moves: result.total_moves(),
            minimum_moves: result.minimum_moves,
        })?;
    } else {
        print_json(&SolveResponse::from(result))?;
    }
    Ok(true)
}

/// Turn a solve failure into output for the caller.
///
/// Rejected disc counts become an `{"error": ...}` body; a broken invariant
/// is an internal fault and aborts instead.
fn rejection(err: HanoiError) -> Result<ErrorOutput> {
    if err.is_invariant_violation() {
        error!(%err, "solver produced an invalid move");
        return Err(anyhow!(err).context("internal solver fault"));
    }
    match err {
        HanoiError::PolicyRejection { discs, .. } => warn!(discs, "rejected by policy"),
        _ => warn!(%err, "rejected disc count"),
    }
    Ok(ErrorOutput {
        error: err.to_string(),
    })
}

fn run_verify(
    file: Option<PathBuf>,
    stdin: bool,
    discs: Option<i64>,
    check_replay: bool,
) -> Result<bool> {
    let json_content = if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file {:?}", path))?
    } else {
        return Err(anyhow!("Must provide either a file path or --stdin"));
    };

    let log: MoveLog =
        serde_json::from_str(&json_content).context("Error parsing move log JSON")?;

    let (moves, logged_discs) = match log {
        MoveLog::Response(response) => {
            let count = response.initial_state.disc_count() as i64;
            (response.moves, Some(count))
        }
        MoveLog::Moves(moves) => (moves, None),
    };

    let discs = discs
        .or(logged_discs)
        .ok_or_else(|| anyhow!("--discs is required for a bare list of moves"))?;
    let discs = validate_disc_count(discs)?;

    let verdict = verify(&moves, discs);
    let replay_error = if check_replay {
        replay(&moves, discs).err().map(|err| err.to_string())
    } else {
        None
    };

    let success = verdict.valid && replay_error.is_none();
    print_json(&VerifyOutput {
        verdict,
        replay_error,
    })?;
    Ok(success)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
