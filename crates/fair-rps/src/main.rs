//! Fair RPS command line
//!
//! Plays one provably fair round against the computer over the moves given on
//! the command line, or checks a disclosed key against a published HMAC.

use clap::{Parser, Subcommand};
use fair_rps_core::{
    crypto::{Commitment, OsRandom, RoundSecret},
    GameError, GameRound, RoundState,
};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter
const LOG_ENV: &str = "FAIR_RPS_LOG";
const DEFAULT_LOG: &str = "warn";

#[derive(Parser)]
#[command(name = "fair-rps")]
#[command(about = "Provably fair rock-paper-scissors with any odd number of moves", long_about = None)]
#[command(args_conflicts_with_subcommands = true, disable_help_subcommand = true)]
struct Cli {
    /// Print the final disclosure as a JSON object
    #[arg(long)]
    json: bool,

    /// Moves in cyclic order: an odd number, at least 3, all distinct
    #[arg(value_name = "MOVES", allow_hyphen_values = true)]
    moves: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a disclosed key and computer move against the published HMAC
    Verify {
        /// Disclosed HMAC key (64 hex chars)
        #[arg(long)]
        key: RoundSecret,

        /// HMAC published before the player moved
        #[arg(long)]
        hmac: Commitment,

        /// Disclosed computer move
        #[arg(value_name = "MOVE")]
        computer_move: String,
    },
}

/// Errors that end the program with a failure status
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode disclosure: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read one line, decoding invalid UTF-8 lossily so it is rejected like any other bad input.
///
/// Returns `None` at end of input.
fn read_line(input: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if input.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let line = match String::from_utf8_lossy(&buf[..]) {
        Cow::Borrowed(line) => line.to_string(),
        Cow::Owned(line) => {
            warn!("Input line was not valid UTF-8");
            line
        }
    };
    Ok(Some(line))
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Play one round, reading the player's input from stdin
fn play(labels: Vec<String>, json: bool) -> Result<(), CliError> {
    let mut round = GameRound::from_labels(labels, &mut OsRandom)?;
    let round_id = round.id();
    info!("Round {} started with moves {:?}", round_id, round.moves().labels());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_lines(&mut out, &round.opening_lines())?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut buf = Vec::new();
    loop {
        let Some(line) = read_line(&mut input, &mut buf)? else {
            warn!("Input closed, abandoning round {}", round_id);
            return Ok(());
        };

        let (state, output) = round.handle_input(&line);
        match state {
            RoundState::AwaitingPlayerMove(next) => {
                print_lines(&mut out, &output)?;
                round = next;
            }
            RoundState::Disclosed(disclosure) => {
                if json {
                    writeln!(out, "{}", serde_json::to_string(&disclosure)?)?;
                    out.flush()?;
                } else {
                    print_lines(&mut out, &output)?;
                }
                return Ok(());
            }
            RoundState::Aborted => return Ok(()),
        }
    }
}

fn verify(key: &RoundSecret, hmac: &Commitment, computer_move: &str) -> ExitCode {
    if hmac.verify(key, computer_move) {
        println!("HMAC verified");
        ExitCode::SUCCESS
    } else {
        println!("HMAC mismatch");
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the game
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match cli.command {
        Some(Commands::Verify {
            key,
            hmac,
            computer_move,
        }) => verify(&key, &hmac, &computer_move),
        None => match play(cli.moves, cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
