//! Command line and environment configuration for the `tenten` binary.
//!
//! ```text
//! tenten [play] [--seed N] [--journal PATH] [--quiet] [--board STR] [--max-retries N]
//! tenten replay <MOVE_STR>
//! tenten show <BOARD_STR>
//! ```
//!
//! Flags win over the environment (`TENTEN_SEED`, `TENTEN_JOURNAL_PATH`,
//! `TENTEN_MAX_RETRIES`), which wins over built-in defaults.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::core::SessionConfig;

pub const USAGE: &str = "\
usage:
  tenten [play] [--seed N] [--journal PATH] [--quiet] [--board STR] [--max-retries N]
  tenten replay <MOVE_STR>
  tenten show <BOARD_STR>";

/// Values picked up from the environment before flags are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDefaults {
    pub seed: Option<u32>,
    pub journal_path: Option<String>,
    pub max_invalid_retries: Option<u32>,
}

impl EnvDefaults {
    pub fn from_env() -> Self {
        use std::env;

        let seed = env::var("TENTEN_SEED").ok().and_then(|s| s.trim().parse().ok());

        let journal_path = env::var("TENTEN_JOURNAL_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let max_invalid_retries = env::var("TENTEN_MAX_RETRIES")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        Self {
            seed,
            journal_path,
            max_invalid_retries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayConfig {
    pub seed: u32,
    pub journal_path: Option<String>,
    /// Only print the final board and summary.
    pub quiet: bool,
    /// Serialized starting position instead of an empty board.
    pub board: Option<String>,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(PlayConfig),
    Replay { move_str: String },
    Show { board: String },
    Help,
}

pub fn parse_args(args: &[String], env: &EnvDefaults) -> Result<Command> {
    let (cmd, rest) = match args.first().map(String::as_str) {
        None => ("play", &args[..0]),
        Some("help" | "--help" | "-h") => return Ok(Command::Help),
        Some(first) if first.starts_with('-') => ("play", args),
        Some(first) => (first, &args[1..]),
    };

    match cmd {
        "play" => parse_play_args(rest, env).map(Command::Play),
        "replay" => Ok(Command::Replay {
            move_str: single_operand("replay", "MOVE_STR", rest)?,
        }),
        "show" => Ok(Command::Show {
            board: single_operand("show", "BOARD_STR", rest)?,
        }),
        other => Err(anyhow!("unknown command: {}\n{}", other, USAGE)),
    }
}

fn parse_play_args(args: &[String], env: &EnvDefaults) -> Result<PlayConfig> {
    let mut seed = env.seed;
    let mut journal_path = env.journal_path.clone();
    let mut quiet = false;
    let mut board = None;
    let mut max_invalid_retries = env.max_invalid_retries;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = flag_value(args, i, "--seed")?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("play: invalid --seed value: {}", v))?,
                );
            }
            "--journal" => {
                i += 1;
                journal_path = Some(flag_value(args, i, "--journal")?.to_string());
            }
            "--board" => {
                i += 1;
                board = Some(flag_value(args, i, "--board")?.to_string());
            }
            "--max-retries" => {
                i += 1;
                let v = flag_value(args, i, "--max-retries")?;
                max_invalid_retries = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("play: invalid --max-retries value: {}", v))?,
                );
            }
            "--quiet" | "-q" => quiet = true,
            other => return Err(anyhow!("play: unknown argument: {}", other)),
        }
        i += 1;
    }

    let mut session = SessionConfig::default();
    if let Some(n) = max_invalid_retries {
        session.max_invalid_retries = n;
    }

    Ok(PlayConfig {
        seed: seed.unwrap_or_else(clock_seed),
        journal_path,
        quiet,
        board,
        session,
    })
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("play: missing value for {}", flag))
}

fn single_operand(cmd: &str, name: &str, args: &[String]) -> Result<String> {
    match args {
        [one] => Ok(one.clone()),
        [] => Err(anyhow!("{}: missing {}", cmd, name)),
        _ => Err(anyhow!("{}: expected exactly one {}", cmd, name)),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
