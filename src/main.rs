//! Headless tenten runner (default binary).
//!
//! `play` runs one seeded game with the random-valid move source and prints
//! the board after each turn. `replay` rebuilds a board from a move string and
//! `show` prints a serialized board.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};

use tenten::config::{parse_args, Command, EnvDefaults, PlayConfig, USAGE};
use tenten::core::{
    calculate_score, Board, Catalog, GameSession, RandomDealer, StepOutcome, TurnRecord,
};
use tenten::engine::RandomValid;
use tenten::journal::{Journal, JournalRecord};
use tenten::term::{BoardPrinter, BoardView};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let env = EnvDefaults::from_env();

    match parse_args(&args, &env)? {
        Command::Play(cfg) => play(cfg),
        Command::Replay { move_str } => replay(&move_str),
        Command::Show { board } => show(&board),
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn printer(show_hand: bool) -> BoardPrinter {
    BoardPrinter::new(BoardView::new(show_hand)).with_color(std::io::stdout().is_terminal())
}

fn play(cfg: PlayConfig) -> Result<()> {
    let catalog = Arc::new(Catalog::standard());
    let board = match &cfg.board {
        Some(s) => Board::import_as_str(Arc::clone(&catalog), s).context("play: bad --board")?,
        None => Board::new(Arc::clone(&catalog)),
    };

    let mut session = GameSession::from_board(board, cfg.session);
    let mut dealer = RandomDealer::new(cfg.seed);
    let mut source = RandomValid::new(cfg.seed.rotate_left(16) ^ 0x9E37_79B9);
    let mut journal = match &cfg.journal_path {
        Some(path) => Some(Journal::open(path)?),
        None => None,
    };
    let mut out = printer(true);

    eprintln!("[Session] seed {}", cfg.seed);

    loop {
        let outcome = session
            .step(&mut source, &mut dealer)
            .with_context(|| format!("turn {}", session.moves() + 1))?;
        let record = match outcome {
            StepOutcome::Played(record) => record,
            StepOutcome::GameOver => break,
        };

        report_rejections(&record, &catalog);
        if let Some(journal) = journal.as_mut() {
            journal.write(&JournalRecord::turn(&record, &catalog))?;
        }
        if !cfg.quiet {
            println!(
                "Turn {}: {} [{}] +{} = {}",
                record.turn,
                record.mv.describe(&catalog),
                record.token,
                record.score.total,
                record.total_score
            );
            out.print(session.board())?;
        }
    }

    let result = session.result();
    if let Some(journal) = journal.as_mut() {
        journal.write(&JournalRecord::summary(&result, cfg.seed))?;
        journal.flush()?;
    }

    println!("Game over");
    out.print(session.board())?;
    println!(
        "moves: {}  lines: {}  score: {}",
        result.moves, result.cleared_lines, result.score
    );
    println!("move_str: {:?}", result.move_str);
    Ok(())
}

fn report_rejections(record: &TurnRecord, catalog: &Catalog) {
    for mv in &record.rejected {
        eprintln!(
            "[Session] rejected {} on turn {}, asking again",
            mv.describe(catalog),
            record.turn
        );
    }
}

fn replay(move_str: &str) -> Result<()> {
    let catalog = Arc::new(Catalog::standard());
    let board = Board::replay(Arc::clone(&catalog), move_str).context("replay")?;

    let mut score = 0u32;
    let mut lines = 0usize;
    for entry in board.history() {
        let blocks = catalog.get(entry.mv.piece).size();
        score += calculate_score(blocks, entry.cleared.lines()).total;
        lines += entry.cleared.lines();
    }

    printer(false).print(&board)?;
    println!(
        "moves: {}  lines: {}  score: {}",
        board.history().len(),
        lines,
        score
    );
    Ok(())
}

fn show(s: &str) -> Result<()> {
    let catalog = Arc::new(Catalog::standard());
    let board = Board::import_as_str(catalog, s).context("show")?;
    printer(true).print(&board)
}
