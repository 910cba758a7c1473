//! Offline tooling for the opening book
//!
//! `explore` enumerates every position reachable within a move limit so an
//! external run of the solver can score them; `build` packs those scored
//! positions back into a binary book file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use std::collections::HashSet;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use c4solver::bitboard::BitBoard;
use c4solver::opening_book::OpeningBook;
use c4solver::solver::{MAX_SCORE, MIN_SCORE};
use c4solver::transposition_table::TranspositionTable;
use c4solver::WIDTH;

// log2 of the number of book slots
const BOOK_LOG_SIZE: u8 = 23;
// positions with more moves than this are not stored in the book
const BOOK_DEPTH: usize = 14;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every position reachable within a move limit, one sequence per line
    ///
    /// Positions that are mirror images of an already printed one are skipped.
    Explore {
        /// Maximum number of moves in the printed positions
        depth: usize,
    },
    /// Pack scored positions from standard input into an opening book
    ///
    /// Each input line is a move sequence, a space and the exact score of the
    /// resulting position. Reading stops at the first empty line.
    Build {
        /// Path of the book file to write
        #[arg(short, long, default_value = "7x6.book")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let args = Args::parse();
    match args.command {
        Command::Explore { depth } => explore_all(depth),
        Command::Build { output } => build_book(&output),
    }
}

/// Walks all positions of up to `depth` moves, printing each unique one
fn explore_all(depth: usize) -> Result<()> {
    let mut visited = HashSet::new();
    let mut sequence = String::new();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    explore(&BitBoard::new(), &mut sequence, depth, &mut visited, &mut out)?;
    out.flush()?;
    Ok(())
}

fn explore<W: Write>(
    board: &BitBoard,
    sequence: &mut String,
    depth: usize,
    visited: &mut HashSet<u64>,
    out: &mut W,
) -> Result<()> {
    // the mirror image of this position may have been printed already
    if !visited.insert(board.key3()) {
        return Ok(());
    }
    writeln!(out, "{sequence}")?;
    if board.num_moves() >= depth {
        return Ok(());
    }

    for column in 0..WIDTH {
        if board.playable(column) && !board.check_winning_move(column) {
            let mut next = *board;
            next.play_col(column);
            sequence.push(char::from(b'1' + column as u8));
            explore(&next, sequence, depth, visited, out)?;
            sequence.pop();
        }
    }
    Ok(())
}

/// Reads scored positions from standard input and saves them as a book
fn build_book(output: &Path) -> Result<()> {
    let mut table: TranspositionTable<u16> = TranspositionTable::new(BOOK_LOG_SIZE);

    let stdin = io::stdin();
    let mut count: u64 = 0;
    for line in stdin.lock().lines() {
        let line = line.context("unable to read scored positions")?;
        if line.is_empty() {
            break;
        }
        match parse_scored_position(&line) {
            // shift scores up by one so a stored score is never the empty marker 0
            Some((board, score)) => table.put(board.key3(), (score - MIN_SCORE + 1) as u8),
            None => {
                error!("invalid line (line ignored): \"{line}\"");
                continue;
            }
        }
        count += 1;
        if count % 1_000_000 == 0 {
            info!("{count} positions stored");
        }
    }

    let book = OpeningBook::from_table(BOOK_DEPTH, table);
    book.save(output)
        .with_context(|| format!("unable to save opening book {}", output.display()))?;
    info!("{count} positions saved to {}", output.display());
    Ok(())
}

/// Parses a "sequence score" line into a board and its exact score
fn parse_scored_position(line: &str) -> Option<(BitBoard, i32)> {
    let (sequence, score) = line.split_once(' ')?;
    let score: i32 = score.trim().parse().ok()?;
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return None;
    }
    let mut board = BitBoard::new();
    if board.play_moves(sequence) != sequence.chars().count() {
        return None;
    }
    Some((board, score))
}
