//! Scores Connect 4 positions read from standard input
//!
//! Each input line is a move sequence of 1-indexed columns. The sequence is
//! echoed back followed by its score, or by one score per column in analyze
//! mode. Invalid lines produce a diagnostic on standard error and an empty
//! line on standard output.

use anyhow::Result;
use clap::Parser;
use log::{error, warn};

use std::io::{self, BufRead};
use std::path::PathBuf;

use c4solver::bitboard::BitBoard;
use c4solver::opening_book::OpeningBook;
use c4solver::solver::Solver;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report only the sign of each score
    #[arg(short, long)]
    weak: bool,

    /// Path to an opening book file
    #[arg(short, long, default_value = "7x6.book")]
    book: PathBuf,

    /// Score every column of each position instead of the position itself
    #[arg(short, long)]
    analyze: bool,
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let args = Args::parse();

    let mut solver = Solver::new();
    match OpeningBook::load(&args.book) {
        Ok(book) => solver = solver.with_opening_book(book),
        Err(err) => warn!("running without an opening book: {err:#}"),
    }

    for (line_number, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;

        let mut board = BitBoard::new();
        let played = board.play_moves(&line);
        if played < line.chars().count() {
            error!(
                "line {}: invalid move {} in \"{}\"",
                line_number + 1,
                played + 1,
                line
            );
            println!();
            continue;
        }

        solver.reset();
        if args.analyze {
            let scores = solver.analyze(&board, args.weak);
            let scores: Vec<String> = scores.iter().map(i32::to_string).collect();
            println!("{} {}", line, scores.join(" "));
        } else {
            println!("{} {}", line, solver.solve(&board, args.weak));
        }
    }
    Ok(())
}
