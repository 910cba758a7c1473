//! Play a game of Connect 4 against the solver in the terminal

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent, Stylize},
    QueueableCommand,
};
use log::warn;

use std::io::{self, Write};
use std::path::PathBuf;

use c4solver::bitboard::BitBoard;
use c4solver::opening_book::OpeningBook;
use c4solver::solver::{move_order, Solver};
use c4solver::{HEIGHT, WIDTH};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an opening book file (without one, early moves take minutes)
    #[arg(short, long, default_value = "7x6.book")]
    book: PathBuf,

    /// Let the solver move first
    #[arg(short, long)]
    second: bool,
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let args = Args::parse();

    let mut solver = Solver::new();
    match OpeningBook::load(&args.book) {
        Ok(book) => solver = solver.with_opening_book(book),
        Err(err) => warn!("playing without an opening book: {err:#}"),
    }

    let human_first = !args.second;
    let mut board = BitBoard::new();
    println!("Welcome to Connect 4\n");

    loop {
        render(&board)?;
        if board.num_moves() == WIDTH * HEIGHT {
            println!("Draw!");
            break;
        }

        let human_turn = (board.num_moves() % 2 == 0) == human_first;
        let column = if human_turn {
            prompt_column(&board)?
        } else {
            let column = engine_move(&mut solver, &board);
            println!("The solver plays column {}", column + 1);
            column
        };

        let winning = board.check_winning_move(column);
        board.play_col(column);
        if winning {
            render(&board)?;
            println!("{} win{}!", if human_turn { "You" } else { "The solver" },
                     if human_turn { "" } else { "s" });
            break;
        }
    }
    Ok(())
}

/// Draws the board, first player red and second player yellow
fn render(board: &BitBoard) -> Result<()> {
    let mut stdout = io::stdout();

    // stones of the player who moved first, whoever is about to move
    let first_player = if board.num_moves() % 2 == 0 {
        board.player_mask()
    } else {
        board.player_mask() ^ board.board_mask()
    };

    for row in (0..HEIGHT).rev() {
        for column in 0..WIDTH {
            let cell = 1u64 << (column * (HEIGHT + 1) + row);
            let colour = if board.board_mask() & cell == 0 {
                Color::DarkBlue
            } else if first_player & cell != 0 {
                Color::Red
            } else {
                Color::Yellow
            };
            stdout.queue(PrintStyledContent(
                style("O ")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(colour),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    let labels: String = (1..=WIDTH).map(|column| format!("{column} ")).collect();
    stdout.queue(PrintStyledContent(style(labels + "\n")))?;
    stdout.flush()?;
    Ok(())
}

/// Asks for a column until a playable one is entered
fn prompt_column(board: &BitBoard) -> Result<usize> {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            bail!("standard input closed mid-game");
        }
        match input.trim().parse::<usize>() {
            Ok(column @ 1..=WIDTH) if board.playable(column - 1) => return Ok(column - 1),
            Ok(column @ 1..=WIDTH) => println!("Column {column} is full"),
            Ok(column) => println!("Column {column} is out of range"),
            Err(_) => println!("Enter a column between 1 and {WIDTH}"),
        }
    }
}

/// Picks the engine's move, preferring central columns on equal scores
fn engine_move(solver: &mut Solver, board: &BitBoard) -> usize {
    solver.reset();
    let scores = solver.analyze(board, false);

    let mut best = None;
    for column in move_order() {
        if board.playable(column) && best.map_or(true, |b: usize| scores[column] > scores[b]) {
            best = Some(column);
        }
    }
    best.expect("no playable column in a non-terminal position")
}
