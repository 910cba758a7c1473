//! A strong solver for the board game 'Connect 4'
//!
//! Given any legal position, the solver returns its exact game-theoretic
//! score under perfect play from both sides, or only the sign of that score
//! in weak mode. Positions can also be analysed move by move.
//!
//! # Basic Usage
//!
//! ```
//! use c4solver::{bitboard::BitBoard, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = BitBoard::from_moves("112233")?;
//! let mut solver = Solver::new();
//!
//! assert_eq!(solver.solve(&board, false), 18);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod transposition_table;

pub mod bitboard;

pub mod opening_book;

pub mod solver;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// ensure that the given dimensions fit in a u64 for the bitboard representation
const_assert!(WIDTH * (HEIGHT + 1) < 64);
