//! A 9x9 Sudoku engine built around exhaustive backtracking search.
//!
//! The [grid::Grid] type stores the puzzle, [checker] answers legality
//! questions about it, [solver] fills it in, and [generator] produces new
//! puzzles by generating a random full solution and clearing cells.

use thiserror::Error;

pub mod checker;
pub mod generator;
pub mod grid;
pub mod pdf;
pub mod solver;

#[derive(Debug, Error)]
pub enum SudokuError {
    #[error("keep count must be between 0 and 81, got {0}")]
    KeepCountOutOfRange(usize),
    #[error("grid must be completely filled, found only {0} filled cells")]
    IncompleteGrid(usize),
    #[error("malformed puzzle text: {0}")]
    Parse(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SudokuError>;
