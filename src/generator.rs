use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{CellValue, Grid, Position};
use crate::solver;
use crate::{Result, SudokuError};

/// Runs the backtracking search with candidates shuffled through `rng`
/// instead of tried in ascending order. On an initially empty grid this
/// always succeeds and leaves behind a random complete solution.
pub fn generate<R: Rng>(grid: &mut Grid, rng: &mut R) -> bool {
    debug!("generating with {} cells already filled", grid.filled_count());
    solver::solve_with(grid, &mut |values| values.shuffle(rng))
}

/// Clears uniformly random filled cells until exactly `keep_count` remain.
/// The grid must be completely filled and `keep_count` must lie in
/// `0..=81`; both are checked before anything is cleared.
pub fn reduce<R: Rng>(grid: &mut Grid, keep_count: usize, rng: &mut R) -> Result<()> {
    if keep_count > 81 {
        return Err(SudokuError::KeepCountOutOfRange(keep_count));
    }

    let mut filled: Vec<Position> = Grid::positions()
        .filter(|&pos| !grid.get(pos).is_empty())
        .collect();
    if filled.len() < 81 {
        return Err(SudokuError::IncompleteGrid(filled.len()));
    }

    debug!("clearing {} of 81 cells", 81 - keep_count);
    filled.shuffle(rng);
    for pos in filled.into_iter().take(81 - keep_count) {
        grid.set(pos, CellValue::Empty);
    }

    Ok(())
}

/// Generates a random full solution and reduces it to a puzzle with
/// `keep_count` filled cells.
pub fn random_puzzle<R: Rng>(keep_count: usize, rng: &mut R) -> Result<Grid> {
    if keep_count > 81 {
        return Err(SudokuError::KeepCountOutOfRange(keep_count));
    }

    let mut grid = Grid::new();
    let generated = generate(&mut grid, rng);
    debug_assert!(generated, "an empty grid always has a completion");

    reduce(&mut grid, keep_count, rng)?;
    Ok(grid)
}
