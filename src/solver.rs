use log::{debug, trace};

use crate::checker;
use crate::grid::{CellValue, Grid, Position};

/// The first empty position in row-major scan order, or `None` once the
/// grid is completely filled.
pub fn find_empty_position(grid: &Grid) -> Option<Position> {
    Grid::positions().find(|&pos| grid.get(pos).is_empty())
}

// The search shared by solving and generation:
//   1. Find the first empty position; none left means success.
//   2. Compute the legal candidates for it and let the caller reorder them.
//   3. Place each candidate in turn and recurse.
//   4. If no candidate works, clear the position again and fail this branch.
// Only checked-legal values are ever placed, so the filled part of the grid
// stays consistent throughout the search. Depth is bounded by 81 because
// every recursive call fills one more cell.
pub(crate) fn solve_with<F>(grid: &mut Grid, reorder: &mut F) -> bool
where
    F: FnMut(&mut Vec<u8>),
{
    let pos = match find_empty_position(grid) {
        Some(pos) => pos,
        None => return true,
    };

    let mut values = checker::candidates(grid, pos);
    reorder(&mut values);

    for value in values {
        trace!("trying {} at ({}, {})", value, pos.row, pos.col);
        grid.set(pos, CellValue::Fixed(value));
        if solve_with(grid, reorder) {
            return true;
        }
        grid.set(pos, CellValue::Empty);
    }

    false
}

/// Fills every empty cell of `grid` with the first completion found under
/// row-major scan order and ascending candidate order, i.e. the
/// lexicographically smallest completion, which need not be the only one.
/// Returns false without touching the original empty cells when no legal
/// completion exists; an unsolvable grid is an ordinary outcome here, not
/// an error.
pub fn solve(grid: &mut Grid) -> bool {
    debug!("solving grid with {} empty cells", 81 - grid.filled_count());
    solve_with(grid, &mut |_| {})
}
