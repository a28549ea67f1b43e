mod dfs;

pub use dfs::solve_dfs;

use crate::{
    error::MazeError,
    maze::{Coord, Grid},
    observer::MazeObserver,
};

/// A path from the entrance to the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Cells from the entrance to the exit, both included
    path: Vec<Coord>,
    /// Number of cells the search visited, dead ends included
    visited: usize,
}

impl Solution {
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Solve the maze from the top-left cell to the bottom-right cell.
///
/// The grid must come in with all visited flags cleared.
pub fn solve_maze<O: MazeObserver + ?Sized>(
    grid: &mut Grid,
    observer: &mut O,
) -> Result<Solution, MazeError> {
    let start = grid.entrance();
    let goal = grid.exit();
    tracing::debug!("[solve] searching from {:?} to {:?}", start, goal);

    let result = solve_dfs(grid, start, goal, observer);
    match &result {
        Ok(solution) => tracing::debug!(
            "[solve] path of {} cells found after visiting {}",
            solution.len(),
            solution.visited()
        ),
        Err(err) => tracing::warn!("[solve] {}", err),
    }
    result
}
