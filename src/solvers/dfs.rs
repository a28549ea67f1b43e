use super::Solution;
use crate::{
    error::MazeError,
    maze::{Coord, Grid},
    observer::{EdgeMarking, MazeObserver},
};

/// One level of the depth-first search: a cell and the passages still to try from it.
struct Frame {
    coord: Coord,
    candidates: Vec<Coord>,
    cursor: usize,
}

impl Frame {
    /// Next candidate that nothing has visited since this frame was entered.
    fn next_candidate(&mut self, grid: &Grid) -> Option<Coord> {
        while let Some(&next) = self.candidates.get(self.cursor) {
            self.cursor += 1;
            if !grid[next].is_visited() {
                return Some(next);
            }
        }
        None
    }
}

/// Marks `coord` visited and collects the unvisited neighbors reachable through a
/// broken wall, in the order left, up, right, down. The goal has no candidates.
fn enter<O: MazeObserver + ?Sized>(
    grid: &mut Grid,
    coord: Coord,
    goal: Coord,
    observer: &mut O,
) -> Result<Frame, MazeError> {
    grid.cell_at_mut(coord)?.set_visited(true);
    observer.on_step();

    let candidates = if coord == goal {
        Vec::new()
    } else {
        grid.neighbors_of(coord)
            .filter(|&(d, c)| grid.has_passage(coord, d) && !grid[c].is_visited())
            .map(|(_, c)| c)
            .collect()
    };
    Ok(Frame {
        coord,
        candidates,
        cursor: 0,
    })
}

/// Depth-first search with backtracking from `start` to `goal`, walking only through
/// broken walls and never entering a cell twice.
///
/// Every edge tried is reported as [`EdgeMarking::Forward`], and as
/// [`EdgeMarking::Undo`] once the search backs out of it.
///
/// # Errors
/// * `OutOfBounds` if `start` is outside the grid
/// * `InvalidMazeState` if `goal` cannot be reached from `start`
pub fn solve_dfs<O: MazeObserver + ?Sized>(
    grid: &mut Grid,
    start: Coord,
    goal: Coord,
    observer: &mut O,
) -> Result<Solution, MazeError> {
    let mut stack = vec![enter(grid, start, goal, observer)?];
    let mut visited = 1;

    while let Some(frame) = stack.last_mut() {
        if frame.coord == goal {
            let path = stack.iter().map(|f| f.coord).collect();
            return Ok(Solution { path, visited });
        }

        match frame.next_candidate(grid) {
            Some(next) => {
                let from = frame.coord;
                observer.on_edge_mark(from, next, EdgeMarking::Forward);
                stack.push(enter(grid, next, goal, observer)?);
                visited += 1;
            }
            None => {
                // Dead end, back out to the previous cell
                let dead_end = frame.coord;
                stack.pop();
                if let Some(parent) = stack.last() {
                    observer.on_edge_mark(parent.coord, dead_end, EdgeMarking::Undo);
                }
            }
        }
    }

    Err(MazeError::InvalidMazeState { visited })
}
