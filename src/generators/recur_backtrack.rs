use rand::Rng;

use crate::{
    error::MazeError,
    maze::{Coord, Direction, Grid},
    observer::MazeObserver,
};

/// Carves passages from `start` with randomized depth-first backtracking until every
/// reachable cell is visited. Returns the number of walls broken.
///
/// Cells already marked visited are treated as carved, so `grid` should come in with
/// all visited flags cleared. Visited flags are left set on return.
pub fn carve_passages<R: Rng, O: MazeObserver + ?Sized>(
    grid: &mut Grid,
    start: Coord,
    rng: &mut R,
    observer: &mut O,
) -> Result<usize, MazeError> {
    grid.cell_at_mut(start)?.set_visited(true);

    // The stack holds the current carving path, deepest cell on top
    let mut stack = vec![start];
    let mut carved = 0;

    while let Some(cell) = stack.pop() {
        let neighbors = grid
            .neighbors_of(cell)
            .filter(|&(_, c)| !grid[c].is_visited())
            .collect::<Vec<_>>();

        if !neighbors.is_empty() {
            let (direction, neighbor) = neighbors[rng.random_range(0..neighbors.len())];
            grid.break_wall_between(cell, neighbor, direction)?;
            observer.on_cell_updated(cell, grid[cell].walls());
            observer.on_cell_updated(neighbor, grid[neighbor].walls());
            observer.on_step();

            grid.cell_at_mut(neighbor)?.set_visited(true);
            carved += 1;
            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            // Put the neighbor to carve the maze in that neighbor's direction
            stack.push(neighbor);
        }
    }

    tracing::trace!("[generate] carving from {:?} broke {} walls", start, carved);
    Ok(carved)
}

/// Opens the top wall of the top-left cell and the bottom wall of the bottom-right cell.
pub fn break_entrance_and_exit<O: MazeObserver + ?Sized>(
    grid: &mut Grid,
    observer: &mut O,
) -> Result<(), MazeError> {
    for (coord, direction) in [
        (grid.entrance(), Direction::Up),
        (grid.exit(), Direction::Down),
    ] {
        grid.break_outer_wall(coord, direction)?;
        observer.on_cell_updated(coord, grid[coord].walls());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::get_rng,
        observer::{MazeEvent, NoopObserver, RecordingObserver},
    };

    #[test]
    fn test_carve_visits_every_cell() {
        let mut grid = Grid::new(6, 4).unwrap();
        let mut rng = get_rng(Some(9));
        let carved = carve_passages(&mut grid, (0, 0), &mut rng, &mut NoopObserver).unwrap();
        assert_eq!(carved, 23);
        assert!(grid.coords().all(|c| grid[c].is_visited()));
        assert!(grid.is_spanning_tree());
    }

    #[test]
    fn test_carve_from_other_start() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut rng = get_rng(Some(1));
        carve_passages(&mut grid, (3, 2), &mut rng, &mut NoopObserver).unwrap();
        assert!(grid.is_spanning_tree());
        // No outer wall is touched by carving
        assert!(grid[(0, 0)].has_top_wall());
        assert!(grid[(4, 4)].has_bottom_wall());
    }

    #[test]
    fn test_carve_rejects_out_of_bounds_start() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut rng = get_rng(Some(0));
        let result = carve_passages(&mut grid, (2, 0), &mut rng, &mut NoopObserver);
        assert!(matches!(result, Err(MazeError::OutOfBounds { .. })));
    }

    #[test]
    fn test_carve_notifies_both_cells() {
        let mut grid = Grid::new(3, 1).unwrap();
        let mut rng = get_rng(Some(5));
        let mut recorder = RecordingObserver::default();
        carve_passages(&mut grid, (0, 0), &mut rng, &mut recorder).unwrap();
        // A 3x1 strip carved from its end is a straight line
        assert_eq!(
            recorder.events,
            vec![
                MazeEvent::CellUpdated {
                    coord: (0, 0),
                    walls: grid[(0, 0)].walls()
                },
                MazeEvent::CellUpdated {
                    coord: (1, 0),
                    walls: {
                        let mut w = grid[(1, 0)].walls();
                        w.right = true;
                        w
                    }
                },
                MazeEvent::Step,
                MazeEvent::CellUpdated {
                    coord: (1, 0),
                    walls: grid[(1, 0)].walls()
                },
                MazeEvent::CellUpdated {
                    coord: (2, 0),
                    walls: grid[(2, 0)].walls()
                },
                MazeEvent::Step,
            ]
        );
    }

    #[test]
    fn test_break_entrance_and_exit() {
        let mut grid = Grid::new(12, 10).unwrap();
        let mut recorder = RecordingObserver::default();
        break_entrance_and_exit(&mut grid, &mut recorder).unwrap();
        assert!(!grid[(0, 0)].has_top_wall());
        assert!(!grid[(11, 9)].has_bottom_wall());
        assert_eq!(grid.passage_count(), 0);
        assert_eq!(recorder.events.len(), 2);
    }
}
