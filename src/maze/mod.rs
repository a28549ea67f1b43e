pub mod cell;
pub mod grid;

use std::fmt;

use rand::rngs::StdRng;

pub use cell::{Cell, Walls};
pub use grid::Grid;

use crate::{
    error::MazeError,
    generators::Generator,
    observer::{MazeObserver, NoopObserver},
    solvers::{Solution, solve_maze},
};

/// Cell coordinate as `(col, row)`, with `(0, 0)` at the top-left.
pub type Coord = (u16, u16);

/// The four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Every direction, in the order neighbors are enumerated.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        };
        write!(f, "{}", name)
    }
}

/// A maze instance: the grid it carves, the random source used to carve it, and an
/// optional observer that is told about every change.
///
/// The observer is borrowed, never owned, and cannot influence the outcome.
pub struct Maze<'o> {
    grid: Grid,
    generator: Generator,
    observer: Option<&'o mut dyn MazeObserver>,
}

impl<'o> Maze<'o> {
    /// Creates a maze of `cols` x `rows` closed cells.
    /// A `seed` makes generation reproducible; without one the OS provides entropy.
    pub fn new(cols: u16, rows: u16, seed: Option<u64>) -> Result<Self, MazeError> {
        Ok(Maze {
            grid: Grid::new(cols, rows)?,
            generator: Generator::from_seed(seed),
            observer: None,
        })
    }

    /// Creates a maze that carves with the given random source.
    pub fn with_rng(cols: u16, rows: u16, rng: StdRng) -> Result<Self, MazeError> {
        Ok(Maze {
            grid: Grid::new(cols, rows)?,
            generator: Generator::new(rng),
            observer: None,
        })
    }

    /// Attaches an observer to be notified by `generate` and `solve`.
    pub fn with_observer(mut self, observer: &'o mut dyn MazeObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    pub fn rows(&self) -> u16 {
        self.grid.rows()
    }

    /// Carves the maze, cuts the entrance and exit, and clears the visited flags.
    pub fn generate(&mut self) -> Result<(), MazeError> {
        match self.observer.as_deref_mut() {
            Some(observer) => self.generator.generate(&mut self.grid, observer),
            None => self.generator.generate(&mut self.grid, &mut NoopObserver),
        }
    }

    /// Finds the path from the entrance to the exit.
    ///
    /// Visited flags are cleared first, so a maze can be solved more than once.
    pub fn solve(&mut self) -> Result<Solution, MazeError> {
        self.grid.reset_visited();
        match self.observer.as_deref_mut() {
            Some(observer) => solve_maze(&mut self.grid, observer),
            None => solve_maze(&mut self.grid, &mut NoopObserver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{EdgeMarking, MazeEvent, RecordingObserver};

    /// Checks that consecutive path cells share a broken wall and no cell repeats.
    fn assert_valid_path(grid: &Grid, path: &[Coord]) {
        assert_eq!(path.first(), Some(&grid.entrance()));
        assert_eq!(path.last(), Some(&grid.exit()));
        for pair in path.windows(2) {
            let step = grid
                .neighbors_of(pair[0])
                .find(|&(_, c)| c == pair[1])
                .map(|(d, _)| d)
                .expect("consecutive path cells must be adjacent");
            assert!(grid.has_passage(pair[0], step), "path crosses a wall at {:?}", pair);
        }
        let mut seen = path.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), path.len(), "path revisits a cell");
    }

    #[test]
    fn test_generated_mazes_are_perfect() {
        for (cols, rows) in [(1, 1), (1, 7), (9, 1), (2, 2), (12, 10), (39, 29)] {
            for seed in 0..20 {
                let mut maze = Maze::new(cols, rows, Some(seed)).unwrap();
                maze.generate().unwrap();
                let grid = maze.grid();
                assert_eq!(grid.passage_count(), cols as usize * rows as usize - 1);
                assert!(grid.is_spanning_tree(), "{cols}x{rows} seed {seed}");
                assert!(grid.walls_symmetric());
                assert!(!grid[grid.entrance()].has_top_wall());
                assert!(!grid[grid.exit()].has_bottom_wall());
                assert!(grid.coords().all(|c| !grid[c].is_visited()));
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let mut first = Maze::new(20, 15, Some(42)).unwrap();
        let mut second = Maze::new(20, 15, Some(42)).unwrap();
        first.generate().unwrap();
        second.generate().unwrap();
        assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn test_with_rng_matches_seed() {
        let mut seeded = Maze::new(11, 5, Some(99)).unwrap();
        let mut with_rng = Maze::with_rng(11, 5, crate::generators::get_rng(Some(99))).unwrap();
        seeded.generate().unwrap();
        with_rng.generate().unwrap();
        assert_eq!(seeded.into_grid(), with_rng.into_grid());
    }

    #[test]
    fn test_generated_mazes_are_solvable() {
        for seed in 0..30 {
            let mut maze = Maze::new(15, 11, Some(seed)).unwrap();
            maze.generate().unwrap();
            let solution = maze.solve().unwrap();
            assert_valid_path(maze.grid(), solution.path());
            assert!(solution.visited() >= solution.len());
        }
    }

    #[test]
    fn test_solving_twice_gives_same_path() {
        let mut maze = Maze::new(8, 8, Some(7)).unwrap();
        maze.generate().unwrap();
        let first = maze.solve().unwrap();
        let second = maze.solve().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_cell_maze() {
        let mut maze = Maze::new(1, 1, None).unwrap();
        maze.generate().unwrap();
        let cell = maze.grid()[(0, 0)];
        assert!(!cell.has_top_wall());
        assert!(!cell.has_bottom_wall());
        assert!(cell.has_left_wall());
        assert!(cell.has_right_wall());
        assert_eq!(maze.grid().passage_count(), 0);

        let solution = maze.solve().unwrap();
        assert_eq!(solution.path(), &[(0, 0)]);
    }

    #[test]
    fn test_two_by_one_maze() {
        let mut maze = Maze::new(2, 1, Some(3)).unwrap();
        maze.generate().unwrap();
        assert_eq!(maze.grid().passage_count(), 1);
        assert!(maze.grid().has_passage((0, 0), Direction::Right));

        let solution = maze.solve().unwrap();
        assert_eq!(solution.path(), &[(0, 0), (1, 0)]);
    }

    #[test]
    fn test_observer_sees_generation_and_solving() {
        let mut recorder = RecordingObserver::default();
        {
            let mut maze = Maze::new(2, 1, Some(1)).unwrap().with_observer(&mut recorder);
            maze.generate().unwrap();
            maze.solve().unwrap();
        }
        let edges = recorder
            .events
            .iter()
            .filter_map(|e| match e {
                MazeEvent::EdgeMark { from, to, marking } => Some((*from, *to, *marking)),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(edges, vec![((0, 0), (1, 0), EdgeMarking::Forward)]);

        let cell_updates = recorder
            .events
            .iter()
            .filter(|e| matches!(e, MazeEvent::CellUpdated { .. }))
            .count();
        // Two cells per carved wall, then entrance and exit
        assert_eq!(cell_updates, 4);
    }

    #[test]
    fn test_direction_opposite() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }
}
