use thiserror::Error;

use crate::maze::{Coord, Direction};

/// Errors raised when a maze operation is asked to violate the grid's contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("coordinate {coord:?} is outside the {cols}x{rows} grid")]
    OutOfBounds { coord: Coord, cols: u16, rows: u16 },
    #[error("{to:?} is not the {direction:?} neighbor of {from:?}")]
    NotAdjacent {
        from: Coord,
        to: Coord,
        direction: Direction,
    },
    #[error("the {direction:?} wall of {coord:?} is shared with another cell")]
    NotOnBoundary { coord: Coord, direction: Direction },
    #[error("grid dimensions must be positive, got {cols}x{rows}")]
    InvalidDimensions { cols: u16, rows: u16 },
    #[error("no path from the entrance to the exit after visiting {visited} cells")]
    InvalidMazeState { visited: usize },
}

impl From<MazeError> for std::io::Error {
    fn from(err: MazeError) -> Self {
        std::io::Error::other(err)
    }
}
