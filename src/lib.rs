//! Perfect maze generation by randomized recursive backtracking, solved by a
//! depth-first search that retracts dead ends.
//!
//! The algorithms live in [`generators`] and [`solvers`] and only touch the
//! [`maze::Grid`]. Anything that wants to watch them work implements
//! [`observer::MazeObserver`]; the terminal front-end in [`app`] is one such observer.

pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod observer;
pub mod solvers;

pub use error::MazeError;
pub use maze::{Coord, Direction, Grid, Maze};
pub use observer::{EdgeMarking, MazeEvent, MazeObserver};
pub use solvers::Solution;
