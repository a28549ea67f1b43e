use crate::error::MazeError;

use super::{Coord, Direction, cell::Cell};

/// Rectangular collection of cells addressed by `(col, row)`.
///
/// The grid owns every cell and its shape never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    cols: u16,
    rows: u16,
}

impl Grid {
    /// Creates a grid where every cell has all four walls and is unvisited.
    pub fn new(cols: u16, rows: u16) -> Result<Self, MazeError> {
        if cols == 0 || rows == 0 {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }
        let data = vec![Cell::new(); cols as usize * rows as usize].into_boxed_slice();
        Ok(Grid { data, cols, rows })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    /// Top-left cell, where the entrance is cut.
    pub fn entrance(&self) -> Coord {
        (0, 0)
    }

    /// Bottom-right cell, where the exit is cut.
    pub fn exit(&self) -> Coord {
        (self.cols - 1, self.rows - 1)
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.cols && coord.1 < self.rows
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        // Overflow-safe since both dimensions are u16 (assuming usize is at least 32 bits)
        coord.1 as usize * self.cols as usize + coord.0 as usize
    }

    fn check_bounds(&self, coord: Coord) -> Result<usize, MazeError> {
        if self.is_in_bounds(coord) {
            Ok(self.ravel_index(coord))
        } else {
            Err(MazeError::OutOfBounds {
                coord,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    /// Bounds-checked access to a cell.
    pub fn cell_at(&self, coord: Coord) -> Result<&Cell, MazeError> {
        let idx = self.check_bounds(coord)?;
        Ok(&self.data[idx])
    }

    /// Bounds-checked mutable access to a cell.
    ///
    /// Wall flags cannot be changed through this handle; use
    /// [`Grid::break_wall_between`] so both sides of a wall stay in sync.
    pub fn cell_at_mut(&mut self, coord: Coord) -> Result<&mut Cell, MazeError> {
        let idx = self.check_bounds(coord)?;
        Ok(&mut self.data[idx])
    }

    /// Iterates over every coordinate, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (cols, rows) = (self.cols, self.rows);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (col, row)))
    }

    /// The in-bounds cell one step from `coord` in `direction`, if any.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (col, row) = coord;
        // NOTE: When col or row is 0, wrapping_sub yields u16::MAX which the bounds
        // check filters out. saturating_add caps at u16::MAX, which is never a valid
        // index since the largest dimension is u16::MAX.
        let next = match direction {
            Direction::Left => (col.wrapping_sub(1), row),
            Direction::Up => (col, row.wrapping_sub(1)),
            Direction::Right => (col.saturating_add(1), row),
            Direction::Down => (col, row.saturating_add(1)),
        };
        (self.is_in_bounds(coord) && self.is_in_bounds(next)).then_some(next)
    }

    /// Get the grid-adjacent cells of `coord`, tagged by direction, in the order
    /// left, up, right, down. An out-of-bounds `coord` has no neighbors.
    pub fn neighbors_of(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(coord, d).map(|c| (d, c)))
    }

    /// Breaks the wall between `a` and its neighbor `b` lying in `direction`.
    ///
    /// Both sides of the wall are cleared together. Nothing is modified on error.
    ///
    /// # Errors
    /// * `OutOfBounds` if either coordinate is outside the grid
    /// * `NotAdjacent` if `b` is not the neighbor of `a` in `direction`
    pub fn break_wall_between(
        &mut self,
        a: Coord,
        b: Coord,
        direction: Direction,
    ) -> Result<(), MazeError> {
        let idx_a = self.check_bounds(a)?;
        let idx_b = self.check_bounds(b)?;
        if self.neighbor(a, direction) != Some(b) {
            return Err(MazeError::NotAdjacent {
                from: a,
                to: b,
                direction,
            });
        }
        self.data[idx_a].set_wall(direction, false);
        self.data[idx_b].set_wall(direction.opposite(), false);
        Ok(())
    }

    /// Breaks a wall on the outer boundary of the grid, which has no cell behind it.
    ///
    /// # Errors
    /// * `OutOfBounds` if `coord` is outside the grid
    /// * `NotOnBoundary` if another cell lies behind the wall
    pub fn break_outer_wall(&mut self, coord: Coord, direction: Direction) -> Result<(), MazeError> {
        let idx = self.check_bounds(coord)?;
        if self.neighbor(coord, direction).is_some() {
            return Err(MazeError::NotOnBoundary { coord, direction });
        }
        self.data[idx].set_wall(direction, false);
        Ok(())
    }

    /// Checks whether a passage leads from `coord` to an in-bounds neighbor in `direction`.
    /// The wall is read from `coord`'s side.
    pub fn has_passage(&self, coord: Coord, direction: Direction) -> bool {
        self.neighbor(coord, direction).is_some() && !self[coord].has_wall(direction)
    }

    /// Clears the visited flag of every cell. Wall state is untouched.
    pub fn reset_visited(&mut self) {
        self.data.iter_mut().for_each(|cell| cell.set_visited(false));
    }

    /// Interior passages as `(from, to)` pairs, each counted once (rightward and
    /// downward from `from`).
    pub fn passages(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.coords().flat_map(move |coord| {
            [Direction::Right, Direction::Down]
                .into_iter()
                .filter(move |&d| self.has_passage(coord, d))
                .filter_map(move |d| self.neighbor(coord, d).map(|next| (coord, next)))
        })
    }

    /// Number of broken interior walls.
    pub fn passage_count(&self) -> usize {
        self.passages().count()
    }

    /// Checks that every shared wall is either standing on both sides or broken on both.
    pub fn walls_symmetric(&self) -> bool {
        self.coords().all(|coord| {
            [Direction::Right, Direction::Down].into_iter().all(|d| {
                match self.neighbor(coord, d) {
                    Some(next) => self[coord].has_wall(d) == self[next].has_wall(d.opposite()),
                    None => true,
                }
            })
        })
    }

    /// Checks that the passages form a spanning tree: exactly `cells - 1` of them,
    /// none closing a cycle.
    pub fn is_spanning_tree(&self) -> bool {
        if self.passage_count() != self.cell_count() - 1 {
            return false;
        }
        let mut uf = UnionFind::new(self.cell_count());
        self.passages()
            .all(|(a, b)| uf.unite(self.ravel_index(a), self.ravel_index(b)))
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(
            self.is_in_bounds(index),
            "coordinate {:?} is outside the {}x{} grid",
            index,
            self.cols,
            self.rows
        );
        &self.data[self.ravel_index(index)]
    }
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        // Iterative with path halving, grids can hold far more cells than the call stack allows
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns false if `x` and `y` were already in the same set.
    fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] = self.rank[root_x].saturating_add(1);
            }
        }
        true
    }
}
