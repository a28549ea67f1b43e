use std::fmt;

use crate::maze::Direction;

/// Wall flags of a single cell. `true` means the wall is standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walls {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Walls {
    /// All four walls standing.
    pub const CLOSED: Walls = Walls {
        left: true,
        right: true,
        top: true,
        bottom: true,
    };

    /// Checks whether the wall facing `direction` is standing.
    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
        }
    }

    /// Sets the wall facing `direction`. Returns whether the flag changed.
    pub fn set(&mut self, direction: Direction, standing: bool) -> bool {
        let flag = match direction {
            Direction::Left => &mut self.left,
            Direction::Up => &mut self.top,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.bottom,
        };
        let changed = *flag != standing;
        *flag = standing;
        changed
    }

    /// Number of walls still standing.
    pub fn count(&self) -> usize {
        Direction::ALL.iter().filter(|&&d| self.has(d)).count()
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::CLOSED
    }
}

/// Represents a cell of the maze: its four walls and a visited flag shared by the
/// generation and solving passes.
///
/// Walls are only ever broken in pairs through [`Grid`](crate::maze::Grid), which keeps
/// neighboring cells consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    walls: Walls,
    visited: bool,
}

impl Cell {
    pub const fn new() -> Self {
        Cell {
            walls: Walls::CLOSED,
            visited: false,
        }
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.has(direction)
    }

    pub fn has_left_wall(&self) -> bool {
        self.walls.left
    }

    pub fn has_right_wall(&self) -> bool {
        self.walls.right
    }

    pub fn has_top_wall(&self) -> bool {
        self.walls.top
    }

    pub fn has_bottom_wall(&self) -> bool {
        self.walls.bottom
    }

    pub(super) fn set_wall(&mut self, direction: Direction, standing: bool) -> bool {
        self.walls.set(direction, standing)
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

impl fmt::Display for Walls {
    /// Compact `LURD` notation, lowercase letters for broken walls.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = |standing: bool, c: char| {
            if standing { c } else { c.to_ascii_lowercase() }
        };
        write!(
            f,
            "{}{}{}{}",
            glyph(self.left, 'L'),
            glyph(self.top, 'U'),
            glyph(self.right, 'R'),
            glyph(self.bottom, 'D')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_closed_and_unvisited() {
        let cell = Cell::new();
        assert!(cell.has_left_wall());
        assert!(cell.has_right_wall());
        assert!(cell.has_top_wall());
        assert!(cell.has_bottom_wall());
        assert!(!cell.is_visited());
        assert_eq!(cell.walls().count(), 4);
    }

    #[test]
    fn test_set_wall_reports_change() {
        let mut cell = Cell::new();
        assert!(cell.set_wall(Direction::Up, false));
        // Breaking the same wall again changes nothing
        assert!(!cell.set_wall(Direction::Up, false));
        assert!(!cell.has_top_wall());
        assert_eq!(cell.walls().count(), 3);
    }

    #[test]
    fn test_walls_display() {
        let mut walls = Walls::CLOSED;
        walls.set(Direction::Right, false);
        assert_eq!(walls.to_string(), "LUrD");
    }
}
