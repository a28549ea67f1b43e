use crate::maze::{Coord, Direction};

/// Maps maze cells onto terminal positions.
///
/// The picture is a lattice of `(2 * cols + 1) x (2 * rows + 1)` glyphs: cell interiors
/// sit at odd/odd lattice positions, walls between them, and corners at even/even.
/// Each glyph is `glyph_width` terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Terminal position of the top-left corner glyph
    pub origin: (u16, u16),
    /// Width of a single glyph in terminal columns
    pub glyph_width: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            origin: (0, 0),
            glyph_width: 2,
        }
    }
}

impl Layout {
    /// Lattice size in glyphs for a `cols` x `rows` maze.
    pub fn lattice_size(cols: u16, rows: u16) -> (u32, u32) {
        (cols as u32 * 2 + 1, rows as u32 * 2 + 1)
    }

    /// Terminal area `(width, height)` needed to draw a `cols` x `rows` maze.
    pub fn screen_size(&self, cols: u16, rows: u16) -> (u32, u32) {
        let (w, h) = Layout::lattice_size(cols, rows);
        (
            self.origin.0 as u32 + w * self.glyph_width as u32,
            self.origin.1 as u32 + h,
        )
    }

    /// Terminal position of the glyph at lattice position `(x, y)`.
    pub fn glyph_position(&self, x: u16, y: u16) -> (u16, u16) {
        (
            self.origin.0 + x * self.glyph_width,
            self.origin.1 + y,
        )
    }

    /// Lattice position of a cell's interior.
    pub fn cell_center(coord: Coord) -> (u16, u16) {
        (coord.0 * 2 + 1, coord.1 * 2 + 1)
    }

    /// Lattice positions of the top-left and bottom-right corners around a cell.
    pub fn cell_bounds(coord: Coord) -> ((u16, u16), (u16, u16)) {
        let (x, y) = (coord.0 * 2, coord.1 * 2);
        ((x, y), (x + 2, y + 2))
    }

    /// Lattice position of the wall on the `direction` side of a cell.
    pub fn wall(coord: Coord, direction: Direction) -> (u16, u16) {
        let (x, y) = Layout::cell_center(coord);
        match direction {
            Direction::Left => (x - 1, y),
            Direction::Up => (x, y - 1),
            Direction::Right => (x + 1, y),
            Direction::Down => (x, y + 1),
        }
    }

    /// Lattice position of the wall shared by two adjacent cells.
    pub fn between(a: Coord, b: Coord) -> (u16, u16) {
        (a.0 + b.0 + 1, a.1 + b.1 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_surround_center() {
        let coord = (3, 1);
        assert_eq!(Layout::cell_center(coord), (7, 3));
        assert_eq!(Layout::wall(coord, Direction::Left), (6, 3));
        assert_eq!(Layout::wall(coord, Direction::Down), (7, 4));
        assert_eq!(Layout::cell_bounds(coord), ((6, 2), (8, 4)));
    }

    #[test]
    fn test_shared_wall_matches_both_sides() {
        let (a, b) = ((2, 2), (3, 2));
        assert_eq!(Layout::between(a, b), Layout::wall(a, Direction::Right));
        assert_eq!(Layout::between(b, a), Layout::wall(b, Direction::Left));
        let (c, d) = ((4, 0), (4, 1));
        assert_eq!(Layout::between(c, d), Layout::wall(d, Direction::Up));
    }

    #[test]
    fn test_screen_size_with_origin() {
        let layout = Layout {
            origin: (1, 2),
            glyph_width: 2,
        };
        assert_eq!(layout.screen_size(10, 5), (1 + 21 * 2, 2 + 11));
        assert_eq!(layout.glyph_position(3, 4), (7, 6));
    }
}
