use std::collections::HashSet;

use crate::maze::{Coord, Direction, Grid};

/// Draws the maze as plain ASCII, marking the cells of `path` with `*`.
///
/// ```text
/// +  +--+
/// |** **|
/// +--+  +
/// ```
pub fn render_text(grid: &Grid, path: &[Coord]) -> String {
    let on_path = path.iter().copied().collect::<HashSet<_>>();
    let mut out = String::new();

    for row in 0..grid.rows() {
        // Top walls of this row
        for col in 0..grid.cols() {
            out.push('+');
            out.push_str(if grid[(col, row)].has_top_wall() { "--" } else { "  " });
        }
        out.push_str("+\n");

        // Interiors and vertical walls
        for col in 0..grid.cols() {
            let cell = &grid[(col, row)];
            out.push(if cell.has_left_wall() { '|' } else { ' ' });
            out.push_str(if on_path.contains(&(col, row)) { "**" } else { "  " });
        }
        let last = &grid[(grid.cols() - 1, row)];
        out.push(if last.has_right_wall() { '|' } else { ' ' });
        out.push('\n');
    }

    // Bottom walls of the last row
    let last_row = grid.rows() - 1;
    for col in 0..grid.cols() {
        out.push('+');
        let open = !grid[(col, last_row)].has_wall(Direction::Down);
        out.push_str(if open { "  " } else { "--" });
    }
    out.push_str("+\n");
    out
}
