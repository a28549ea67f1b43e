use std::{
    fmt,
    io::{Stdout, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError},
    },
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::layout::Layout,
    maze::{Coord, Direction, Walls},
    observer::{EdgeMarking, MazeEvent},
};

/// What a single lattice position shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Open,
    Route,
    Undo,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Wall => "██".with(Color::White),
            Glyph::Open => "  ".with(Color::Reset),
            Glyph::Route => "██".with(Color::Red),
            Glyph::Undo => "██".with(Color::DarkGrey),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererStatus {
    Completed,
    Cancelled,
}

/// Draws maze events onto the terminal as they arrive.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    layout: Layout,
    /// Time to wait after each algorithm step, so the animation is watchable
    step_delay: Duration,
    /// How long to wait for an event before checking the cancel flag again
    recv_timeout: Duration,
}

impl Renderer {
    pub fn new(layout: Layout, step_delay: Duration) -> Self {
        Self {
            stdout: std::io::stdout(),
            layout,
            step_delay,
            recv_timeout: Duration::from_millis(100),
        }
    }

    fn put(&mut self, lattice: (u16, u16), glyph: Glyph) -> std::io::Result<()> {
        let (x, y) = self.layout.glyph_position(lattice.0, lattice.1);
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(glyph))?;
        Ok(())
    }

    /// Draws a `cols` x `rows` maze with every wall standing.
    pub fn draw_closed_grid(&mut self, cols: u16, rows: u16) -> std::io::Result<()> {
        self.stdout.queue(terminal::Clear(ClearType::All))?;
        let (width, height) = Layout::lattice_size(cols, rows);
        for y in 0..height as u16 {
            for x in 0..width as u16 {
                let glyph = if x % 2 == 1 && y % 2 == 1 {
                    Glyph::Open
                } else {
                    Glyph::Wall
                };
                self.put((x, y), glyph)?;
            }
        }
        self.stdout.flush()
    }

    fn draw_cell(&mut self, coord: Coord, walls: Walls) -> std::io::Result<()> {
        for direction in Direction::ALL {
            let glyph = if walls.has(direction) {
                Glyph::Wall
            } else {
                Glyph::Open
            };
            self.put(Layout::wall(coord, direction), glyph)?;
        }
        Ok(())
    }

    fn draw_edge(&mut self, from: Coord, to: Coord, marking: EdgeMarking) -> std::io::Result<()> {
        match marking {
            EdgeMarking::Forward => {
                self.put(Layout::cell_center(from), Glyph::Route)?;
                self.put(Layout::between(from, to), Glyph::Route)?;
                self.put(Layout::cell_center(to), Glyph::Route)?;
            }
            EdgeMarking::Undo => {
                // `from` stays on the route, only the retracted part is greyed out
                self.put(Layout::between(from, to), Glyph::Undo)?;
                self.put(Layout::cell_center(to), Glyph::Undo)?;
            }
        }
        Ok(())
    }

    /// Render a single maze event. Output is flushed on each step.
    pub fn render_event(&mut self, event: &MazeEvent) -> std::io::Result<()> {
        match *event {
            MazeEvent::CellUpdated { coord, walls } => self.draw_cell(coord, walls),
            MazeEvent::EdgeMark { from, to, marking } => self.draw_edge(from, to, marking),
            MazeEvent::Step => {
                self.stdout.flush()?;
                if !self.step_delay.is_zero() {
                    std::thread::sleep(self.step_delay);
                }
                Ok(())
            }
        }
    }

    /// Render events until the sending side hangs up or `cancel` is raised.
    pub fn render(
        &mut self,
        event_rx: Receiver<MazeEvent>,
        cancel: &AtomicBool,
    ) -> std::io::Result<RendererStatus> {
        loop {
            if cancel.load(Ordering::Relaxed) {
                tracing::debug!("[render] cancel requested, dropping remaining events");
                return Ok(RendererStatus::Cancelled);
            }
            match event_rx.recv_timeout(self.recv_timeout) {
                Ok(event) => self.render_event(&event)?,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("[render] event channel closed, rendering done");
                    self.stdout.flush()?;
                    return Ok(RendererStatus::Completed);
                }
            }
        }
    }

    /// Print a status line just below the maze, cut to the terminal width.
    pub fn print_status(&mut self, rows: u16, msg: &str, color: Color) -> std::io::Result<()> {
        use unicode_truncate::UnicodeTruncateStr;

        let (term_width, _) = terminal::size()?;
        let (line, _) = msg.unicode_truncate(term_width as usize);
        let (_, y) = self.layout.glyph_position(0, rows * 2 + 1);
        queue!(
            self.stdout,
            cursor::MoveTo(0, y),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(line.with(color).bold()),
        )?;
        self.stdout.flush()
    }
}
