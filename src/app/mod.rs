pub mod layout;
mod renderer;
mod text;

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::SyncSender,
    },
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

pub use renderer::{Glyph, Renderer, RendererStatus};
pub use text::render_text;

use crate::{
    config::RenderConfig,
    error::MazeError,
    maze::{Grid, Maze},
    observer::{ChannelObserver, MazeEvent},
    solvers::Solution,
};

pub struct App {
    config: RenderConfig,
    /// How often the input thread checks whether rendering is over
    input_poll_timeout: Duration,
}

impl Default for App {
    fn default() -> Self {
        App::new(RenderConfig::default())
    }
}

impl App {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            input_poll_timeout: Duration::from_millis(100),
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    /// even if the panic occurs in a different thread
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Generate and solve a maze without any terminal animation.
    pub fn run_headless(
        &self,
        cols: u16,
        rows: u16,
        seed: Option<u64>,
    ) -> Result<(Grid, Solution), MazeError> {
        let mut maze = Maze::new(cols, rows, seed)?;
        maze.generate()?;
        App::log_sanity_check(&maze);
        let solution = maze.solve()?;
        Ok((maze.into_grid(), solution))
    }

    /// Animate generation and solving of a `cols` x `rows` maze in the terminal.
    /// The terminal must already be set up with [`App::setup_terminal`].
    pub fn run(
        &self,
        stdout: &mut Stdout,
        cols: u16,
        rows: u16,
        seed: Option<u64>,
    ) -> std::io::Result<()> {
        // Check if terminal height and width are sufficient
        let (term_width, term_height) = terminal::size()?;
        let (needed_width, needed_height) = self.config.layout.screen_size(cols, rows);
        // One extra line for the status message
        if (term_width as u32) < needed_width || (term_height as u32) < needed_height + 1 {
            tracing::warn!(
                "Terminal {}x{} is too small for a {}x{} maze",
                term_width,
                term_height,
                cols,
                rows
            );
            queue!(
                stdout,
                style::PrintStyledContent(
                    format!(
                        "Terminal size is too small for a {}x{} maze ({}x{} needed). Please resize the terminal or pick a smaller maze.\r\n",
                        cols,
                        rows,
                        needed_width,
                        needed_height + 1
                    )
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
                ),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            stdout.flush()?;
            App::wait_for_esc()?;
            return Ok(());
        }

        let mut renderer = Renderer::new(self.config.layout, self.config.step_delay);
        renderer.draw_closed_grid(cols, rows)?;

        // Flag to indicate rendering is done. Set to true by the main thread once the renderer returns.
        let render_done = Arc::new(AtomicBool::new(false));
        // Flag to indicate rendering should be cancelled. Set to true by the input thread on Esc key event.
        let render_cancel = Arc::new(AtomicBool::new(false));

        let input_poll_timeout = self.input_poll_timeout;
        let render_done_for_input = render_done.clone();
        let render_cancel_for_input = render_cancel.clone();
        // Spawn a thread to listen for user input
        let input_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
            App::listen_for_cancel(
                input_poll_timeout,
                &render_done_for_input,
                &render_cancel_for_input,
            )
        });

        let (maze_event_tx, maze_event_rx) =
            std::sync::mpsc::sync_channel::<MazeEvent>(self.config.channel_capacity);

        // Spawn a thread to generate maze and solve it
        let compute_thread_handle = std::thread::Builder::new()
            .name("compute".into())
            .spawn(move || App::compute(cols, rows, seed, maze_event_tx))?;

        tracing::info!("Started rendering a {}x{} maze", cols, rows);
        let status = renderer.render(maze_event_rx, &render_cancel);
        // The receiver is gone now, so the compute thread can no longer block on a full channel
        render_done.store(true, Ordering::Relaxed);

        // Wait for input thread to finish
        let _ = input_thread_handle.join();

        // Wait for compute thread to finish
        let outcome = compute_thread_handle
            .join()
            .map_err(|_| std::io::Error::other("compute thread panicked"))?;

        if let RendererStatus::Cancelled = status? {
            tracing::info!("Rendering was cancelled by user.");
            return Ok(());
        }

        let (msg, color) = match &outcome {
            Ok(solution) => (
                format!(
                    "Path found: {} cells long, {} cells explored. Press Esc to exit...",
                    solution.len(),
                    solution.visited()
                ),
                Color::Green,
            ),
            Err(err) => (format!("{}. Press Esc to exit...", err), Color::Red),
        };
        renderer.print_status(rows, &msg, color)?;
        // Wait for user to press Esc
        App::wait_for_esc()?;
        outcome.map(|_| ()).map_err(Into::into)
    }

    /// Generate and solve the maze, streaming every change to the renderer.
    fn compute(
        cols: u16,
        rows: u16,
        seed: Option<u64>,
        maze_event_tx: SyncSender<MazeEvent>,
    ) -> Result<Solution, MazeError> {
        let mut observer = ChannelObserver::new(maze_event_tx);
        let mut maze = Maze::new(cols, rows, seed)?.with_observer(&mut observer);
        maze.generate()?;
        App::log_sanity_check(&maze);
        maze.solve()
        // Maze is dropped here, then the observer and its sender, which ends rendering
    }

    fn log_sanity_check(maze: &Maze) {
        let grid = maze.grid();
        if grid.is_spanning_tree() && grid.walls_symmetric() {
            tracing::debug!(
                "[generate] {} passages form a spanning tree",
                grid.passage_count()
            );
        } else {
            tracing::error!(
                "[generate] carved grid is not a perfect maze ({} passages for {} cells)",
                grid.passage_count(),
                grid.cell_count()
            );
        }
    }

    /// Generate and solve mazes in the background without drawing anything, and
    /// report how long each round took. Events still go through a channel, drained
    /// by a separate thread, so the cost of notification is measured too.
    pub fn profile(&self, cols: u16, rows: u16, iterations: usize) -> std::io::Result<Duration> {
        let mut total = Duration::ZERO;
        for i in 0..iterations {
            let (maze_event_tx, maze_event_rx) =
                std::sync::mpsc::sync_channel::<MazeEvent>(self.config.channel_capacity);
            let drain_thread_handle = std::thread::spawn(move || maze_event_rx.iter().count());

            let start = Instant::now();
            let outcome = App::compute(cols, rows, None, maze_event_tx);
            let events = drain_thread_handle
                .join()
                .map_err(|_| std::io::Error::other("drain thread panicked"))?;
            let elapsed = start.elapsed();
            total += elapsed;

            let solution = outcome?;
            tracing::info!(
                "[profile] iteration {}: {:?}, {} events, path of {} cells",
                i,
                elapsed,
                events,
                solution.len()
            );
        }
        Ok(total)
    }

    /// Poll for an Esc key press until rendering is done
    fn listen_for_cancel(
        poll_timeout: Duration,
        render_done: &AtomicBool,
        render_cancel: &AtomicBool,
    ) -> std::io::Result<()> {
        while !render_done.load(Ordering::Relaxed) {
            if !event::poll(poll_timeout)? {
                continue;
            }
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    tracing::debug!("[input loop] Esc key pressed, cancelling render");
                    render_cancel.store(true, Ordering::Relaxed);
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }
}
