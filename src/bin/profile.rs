use mazeweaver::{app::App, logging};

/// Usage: profile [ITERATIONS] [COLS] [ROWS]
fn main() -> std::io::Result<()> {
    let _log_guard = logging::init(std::path::Path::new("profile.log"), tracing::Level::INFO)?;
    let app = App::default();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let iterations = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
    let cols = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(255);
    let rows = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(255);

    let total = app.profile(cols, rows, iterations)?;
    println!(
        "{} iterations of {}x{}: {:?} total, {:?} per iteration",
        iterations,
        cols,
        rows,
        total,
        total / iterations.max(1) as u32
    );
    Ok(())
}
