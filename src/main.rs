use clap::Parser;
use mazeweaver::{
    app::{App, render_text},
    config::Args,
    logging,
};

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(&args.log_file, args.log_level.into())?;
    tracing::info!(
        "Starting with a {}x{} maze, seed {:?}",
        args.cols,
        args.rows,
        args.seed
    );

    let app = App::new(args.render_config());

    if args.headless {
        let (grid, solution) = app.run_headless(args.cols, args.rows, args.seed)?;
        print!("{}", render_text(&grid, solution.path()));
        println!(
            "Path found: {} cells long, {} cells explored.",
            solution.len(),
            solution.visited()
        );
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout, args.cols, args.rows, args.seed);
    App::restore_terminal(&mut stdout)?;
    if let Err(err) = &result {
        tracing::error!("Exiting with error: {}", err);
    }
    result
}
