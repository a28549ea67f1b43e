use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};

use crate::app::layout::Layout;

/// Generate a perfect maze and watch a depth-first search solve it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of columns of cells
    #[arg(short, long, default_value_t = 39, value_parser = clap::value_parser!(u16).range(1..))]
    pub cols: u16,

    /// Number of rows of cells
    #[arg(short, long, default_value_t = 29, value_parser = clap::value_parser!(u16).range(1..))]
    pub rows: u16,

    /// Seed for the maze generator. The same seed always gives the same maze
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Pause after each step of the animation, in milliseconds
    #[arg(short, long, default_value_t = 10)]
    pub delay_ms: u64,

    /// Print the solved maze as text instead of animating it
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// File receiving the log output
    #[arg(long, default_value = "mazeweaver.log")]
    pub log_file: PathBuf,

    /// Most verbose level written to the log file
    #[arg(value_enum, long, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Settings of the terminal animation.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Pause after each algorithm step
    pub step_delay: Duration,
    /// Where the maze is drawn on the terminal
    pub layout: Layout,
    /// Maximum number of maze events buffered between the compute and render threads
    pub channel_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(10),
            layout: Layout::default(),
            channel_capacity: 1000,
        }
    }
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            step_delay: Duration::from_millis(self.delay_ms),
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["mazeweaver"]).unwrap();
        assert_eq!((args.cols, args.rows), (39, 29));
        assert_eq!(args.seed, None);
        assert!(!args.headless);
        assert_eq!(args.render_config().step_delay, Duration::from_millis(10));
        assert_eq!(tracing::Level::from(args.log_level), tracing::Level::INFO);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "mazeweaver",
            "--cols",
            "5",
            "-r",
            "3",
            "--seed",
            "42",
            "--delay-ms",
            "0",
            "--headless",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!((args.cols, args.rows), (5, 3));
        assert_eq!(args.seed, Some(42));
        assert!(args.headless);
        assert!(args.render_config().step_delay.is_zero());
        assert_eq!(args.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(Args::try_parse_from(["mazeweaver", "--cols", "0"]).is_err());
    }
}
