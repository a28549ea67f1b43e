use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};

/// Install a global subscriber writing to `log_file`.
///
/// The terminal belongs to the renderer, so nothing is logged to stdout or stderr.
/// Keep the returned guard alive until exit, dropping it flushes pending lines.
pub fn init(log_file: &Path, level: tracing::Level) -> std::io::Result<WorkerGuard> {
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("log file path {} has no file name", log_file.display()),
        )
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(std::io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_log_dir_is_an_error() {
        // A regular file cannot hold the log directory
        let blocker =
            std::env::temp_dir().join(format!("mazeweaver-blocker-{}", std::process::id()));
        std::fs::write(&blocker, b"").unwrap();
        let result = init(&blocker.join("logs").join("x.log"), tracing::Level::INFO);
        std::fs::remove_file(&blocker).unwrap();
        assert!(result.is_err());
    }
}
