use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Checked before `RUST_LOG`
pub const LOG_ENV: &str = "LASTSEEN_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Where log lines go for one invocation
pub enum LogTarget<'a> {
    Stderr,
    /// The terminal is owned by the viewer; drop everything
    Discard,
    File(&'a Path),
}

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(target: LogTarget) -> Result<()> {
    let (writer, ansi) = match target {
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogTarget::Discard => (BoxMakeWriter::new(std::io::sink), false),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_is_created() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("viewer.log");
        init_logging(LogTarget::File(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("viewer.log");
        let err = init_logging(LogTarget::File(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
