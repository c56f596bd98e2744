//! Logging bootstrap for the binary.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use seatflix_core::config::DEFAULT_LOG_LEVEL;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILE_NAME: &str = "seatflix.log";

/// Stderr-only subscriber for the config load, which runs before the
/// configured level and log directory are known.
pub fn bootstrap(level: Option<&str>) -> impl Subscriber + Send + Sync + use<> {
    bootstrap_with_writer(level, std::io::stderr)
}

fn bootstrap_with_writer<W>(
    level: Option<&str>,
    writer: W,
) -> impl Subscriber + Send + Sync + use<W>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(writer)
            .with_target(false)
            .with_ansi(false),
    )
}

/// Installs the global subscriber: stderr always, plus `<logs_dir>/seatflix.log`
/// when a directory is given.
pub fn init(level: &str, logs_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match logs_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let path = dir.join(LOG_FILE_NAME);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_target(true)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(level, logs_dir = ?logs_dir, "[Bootstrap] logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(level: Option<&str>, emit: impl FnOnce()) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = buffer.clone();
        let subscriber = bootstrap_with_writer(level, move || Sink(sink.clone()));
        tracing::subscriber::with_default(subscriber, emit);
        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_bootstrap_reports_config_fallback() {
        let output = captured(None, || {
            tracing::warn!("[Config] falling back to defaults");
            tracing::info!("[Config] created default config");
            tracing::debug!("noise");
        });

        assert!(output.contains("falling back to defaults"));
        assert!(output.contains("created default config"));
        assert!(!output.contains("noise"));
    }

    #[test]
    fn test_bootstrap_honors_cli_level() {
        let output = captured(Some("warn"), || {
            tracing::info!("[Config] created default config");
        });
        assert!(output.is_empty());
    }
}
