//! Logging initialization: logfmt-like lines (timestamp, level, target, message, fields) to both console and file.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Directives used when `RUST_LOG` is unset. HTTP and SQL client chatter is kept at warn.
pub const DEFAULT_LOG_DIRECTIVES: &str = "info,hyper=warn,reqwest=warn,sqlx=warn";

/// Local time as `YYYY-MM-DDTHH:MM:SS`.
struct IsoLocal;

impl FormatTime for IsoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Filter from `RUST_LOG`, or [`DEFAULT_LOG_DIRECTIVES`] when unset or invalid.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Initializes the global tracing subscriber.
///
/// Output is teed to stdout and `log_file_path` (parent directory created if missing), without
/// ANSI codes so the file stays plain text. Load `.env` before calling so `RUST_LOG` is honored.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(log_file_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let file = Arc::new(file);

    use tracing_subscriber::fmt::writer::MakeWriterExt;
    let writer = io::stdout.and(file);

    let event_format = tracing_subscriber::fmt::format()
        .with_timer(IsoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .event_format(event_format)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    Registry::default()
        .with(default_env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("relay.log");
        let path_str = path.to_str().unwrap();

        // A global subscriber may already be installed by another test; only the file side effect is asserted.
        let _ = init_tracing(path_str);

        assert!(path.exists());
    }
}
