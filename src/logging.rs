//! Logging setup
//!
//! The TUI owns stdout, so log records go to a file under the user's data
//! directory. The filter comes from `RUST_LOG` when set, otherwise from the
//! configured level.

use crate::{CinemaError, Result, APP_NAME, LOG_FILE};
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{
        format::{FormatEvent, FormatFields, Writer},
        FmtContext,
    },
    registry::LookupSpan,
    EnvFilter,
};

/// Plain single-line format with a local timestamp and source location
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} {:>5} ",
            Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"),
            meta.level()
        )?;

        let file = meta.file().map(|f| f.strip_prefix("src/").unwrap_or(f));
        if let (Some(file), Some(line)) = (file, meta.line()) {
            write!(writer, "{file}:{line} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Default log file location: $DATA_LOCAL_HOME/neurocinema/neurocinema.log
pub fn log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
        .join(LOG_FILE)
}

/// Build the filter, letting `RUST_LOG` win over the configured level
fn make_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| {
            CinemaError::LoggingError(format!("Invalid log level '{}': {}", level, e))
        }),
    }
}

/// Open (appending) the log file, creating its directory
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CinemaError::LoggingError(format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            CinemaError::LoggingError(format!("Cannot open log file {}: {}", path.display(), e))
        })
}

/// Install the global subscriber writing to `path`. Call once at startup.
///
/// Returns the path actually used. A second call fails because a global
/// subscriber is already set.
pub fn init_file_logging(level: &str, path: &Path) -> Result<PathBuf> {
    let filter = make_filter(level)?;
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_ansi(false)
        .event_format(LocalFmt)
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| CinemaError::LoggingError(format!("Subscriber already set: {}", e)))?;

    Ok(path.to_path_buf())
}
