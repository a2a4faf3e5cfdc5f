//! Session logging for the training log.
//!
//! Every launch writes to stdout and to its own `trainlog_<timestamp>.log`
//! under the app's `logs` directory. The records of interest are emitted by
//! [`crate::training::log`] and the controller:
//!
//! - `info`: entries added, same-day merges (with the added and total km),
//!   deletions, demo seeding and config writes.
//! - `warn`: rejected submissions together with the raw form text, and
//!   records dropped while building a log.
//! - `debug`: deletes of ids that are no longer present and changes to
//!   unknown form inputs.
//!
//! Only the newest [`MAX_SESSION_LOGS`] session files are kept. `RUST_LOG`
//! overrides [`DEFAULT_FILTER`].

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Number of session log files kept in the logs directory.
pub const MAX_SESSION_LOGS: usize = 10;
/// Filter used when `RUST_LOG` is unset: training events at `info`, GUI
/// framework chatter only from `warn` up.
pub const DEFAULT_FILTER: &str = "warn,trainlog=info";
const SESSION_LOG_PREFIX: &str = "trainlog";

static SESSION_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Reasons session logging could not be started. The app keeps running
/// without a log file when any of these occur.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("No home directory to keep training session logs in")]
    NoDataDir,
    #[error("Cannot create the training log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot list earlier training sessions in {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot remove expired training session log {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot timestamp the training session log name: {0}")]
    FormatTime(time::error::Format),
    #[error("Training event logging is already routed elsewhere: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
    #[error("Cannot open training session log {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Start session logging in the app's `logs` directory.
///
/// Subsequent calls are no-ops.
pub fn init() -> Result<(), LoggingError> {
    if SESSION_GUARD.get().is_some() {
        return Ok(());
    }
    let log_dir = app_dirs::logs_dir().map_err(map_app_dir_error)?;
    init_in(&log_dir)
}

/// Start session logging with this launch's file placed in `log_dir`.
pub fn init_in(log_dir: &Path) -> Result<(), LoggingError> {
    if SESSION_GUARD.get().is_some() {
        return Ok(());
    }
    let session_name = session_log_name(now_local_or_utc())?;
    let session_path = log_dir.join(&session_name);
    open_session_file(&session_path)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(log_dir, session_name));
    let expired = expire_sessions(log_dir, MAX_SESSION_LOGS)?;

    let timer = build_timer();
    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(fmt::layer().with_timer(timer.clone()).with_writer(std::io::stdout))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = SESSION_GUARD.set(guard);

    tracing::info!(
        path = %session_path.display(),
        expired,
        "Training session log started"
    );
    Ok(())
}

fn open_session_file(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Session files in `dir`, most recently written first.
fn session_logs(dir: &Path) -> Result<Vec<PathBuf>, LoggingError> {
    let mut sessions = fs::read_dir(dir)
        .map_err(|source| LoggingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|path| {
            let written = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (written, path)
        })
        .collect::<Vec<_>>();
    sessions.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(sessions.into_iter().map(|(_, path)| path).collect())
}

/// Delete all but the `keep` newest session files. Returns how many went.
fn expire_sessions(dir: &Path, keep: usize) -> Result<usize, LoggingError> {
    let expired: Vec<PathBuf> = session_logs(dir)?.into_iter().skip(keep).collect();
    for path in &expired {
        fs::remove_file(path).map_err(|source| LoggingError::RemoveFile {
            path: path.clone(),
            source,
        })?;
    }
    Ok(expired.len())
}

fn session_log_name(started: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let stamp = started.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
    Ok(format!("{SESSION_LOG_PREFIX}_{stamp}.log"))
}

fn build_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const LINE_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, LINE_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> LoggingError {
    match error {
        app_dirs::AppDirError::NoBaseDir => LoggingError::NoDataDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            LoggingError::CreateDir { path, source }
        }
    }
}
