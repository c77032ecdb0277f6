//! Leveled logger with an optional rotating file and an optional stderr sink.
//!
//! File logs are written to `~/.config/veil/logs/veil.log`. When the file
//! exceeds the configured max size, it is rotated to `veil.log.1` (one
//! backup kept). The stderr sink is what `--verbose` turns on.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "veil.log";
const BACKUP_EXTENSION: &str = "log.1";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
    /// Echo log lines to stderr. Set from the command line only.
    #[serde(skip)]
    pub console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
            console: false,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct FileSink {
    file: File,
    path: PathBuf,
    max_bytes: u64,
    written: u64,
}

struct Logger {
    file: Option<FileSink>,
    console: bool,
    min_level: Level,
}

/// Initialises the global logger. Call once at startup.
///
/// Does nothing if neither the file nor the console sink is enabled.
/// A file that cannot be opened leaves only the console sink active.
pub fn init(config: &LogConfig) {
    if !config.enabled && !config.console {
        return;
    }

    let file = if config.enabled {
        open_file_sink(config.max_file_mb)
    } else {
        None
    };

    let logger = Logger {
        file,
        console: config.console,
        min_level: Level::parse(&config.level),
    };

    let _ = LOGGER.set(Mutex::new(logger));
}

fn open_file_sink(max_file_mb: u64) -> Option<FileSink> {
    let log_dir = crate::config::config_dir()?.join("logs");
    let _ = fs::create_dir_all(&log_dir);
    let path = log_dir.join(LOG_FILE_NAME);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    let written = file.metadata().map(|m| m.len()).unwrap_or(0);

    Some(FileSink {
        file,
        path,
        max_bytes: max_file_mb * 1024 * 1024,
        written,
    })
}

/// Writes a log line if the level is at or above the configured minimum.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let Ok(mut logger) = mutex.lock() else {
        return;
    };
    if level < logger.min_level {
        return;
    }
    let line = format_line(&timestamp(), level, args);

    if logger.console {
        eprint!("{line}");
    }
    if let Some(sink) = logger.file.as_mut() {
        sink.append(&line);
    }
}

fn format_line(time: &str, level: Level, args: fmt::Arguments<'_>) -> String {
    format!("{time} [{lvl}] {args}\n", lvl = level.as_str())
}

impl FileSink {
    fn append(&mut self, line: &str) {
        let _ = self.file.write_all(line.as_bytes());
        self.written += line.len() as u64;

        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let backup = self.path.with_extension(BACKUP_EXTENSION);
        let _ = fs::rename(&self.path, &backup);
        if let Ok(f) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            self.file = f;
        }
        self.written = 0;
    }
}

fn timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let millis = dur.subsec_millis();
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}.{millis:03}")
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
