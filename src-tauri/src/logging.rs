use std::path::{Path, PathBuf};

use log::LevelFilter;

const CRATE_TARGET: &str = "beshare_desktop";

pub fn resolve_desktop_log_path(log_dir: Option<PathBuf>, log_file_name: &str) -> PathBuf {
    log_dir
        .unwrap_or_else(std::env::temp_dir)
        .join(log_file_name)
}

fn level_tag(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "E",
        log::Level::Warn => "W",
        log::Level::Info => "I",
        log::Level::Debug => "D",
        log::Level::Trace => "T",
    }
}

fn console_log_formatter(
    out: fern::FormatCallback,
    message: &std::fmt::Arguments,
    record: &log::Record,
) {
    let color = match record.level() {
        log::Level::Error => "\x1B[31m",
        log::Level::Warn => "\x1B[33m",
        log::Level::Info => "\x1B[32m",
        log::Level::Debug => "\x1B[0m",
        log::Level::Trace => "\x1B[35m",
    };

    out.finish(format_args!(
        "{}{} [{}] {} {}\x1B[0m",
        color,
        chrono::Local::now().format("%H:%M:%S%.3f"),
        level_tag(record.level()),
        record.target(),
        message,
    ))
}

fn file_log_formatter(
    out: fern::FormatCallback,
    message: &std::fmt::Arguments,
    record: &log::Record,
) {
    out.finish(format_args!(
        "{} [{}] {}:{} {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level_tag(record.level()),
        record.file().unwrap_or(record.target()),
        record.line().unwrap_or(0),
        message,
    ))
}

fn is_shell_record(metadata: &log::Metadata, threshold: LevelFilter) -> bool {
    metadata.target().starts_with(CRATE_TARGET)
        || metadata.level() <= LevelFilter::Warn.min(threshold)
}

/// Routes `log` records to stdout and to the desktop log file.
///
/// Records from dependencies are only kept at warning level and above so the
/// webview runtime does not flood the file.
pub fn setup_logger(level: LevelFilter, log_path: &Path) -> Result<(), String> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }
    let log_file = fern::log_file(log_path)
        .map_err(|error| format!("Failed to open log file {}: {}", log_path.display(), error))?;

    let stdout_dispatcher = fern::Dispatch::new()
        .filter(move |metadata| is_shell_record(metadata, level))
        .format(console_log_formatter)
        .chain(std::io::stdout());

    let file_dispatcher = fern::Dispatch::new()
        .filter(move |metadata| is_shell_record(metadata, level))
        .format(file_log_formatter)
        .chain(log_file);

    fern::Dispatch::new()
        .level(level)
        .chain(stdout_dispatcher)
        .chain(file_dispatcher)
        .apply()
        .map_err(|error| format!("Failed to install logger: {error}"))
}
