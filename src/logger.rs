// Leveled logger writing to stderr: ERROR/WARN/INFO/DEBUG.
// The level is process-wide and set once from the command-line flags.

use std::sync::atomic::{AtomicU8, Ordering};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

// Levels are ordered (Quiet < Info < Debug) for easy comparisons.
const QUIET_LEVEL: u8 = 0;
const INFO_LEVEL: u8 = 1;
const DEBUG_LEVEL: u8 = 2;

static LOG_LEVEL: AtomicU8 = AtomicU8::new(INFO_LEVEL);

// Set the global log level from --debug / --quiet. Debug wins if both are given.
pub fn configure(debug: bool, quiet: bool) {
    let level = if debug {
        DEBUG_LEVEL
    } else if quiet {
        QUIET_LEVEL
    } else {
        INFO_LEVEL
    };
    LOG_LEVEL.store(level, Ordering::Relaxed);
}

pub fn is_debug() -> bool {
    LOG_LEVEL.load(Ordering::Relaxed) >= DEBUG_LEVEL
}

pub fn is_quiet() -> bool {
    LOG_LEVEL.load(Ordering::Relaxed) == QUIET_LEVEL
}

// Progress messages; suppressed by --quiet.
pub fn info(msg: &str) {
    if !is_quiet() {
        log_line("INFO", msg);
    }
}

// Print a DEBUG-level message if enabled.
pub fn debug(msg: &str) {
    if is_debug() {
        log_line("DEBUG", msg);
    }
}

// Recoverable defects (skipped rows, empty tables). Always printed.
pub fn warn(msg: &str) {
    log_line("WARN", msg);
}

pub fn error(msg: &str) {
    log_line("ERROR", msg);
}

fn log_line(level: &str, msg: &str) {
    eprintln!("[{}] {} {}", level, timestamp(), msg);
}

// RFC 3339 UTC timestamp; falls back to unix seconds if formatting fails.
pub fn timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}
