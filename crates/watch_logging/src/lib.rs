#![deny(missing_docs)]
//! Shared logging utilities for the pledgewatch workspace.
//!
//! This crate provides the `watch_*` logging macros used by the engine and the
//! binary, plus a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current poll cycle number.
    static POLL_CYCLE: Cell<u64> = const { Cell::new(0) };
}

/// Sets the poll cycle number for the current thread.
/// The watcher calls this once per fetched snapshot.
pub fn set_poll_cycle(cycle: u64) {
    POLL_CYCLE.with(|v| v.set(cycle));
}

/// Retrieves the poll cycle number for the current thread.
/// Returns 0 before the first snapshot has been fetched.
pub fn poll_cycle() -> u64 {
    POLL_CYCLE.with(|v| v.get())
}

/// Logs a trace-level message, prefixed with the current poll cycle.
#[macro_export]
macro_rules! watch_trace {
    ($($arg:tt)*) => {{
        log::trace!("[cycle {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message, prefixed with the current poll cycle.
#[macro_export]
macro_rules! watch_debug {
    ($($arg:tt)*) => {{
        log::debug!("[cycle {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message, prefixed with the current poll cycle.
#[macro_export]
macro_rules! watch_info {
    ($($arg:tt)*) => {{
        log::info!("[cycle {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message, prefixed with the current poll cycle.
#[macro_export]
macro_rules! watch_warn {
    ($($arg:tt)*) => {{
        log::warn!("[cycle {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message, prefixed with the current poll cycle.
#[macro_export]
macro_rules! watch_error {
    ($($arg:tt)*) => {{
        log::error!("[cycle {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{poll_cycle, set_poll_cycle};

    #[test]
    fn poll_cycle_is_per_thread() {
        set_poll_cycle(7);
        assert_eq!(poll_cycle(), 7);
        let other = std::thread::spawn(poll_cycle).join().unwrap();
        assert_eq!(other, 0);
    }
}
