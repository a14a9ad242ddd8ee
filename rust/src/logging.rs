//! Verbosity-gated logging macros for the placement engine.
//!
//! Nothing is formatted when the level is below the threshold, so a silent
//! run (verbosity=0) pays only for the comparison.
//! Levels:
//! - 0: SILENT
//! - 1: CHANGES (commits, cursor advances)
//! - 2: CHECKS (per-task consideration, skip reasons)
//! - 3: DEBUG (per-day and per-window search internals)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Write to stderr when `$verbosity` reaches `$level`.
///
/// Format arguments are only evaluated when the gate is open.
#[macro_export]
macro_rules! log_at {
    ($level:expr, $verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $level {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHANGES level: committed placements and cursor moves.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_CHANGES, $verbosity, $($arg)*)
    };
}

/// Log at CHECKS level: why a task was skipped or left unscheduled.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_CHECKS, $verbosity, $($arg)*)
    };
}

/// Log at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_DEBUG, $verbosity, $($arg)*)
    };
}
