//! Structured logging with box-drawing output.
//!
//! Every line autotheme prints while deciding goes through the macros in this
//! module so the output keeps one visual style:
//!
//! ```text
//! ┏ autotheme v0.3.0 ━━╸
//! ┃
//! ┣ Using cached location (3h old)
//! ┃   40.7128°, -74.0060°
//! ┣[WARNING] Location refresh failed: permission denied
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - **`log_block_start!`** opens a new conceptual block (an empty pipe line, then `┣ message`).
//! - **`log_decorated!`** continues a block with `┣ message`.
//! - **`log_indented!`** prints nested details as `┃   message`.
//! - **`log_pipe!`** inserts a lone `┃` before a semantic message that starts its own block.
//! - **`log_version!`** / **`log_end!`** frame a whole run.
//! - **`log_info!`**, **`log_warning!`**, **`log_error!`**, **`log_debug!`** carry a
//!   colored `[LEVEL]` tag. `log_debug!` is silent unless debug output was enabled.
//! - The `*_standalone!` variants print a tagged line without the pipe, for messages
//!   emitted outside a framed run (argument errors, unknown commands).
//!
//! Logging can be switched off at runtime, which the CLI does for `--json` output and
//! tests do to keep their output readable.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Shape of a single output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Version,
    End,
    Pipe,
    BlockStart,
    Decorated,
    Indented,
    Info,
    Warning,
    Error,
    Debug,
    WarningStandalone,
    ErrorStandalone,
}

/// Runtime switches and line formatting for the logging macros.
pub struct Log;

impl Log {
    /// Enable or disable all output from the logging macros.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` lines.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Timestamp prefix shown while a fixed (`--at`) time source is active.
    ///
    /// Returns an empty string for real time so normal output stays uncluttered.
    pub fn timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            format!("[{}] ", crate::time_source::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }

    /// Render a line of the given shape. Public for the exported macros.
    pub fn format(line: Line, message: &str) -> String {
        let p = Self::timestamp_prefix();
        match line {
            Line::Version => format!("{p}┏ autotheme v{} ━━╸\n", env!("CARGO_PKG_VERSION")),
            Line::End => format!("{p}╹\n"),
            Line::Pipe => format!("{p}┃\n"),
            Line::BlockStart => format!("{p}┃\n{p}┣ {message}\n"),
            Line::Decorated => format!("{p}┣ {message}\n"),
            Line::Indented => format!("{p}┃   {message}\n"),
            Line::Info => format!("{p}┣[\x1b[32mINFO\x1b[0m] {message}\n"),
            Line::Warning => format!("{p}┣[\x1b[33mWARNING\x1b[0m] {message}\n"),
            Line::Error => format!("{p}┣[\x1b[31mERROR\x1b[0m] {message}\n"),
            Line::Debug => format!("{p}┣[\x1b[36mDEBUG\x1b[0m] {message}\n"),
            Line::WarningStandalone => format!("{p}[\x1b[33mWARNING\x1b[0m] {message}\n"),
            Line::ErrorStandalone => format!("{p}[\x1b[31mERROR\x1b[0m] {message}\n"),
        }
    }

    /// Format and write a line if logging is enabled.
    pub fn emit(line: Line, message: &str) {
        if !Self::is_enabled() || (line == Line::Debug && !Self::is_debug()) {
            return;
        }
        print!("{}", Self::format(line, message));
        let _ = std::io::stdout().flush();
    }
}

// # Logging Macros

/// Log a decorated message as part of the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::Decorated, &format!($($arg)*))
    };
}

/// Log an indented detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::Indented, &format!($($arg)*))
    };
}

/// Log a lone pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::Log::emit($crate::logger::Line::Pipe, "")
    };
}

/// Start a new block of related lines.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::BlockStart, &format!($($arg)*))
    };
}

/// Log the version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::Log::emit($crate::logger::Line::Version, "")
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::Log::emit($crate::logger::Line::End, "")
    };
}

/// Log an informational message.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::Info, &format!($($arg)*))
    };
}

/// Log a warning.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::Warning, &format!($($arg)*))
    };
}

/// Log an error.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::Error, &format!($($arg)*))
    };
}

/// Log a debug line (only shown with `--debug`).
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::Debug, &format!($($arg)*))
    };
}

/// Log a warning outside of a framed run.
#[macro_export]
macro_rules! log_warning_standalone {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::WarningStandalone, &format!($($arg)*))
    };
}

/// Log an error outside of a framed run.
#[macro_export]
macro_rules! log_error_standalone {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Line::ErrorStandalone, &format!($($arg)*))
    };
}
