//! Logger setup
//!
//! Log records go through the `log` facade to `env_logger`. `RUST_LOG`
//! overrides the default level. While the TUI owns the terminal, output either
//! goes to the `--log-file` or is switched off so it cannot corrupt the screen.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Default filter when `RUST_LOG` is not set
pub fn default_filter(has_log_file: bool, interactive: bool) -> &'static str {
    if has_log_file {
        "info"
    } else if interactive {
        "off"
    } else {
        "warn"
    }
}

/// Where log records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Appended to the `--log-file`
    File,
    /// Dropped; the TUI owns the terminal
    Discard,
    /// Written to stderr
    Stderr,
}

/// Picks the log target
///
/// Without a log file the TUI never writes log output to the terminal, even
/// when `RUST_LOG` asks for it.
pub fn log_target(has_log_file: bool, interactive: bool) -> LogTarget {
    if has_log_file {
        LogTarget::File
    } else if interactive {
        LogTarget::Discard
    } else {
        LogTarget::Stderr
    }
}

/// Installs the global logger
///
/// `interactive` is true when the TUI will draw to the terminal. A log file is
/// appended to, never truncated. Calling this twice keeps the first logger.
pub fn init(log_file: Option<&Path>, interactive: bool) -> io::Result<()> {
    let env = Env::default().default_filter_or(default_filter(log_file.is_some(), interactive));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_secs();

    match (log_target(log_file.is_some(), interactive), log_file) {
        (LogTarget::File, Some(path)) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        (LogTarget::Discard, _) => {
            builder.target(Target::Pipe(Box::new(io::sink())));
        }
        _ => {
            builder.target(Target::Stderr);
        }
    }

    // A logger may already be installed (tests, embedding); keep it
    let _ = builder.try_init();
    log::debug!("Logger initialised");
    Ok(())
}
