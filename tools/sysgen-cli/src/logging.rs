//! Output verbosity and diagnostic logging.
//!
//! Three levels controlled by CLI flags:
//! - **Quiet** (`-q`): errors only
//! - **Default** (no flag): progress lines, `info` events
//! - **Verbose** (`-v`): `debug` events from the generator as well
//!
//! `SYSGEN_LOG` takes an `EnvFilter` directive and overrides the level
//! picked by the flags.

use std::sync::atomic::{AtomicU8, Ordering};

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "SYSGEN_LOG";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only.
    Quiet = 0,
    /// Progress lines.
    Default = 1,
    /// Progress lines and debug events.
    Verbose = 2,
}

impl Verbosity {
    /// Level picked from the `-q` and `-v` flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Default
        }
    }

    /// Default filter directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Default => "info",
            Self::Verbose => "debug",
        }
    }
}

/// Global verbosity level, set once at startup.
static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Set the verbosity level and install the stderr log subscriber.
pub fn init(verbosity: Verbosity) {
    VERBOSITY.store(verbosity as u8, Ordering::Relaxed);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `true` if quiet mode is active.
pub fn is_quiet() -> bool {
    VERBOSITY.load(Ordering::Relaxed) == Verbosity::Quiet as u8
}

/// Print a progress line unless quiet mode is active.
///
/// Usage mirrors `println!`:
/// ```ignore
/// dprintln!("  -> {}", path.display());
/// ```
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            println!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_pick_level() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Default);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::Quiet.directive(), "error");
        assert_eq!(Verbosity::Verbose.directive(), "debug");
    }
}
