//! Diagnostics for `cbox`.
//!
//! All log output goes to stderr; stdout carries only command output, so
//! `cbox list --format json` can be piped as is. Storage fallbacks are logged
//! at `error`, which the default level shows without any `-v`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Targets that belong to this project: the library and the binary.
const OWN_TARGETS: [&str; 2] = ["contactbox", "cbox"];

/// How much diagnostic output to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Adds debug output with targets and timestamps (`-v`).
    Verbose,
    /// Everything (`-vv` and up).
    Trace,
}

impl Verbosity {
    /// Resolve the `-q` flag and `-v` count. `-q` wins.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    fn level_name(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Trace => "trace",
        }
    }

    fn is_detailed(self) -> bool {
        matches!(self, Self::Verbose | Self::Trace)
    }

    /// Filter directives applying this verbosity to the project's own
    /// targets. Other crates are not logged.
    #[must_use]
    pub fn directives(self) -> String {
        OWN_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level_name()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the stderr subscriber. `RUST_LOG`, when set and valid, replaces
/// the directives derived from `verbosity`.
///
/// Calling this more than once is harmless; later calls do nothing.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity.is_detailed());
    let registry = tracing_subscriber::registry().with(filter);

    let _ = if verbosity.is_detailed() {
        registry.with(layer).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };
}

#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
    }

    #[test]
    fn test_directives_cover_library_and_binary() {
        assert_eq!(Verbosity::Normal.directives(), "contactbox=warn,cbox=warn");
        assert_eq!(Verbosity::Quiet.directives(), "contactbox=error,cbox=error");
        assert_eq!(Verbosity::Trace.directives(), "contactbox=trace,cbox=trace");
    }

    #[test]
    fn test_only_verbose_levels_are_detailed() {
        assert!(!Verbosity::Quiet.is_detailed());
        assert!(!Verbosity::Normal.is_detailed());
        assert!(Verbosity::Verbose.is_detailed());
        assert!(Verbosity::Trace.is_detailed());
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(Verbosity::Normal);
        init_logging(Verbosity::Verbose);
    }
}
