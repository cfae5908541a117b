//! Tracing subscriber setup
//!
//! The library only emits `tracing` events. Binaries that embed it call
//! [`init_tracing_subscriber`] once at startup; tests call
//! [`init_test_tracing`] so events show up in captured test output.

use std::env;

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const LOG_FILTER: &str = "RUST_LOG";

/// How verbose the installed subscriber should be
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingOptions {
    /// `1` for debug events, `2` or more for trace events
    pub verbosity: Option<u8>,
    /// Turn all output off
    pub silent: bool,
    /// Explicit maximum level; wins over `verbosity` and `silent`
    pub log_level: Option<LevelFilter>,
}

impl TracingOptions {
    /// The level that overrides `RUST_LOG`, if any option asks for one
    #[must_use]
    pub fn level_override(&self) -> Option<LevelFilter> {
        self.log_level
            .or(match self.verbosity {
                Some(1) => Some(LevelFilter::DEBUG),
                Some(v) if v >= 2 => Some(LevelFilter::TRACE),
                _ => None,
            })
            .or(self.silent.then_some(LevelFilter::OFF))
    }
}

/// The filter from `RUST_LOG`, or `default_directive` when it is unset or invalid
#[must_use]
pub fn env_filter(default_directive: &str) -> EnvFilter {
    match env::var_os(LOG_FILTER) {
        Some(_) => EnvFilter::try_from_default_env().unwrap_or_else(|err| {
            eprintln!("ignoring invalid {LOG_FILTER}: {err}");
            EnvFilter::new(default_directive)
        }),
        None => EnvFilter::new(default_directive),
    }
}

/// Install a global fmt subscriber writing to stderr
///
/// `RUST_LOG` sets the filter, defaulting to `warn`. Any level set in
/// `options` overrides it. Returns `false` if a global subscriber was
/// already installed.
pub fn init_tracing_subscriber(options: TracingOptions) -> bool {
    let builder = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter("warn"))
        .with_target(true)
        .without_time()
        .with_writer(std::io::stderr);

    let installed = if let Some(level) = options.level_override() {
        builder.with_max_level(level).try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}

/// Install a subscriber that writes through the test harness's capture
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_override_precedence() {
        assert_eq!(TracingOptions::default().level_override(), None);

        let verbose = TracingOptions {
            verbosity: Some(1),
            ..TracingOptions::default()
        };
        assert_eq!(verbose.level_override(), Some(LevelFilter::DEBUG));

        let very_verbose = TracingOptions {
            verbosity: Some(3),
            silent: true,
            ..TracingOptions::default()
        };
        assert_eq!(very_verbose.level_override(), Some(LevelFilter::TRACE));

        let silent = TracingOptions {
            silent: true,
            ..TracingOptions::default()
        };
        assert_eq!(silent.level_override(), Some(LevelFilter::OFF));

        let explicit = TracingOptions {
            verbosity: Some(2),
            log_level: Some(LevelFilter::ERROR),
            silent: false,
        };
        assert_eq!(explicit.level_override(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_init_test_tracing_is_repeatable() {
        init_test_tracing();
        init_test_tracing();
        tracing::debug!("still fine");
    }
}
