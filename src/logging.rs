//! Logging init: human-readable progress lines on stderr via tracing-subscriber.

use tracing_subscriber::EnvFilter;

/// Default filter for the given verbosity. `RUST_LOG` overrides it when set.
pub fn default_filter(quiet: bool, verbose: bool) -> &'static str {
    match (quiet, verbose) {
        (_, true) => "docscrape=debug,warn",
        (true, false) => "warn",
        (false, false) => "docscrape=info,warn",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_logging(quiet: bool, verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(quiet, verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(default_filter(true, true), "docscrape=debug,warn");
    }

    #[test]
    fn quiet_is_warn_only() {
        assert_eq!(default_filter(true, false), "warn");
        assert_eq!(default_filter(false, false), "docscrape=info,warn");
    }

    #[test]
    fn filters_parse() {
        for (q, v) in [(false, false), (true, false), (false, true)] {
            assert!(EnvFilter::try_new(default_filter(q, v)).is_ok());
        }
    }
}
