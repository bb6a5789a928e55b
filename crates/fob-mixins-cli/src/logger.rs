//! Logging setup for the fob-mixins CLI.
//!
//! Logs go to stderr so `transform` output on stdout stays clean. The level
//! is chosen in this order:
//! 1. `--verbose`: DEBUG for fob-mixins crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`
//! 4. Default: INFO, which still shows warnings for unsupported `mixins` shapes

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "fob_mixins=debug,fob_mixins_cli=debug";
const QUIET_FILTER: &str = "fob_mixins=error,fob_mixins_cli=error";
const DEFAULT_FILTER: &str = "fob_mixins=info,fob_mixins_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// # Examples
///
/// ```rust,no_run
/// use fob_mixins_cli::logger::init_logger;
///
/// init_logger(false, false, false);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A subscriber may already be installed
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins() {
        assert_eq!(filter_for(true, false).to_string(), EnvFilter::new(VERBOSE_FILTER).to_string());
    }

    #[test]
    fn quiet_filter() {
        assert_eq!(filter_for(false, true).to_string(), EnvFilter::new(QUIET_FILTER).to_string());
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
