//! `tracing` subscriber setup
//!
//! Logs go to stderr. `RUST_LOG` wins over the `-v` flags.

use crate::config::CliConfig;
use tracing_subscriber::EnvFilter;

/// Filter for `config`, unless `RUST_LOG` is set
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter_directive()))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(config: &CliConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Verbosity;

    #[test]
    fn test_init_twice_is_harmless() {
        let config = CliConfig::new().with_verbosity(Verbosity::Debug);
        init(&config);
        init(&config);
    }

    #[test]
    fn test_env_filter_follows_verbosity() {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return;
        }
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Debug,
            Verbosity::Trace,
        ] {
            let config = CliConfig::new().with_verbosity(verbosity);
            assert_eq!(
                env_filter(&config).to_string(),
                verbosity.filter_directive()
            );
        }
    }
}
