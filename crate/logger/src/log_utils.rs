use std::sync::Once;

use clap::Args;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_INIT: Once = Once::new();

/// Logging options shared by the command line and the configuration files.
#[derive(Debug, Default, Args, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// An alternative to setting the `RUST_LOG` environment variable.
    /// Setting this variable will override the `RUST_LOG` environment variable
    #[clap(long, env("CVALIDATE_RUST_LOG"), verbatim_doc_comment)]
    pub rust_log: Option<String>,

    /// Do not log anything
    #[clap(long, env("CVALIDATE_LOG_QUIET"), default_value = "false")]
    pub quiet: bool,
}

/// Initialize the tracing subscriber once per process.
///
/// `RUST_LOG` wins over `default_value` when it is set.
pub fn log_init(default_value: &str) {
    LOG_INIT.call_once(|| {
        if std::env::var("RUST_BACKTRACE").is_err() {
            unsafe {
                std::env::set_var("RUST_BACKTRACE", "1");
            }
        }

        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_value.to_owned());
        tracing_setup(&filter);
    });
}

/// Initialize the tracing subscriber from a [`LoggingConfig`].
///
/// An explicit `rust_log` overrides `RUST_LOG`; `quiet` turns every layer off.
pub fn log_init_with_config(config: &LoggingConfig, default_value: &str) {
    if config.quiet {
        LOG_INIT.call_once(|| tracing_setup("off"));
        return;
    }
    match &config.rust_log {
        Some(filter) => LOG_INIT.call_once(|| tracing_setup(filter)),
        None => log_init(default_value),
    }
}

fn tracing_setup(filter: &str) {
    let format = tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .compact();

    // Another subscriber may already be installed (e.g. by a test harness); keep it.
    let _already_set = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(format)
        .try_init();
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::{LoggingConfig, log_init, log_init_with_config};

    #[test]
    fn test_log_init_is_idempotent() {
        log_init("debug");
        log_init("trace");
        log_init_with_config(
            &LoggingConfig {
                rust_log: Some("info".to_owned()),
                quiet: false,
            },
            "debug",
        );
        tracing::info!("logger initialized twice without panicking");
    }

    #[test]
    fn test_logging_config_defaults() {
        let config: LoggingConfig = toml::from_str("").unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert!(!config.quiet);
        assert!(config.rust_log.is_none());
    }
}
