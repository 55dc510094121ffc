// src/logging.rs

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset, e.g. "info" or "ytgrowth=debug".
    pub level: String,
    pub include_targets: bool,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_targets: true,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    pub fn verbose(verbose: bool) -> Self {
        Self {
            level: if verbose { "debug" } else { "info" }.to_string(),
            ..Self::default()
        }
    }

    /// `RUST_LOG` wins over `level`; an unparsable filter falls back to "info".
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Installs the global subscriber. Logs go to stderr so CLI output stays clean.
pub fn init_logging(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.include_targets)
                .with_ansi(config.ansi),
        )
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.include_targets);
        assert!(config.ansi);
    }

    #[test]
    fn test_verbose_config() {
        assert_eq!(LoggingConfig::verbose(true).level, "debug");
        assert_eq!(LoggingConfig::verbose(false).level, "info");
    }
}
