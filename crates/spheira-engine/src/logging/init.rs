use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax, for example
/// `"spheira_engine=debug,wgpu=warn"`. When it is `None`, `RUST_LOG` is read,
/// and when that is unset too the default filter applies.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Level used when neither `env_filter` nor `RUST_LOG` is present.
    pub default_level: log::LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            default_level: log::LevelFilter::Info,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` backend.
///
/// Only the first call has an effect. A logger installed by someone else
/// is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                Err(_) => {
                    builder
                        .filter_level(config.default_level)
                        // wgpu is chatty at info.
                        .filter_module("wgpu_core", log::LevelFilter::Warn)
                        .filter_module("wgpu_hal", log::LevelFilter::Warn)
                        .filter_module("naga", log::LevelFilter::Warn);
                }
            },
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("trace".to_string()),
            ..LoggingConfig::default()
        });
        log::debug!("still alive");
    }
}
