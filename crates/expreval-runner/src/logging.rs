use crate::run::RunnerError;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(log_level: &str) -> Result<(), RunnerError> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level).map_err(|error| {
            RunnerError::Logging(format!("invalid log level filter `{log_level}`: {error}"))
        })?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|error| RunnerError::Logging(error.to_string()))
}
