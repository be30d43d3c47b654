mod cli;
mod config;
mod logging;
mod run;

pub use cli::{
    CheckCommand, Cli, Commands, DocumentArgs, EvaluateCommand, OutputFormat, ParseCommand,
    RemoveCommand, SaveCommand,
};
pub use config::{
    load_runner_config, validate_runner_config, ConfigIssue, LimitsConfig, LogConfig, RunnerConfig,
    RunnerConfigError, StoreConfig, RUNNER_SCHEMA_0_0_1,
};
pub use logging::init_tracing;
pub use run::{
    execute, execute_with_stdin, read_document, render_error, resolve_config, RunnerError,
};
