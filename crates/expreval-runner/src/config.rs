use expreval_store::DEFAULT_MAX_INPUT_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const RUNNER_SCHEMA_0_0_1: &str = "expreval-runner/0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    #[serde(default = "default_runner_schema")]
    pub schema: String,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            schema: default_runner_schema(),
            store: StoreConfig::default(),
            limits: LimitsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_length: default_max_input_length(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ConfigIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ConfigIssue {
    fn new(field: &str, code: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message,
        }
    }
}

impl Display for ConfigIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.code, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerConfigError {
    #[error("read runner config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("runner config parse failed: {0}")]
    Parse(String),
    #[error("runner config validation failed: {}", join_issues(.0))]
    Validation(Vec<ConfigIssue>),
}

pub fn load_runner_config(path: &Path) -> Result<RunnerConfig, RunnerConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| RunnerConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(raw.as_str()).map_err(RunnerConfigError::Parse)?;
    let config: RunnerConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str())
            .map_err(|error| RunnerConfigError::Parse(format!("json decode error: {error}")))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str())
            .map_err(|error| RunnerConfigError::Parse(format!("yaml decode error: {error}")))?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| RunnerConfigError::Parse(error.to_string()))?,
    };

    let issues = validate_runner_config(&config);
    if !issues.is_empty() {
        return Err(RunnerConfigError::Validation(issues));
    }
    Ok(config)
}

/// Returns every problem with `config`, sorted by field then code.
pub fn validate_runner_config(config: &RunnerConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    if config.schema != RUNNER_SCHEMA_0_0_1 {
        issues.push(ConfigIssue::new(
            "schema",
            "runner.config.schema",
            format!(
                "unsupported runner config schema `{}` (expected `{RUNNER_SCHEMA_0_0_1}`)",
                config.schema
            ),
        ));
    }
    if config.store.path.trim().is_empty() {
        issues.push(ConfigIssue::new(
            "store.path",
            "runner.config.store.path",
            "store.path must not be empty".to_string(),
        ));
    }
    if config.limits.max_input_length == 0 {
        issues.push(ConfigIssue::new(
            "limits.max_input_length",
            "runner.config.limits.max_input_length",
            "limits.max_input_length must be > 0".to_string(),
        ));
    }
    if let Err(error) = EnvFilter::try_new(config.log.level.as_str()) {
        issues.push(ConfigIssue::new(
            "log.level",
            "runner.config.log.level",
            format!("invalid log level `{}`: {error}", config.log.level),
        ));
    }
    issues.sort();
    issues
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_runner_schema() -> String {
    RUNNER_SCHEMA_0_0_1.to_string()
}

fn default_store_path() -> String {
    "expreval-store.json".to_string()
}

fn default_max_input_length() -> usize {
    DEFAULT_MAX_INPUT_LENGTH
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Replaces every `${NAME}` with the value of the environment variable `NAME`.
fn expand_env_placeholders(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some((before, after)) = rest.split_once("${") {
        out.push_str(before);
        let Some((key, remainder)) = after.split_once('}') else {
            return Err("unterminated env placeholder `${...`".to_string());
        };
        if key.is_empty() {
            return Err("empty env placeholder `${}`".to_string());
        }
        let value =
            std::env::var(key).map_err(|_| format!("missing env var for placeholder `${{{key}}}`"))?;
        out.push_str(value.as_str());
        rest = remainder;
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
