use crate::cli::{Cli, Commands, DocumentArgs, OutputFormat};
use crate::config::{load_runner_config, RunnerConfig, RunnerConfigError};
use expreval_store::{
    ExpressionService, FileStore, MemoryStore, ServiceError, ServiceOptions, StoreError,
};
use serde_json::json;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("read stdin failed: {0}")]
    ReadStdin(#[source] std::io::Error),
    #[error("{0}")]
    Config(#[from] RunnerConfigError),
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("output encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
    #[error("logging init failed: {0}")]
    Logging(String),
}

impl RunnerError {
    pub fn position(&self) -> Option<usize> {
        match self {
            RunnerError::Service(error) => error.position(),
            _ => None,
        }
    }
}

/// Loads `--config` when given, otherwise the built-in defaults.
pub fn resolve_config(cli: &Cli) -> Result<RunnerConfig, RunnerError> {
    match cli.config.as_deref() {
        Some(path) => Ok(load_runner_config(path)?),
        None => Ok(RunnerConfig::default()),
    }
}

pub fn execute(cli: &Cli, config: &RunnerConfig) -> Result<String, RunnerError> {
    execute_with_stdin(cli, config, &mut std::io::stdin())
}

pub fn execute_with_stdin(
    cli: &Cli,
    config: &RunnerConfig,
    stdin: &mut dyn Read,
) -> Result<String, RunnerError> {
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.store.path.as_str()));
    let options = ServiceOptions {
        max_input_length: config.limits.max_input_length,
    };

    match &cli.command {
        Commands::Parse(command) => {
            let service = ExpressionService::new(MemoryStore::new(), options);
            let compiled = service.compile(command.expr.as_str())?;
            match cli.format {
                OutputFormat::Text => Ok(compiled.ast_json),
                OutputFormat::Json => {
                    let ast: serde_json::Value = serde_json::from_str(compiled.ast_json.as_str())?;
                    render_json(&json!({ "expression": compiled.expression, "ast": ast }))
                }
            }
        }
        Commands::Check(command) => {
            let document = read_document(&command.document, stdin)?;
            let service = ExpressionService::new(MemoryStore::new(), options);
            let result = service.evaluate_text(command.expr.as_str(), document.as_str())?;
            render_result(&cli.format, result, command.expr.as_str())
        }
        Commands::Save(command) => {
            let mut service = open_service(store_path.as_path(), options)?;
            let stored = service.save(command.name.as_str(), command.value.as_str())?;
            match cli.format {
                OutputFormat::Text => Ok(format!(
                    "saved expression {}: {}",
                    stored.id, stored.expression
                )),
                OutputFormat::Json => {
                    render_json(&json!({ "id": stored.id, "value": stored.expression }))
                }
            }
        }
        Commands::Evaluate(command) => {
            let document = read_document(&command.document, stdin)?;
            let service = open_service(store_path.as_path(), options)?;
            let evaluation = service.evaluate(command.id, document.as_str())?;
            render_result(&cli.format, evaluation.result, evaluation.expression.as_str())
        }
        Commands::List => {
            let service = open_service(store_path.as_path(), options)?;
            let expressions = service.list()?;
            match cli.format {
                OutputFormat::Text => Ok(expressions
                    .iter()
                    .map(|stored| format!("{}\t{}\t{}", stored.id, stored.name, stored.expression))
                    .collect::<Vec<_>>()
                    .join("\n")),
                OutputFormat::Json => render_json(&expressions),
            }
        }
        Commands::Remove(command) => {
            let mut service = open_service(store_path.as_path(), options)?;
            service.remove(command.id)?;
            match cli.format {
                OutputFormat::Text => Ok(format!("removed expression {}", command.id)),
                OutputFormat::Json => render_json(&json!({ "id": command.id, "removed": true })),
            }
        }
    }
}

/// Renders `error` for stderr; JSON mode mirrors `{"message", "position"?}`.
pub fn render_error(error: &RunnerError, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            let mut body = json!({ "message": error.to_string() });
            if let Some(position) = error.position() {
                body["position"] = json!(position);
            }
            body.to_string()
        }
    }
}

pub fn read_document(args: &DocumentArgs, stdin: &mut dyn Read) -> Result<String, RunnerError> {
    if let Some(inline) = args.json.as_ref() {
        return Ok(inline.clone());
    }
    match args.data.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .map_err(RunnerError::ReadStdin)?;
            Ok(buffer)
        }
        Some(path) => fs::read_to_string(path).map_err(|source| RunnerError::ReadFile {
            path: path.display().to_string(),
            source,
        }),
        // clap's argument group guarantees one source
        None => Ok(String::new()),
    }
}

fn open_service(
    path: &Path,
    options: ServiceOptions,
) -> Result<ExpressionService<FileStore>, RunnerError> {
    let store = FileStore::open(path)?;
    debug!(path = %store.path().display(), "opened expression store");
    Ok(ExpressionService::new(store, options))
}

fn render_result(format: &OutputFormat, result: bool, expression: &str) -> Result<String, RunnerError> {
    match format {
        OutputFormat::Text => Ok(result.to_string()),
        OutputFormat::Json => render_json(&json!({ "result": result, "expr": expression })),
    }
}

fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, RunnerError> {
    serde_json::to_string_pretty(value).map_err(RunnerError::from)
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
