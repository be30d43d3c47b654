use crate::record::{NewExpression, StoredExpression};
use crate::store::{ExpressionStore, StoreError};
use expreval_core::{
    deserialize, evaluate, parse, serialize, tokenize, AstNode, CodecError, EvalError, LexError,
    ParseError,
};
use serde::Serialize;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_INPUT_LENGTH: usize = 2000;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("input string exceeds the maximum length of {max} characters (got {actual})")]
    InputTooLong { max: usize, actual: usize },
    #[error("tokenize failed: {0}")]
    Lex(#[from] LexError),
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
    #[error("AST codec failed: {0}")]
    Codec(#[from] CodecError),
    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),
    #[error("expression not found with id {0}")]
    NotFound(u64),
    #[error("store failed: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Token index of a parse failure.
    pub fn position(&self) -> Option<usize> {
        match self {
            ServiceError::Parse(error) => Some(error.position()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    pub max_input_length: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpression {
    pub expression: String,
    pub ast: AstNode,
    pub ast_json: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub id: u64,
    pub result: bool,
    pub expression: String,
}

/// Rewrites `&&`/`||` to `AND`/`OR` and enforces the length cap on the result.
pub fn preprocess_input(text: &str, max_input_length: usize) -> Result<String, ServiceError> {
    let rewritten = text.replace("&&", "AND").replace("||", "OR");
    let actual = rewritten.chars().count();
    if actual > max_input_length {
        return Err(ServiceError::InputTooLong {
            max: max_input_length,
            actual,
        });
    }
    Ok(rewritten)
}

pub struct ExpressionService<S> {
    store: S,
    options: ServiceOptions,
}

impl<S: ExpressionStore> ExpressionService<S> {
    pub fn new(store: S, options: ServiceOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> ServiceOptions {
        self.options
    }

    pub fn compile(&self, text: &str) -> Result<CompiledExpression, ServiceError> {
        let expression = preprocess_input(text, self.options.max_input_length)?;
        let tokens = tokenize(&expression)?;
        let ast = parse(&tokens)?;
        let ast_json = serialize(&ast)?;
        debug!(tokens = tokens.len(), "compiled expression");
        Ok(CompiledExpression {
            expression,
            ast,
            ast_json,
        })
    }

    pub fn save(&mut self, name: &str, text: &str) -> Result<StoredExpression, ServiceError> {
        let compiled = self.compile(text).inspect_err(|error| {
            warn!(name, %error, "rejected expression");
        })?;
        let stored = self.store.insert(NewExpression {
            name: name.to_string(),
            expression: compiled.expression,
            ast_json: compiled.ast_json,
        })?;
        info!(id = stored.id, name, "stored expression");
        Ok(stored)
    }

    pub fn get(&self, id: u64) -> Result<StoredExpression, ServiceError> {
        self.store.get(id)?.ok_or(ServiceError::NotFound(id))
    }

    pub fn list(&self) -> Result<Vec<StoredExpression>, ServiceError> {
        Ok(self.store.list()?)
    }

    pub fn remove(&mut self, id: u64) -> Result<(), ServiceError> {
        if !self.store.remove(id)? {
            return Err(ServiceError::NotFound(id));
        }
        info!(id, "removed expression");
        Ok(())
    }

    pub fn evaluate(&self, id: u64, json: &str) -> Result<Evaluation, ServiceError> {
        let stored = self.get(id)?;
        let result = deserialize(&stored.ast_json)
            .map_err(ServiceError::from)
            .and_then(|ast| Ok(evaluate(&ast, json)?))
            .inspect_err(|error| {
                warn!(id, %error, "evaluation failed");
            })?;
        info!(id, result, "evaluated expression");
        Ok(Evaluation {
            id,
            result,
            expression: stored.expression,
        })
    }

    /// Compiles and evaluates without touching the store.
    pub fn evaluate_text(&self, text: &str, json: &str) -> Result<bool, ServiceError> {
        let compiled = self.compile(text)?;
        Ok(evaluate(&compiled.ast, json)?)
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
