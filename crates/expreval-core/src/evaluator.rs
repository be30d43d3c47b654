use crate::ast::{AstNode, BinaryOp};
use crate::codec::CodecError;
use crate::parser::{parse_expression, CompileError};
use crate::path::DottedPath;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("failed to parse JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("`{operand}` has no value for numeric comparison {op}")]
    MissingNumber { op: BinaryOp, operand: String },
    #[error("failed to convert `{value}` to a number for comparison {op}")]
    NotANumber { op: BinaryOp, value: String },
    #[error("`{operand}` has no value to test as a condition")]
    MissingCondition { operand: String },
}

/// Failure of a one-shot text-and-document evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("AST codec failed: {0}")]
    Codec(#[from] CodecError),
    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),
}

pub fn evaluate(node: &AstNode, json: &str) -> Result<bool, EvalError> {
    let document = serde_json::from_str::<Value>(json)?;
    evaluate_node(node, &document)
}

pub fn evaluate_expression(expression: &str, json: &str) -> Result<bool, ExpressionError> {
    let node = parse_expression(expression)?;
    Ok(evaluate(&node, json)?)
}

pub fn evaluate_node(node: &AstNode, document: &Value) -> Result<bool, EvalError> {
    let AstNode::BinaryOp { op, left, right } = node else {
        // Standalone variables and booleans count as true only for a "true" text form.
        return resolve(node, document)?
            .map(|text| text.eq_ignore_ascii_case("true"))
            .ok_or_else(|| EvalError::MissingCondition {
                operand: node.to_string(),
            });
    };

    match op {
        BinaryOp::And => Ok(evaluate_node(left, document)? && evaluate_node(right, document)?),
        BinaryOp::Or => Ok(evaluate_node(left, document)? || evaluate_node(right, document)?),
        BinaryOp::Eq => Ok(resolve(left, document)? == resolve(right, document)?),
        BinaryOp::Ne => Ok(resolve(left, document)? != resolve(right, document)?),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let left = numeric_operand(left, *op, document)?;
            let right = numeric_operand(right, *op, document)?;
            Ok(match op {
                BinaryOp::Lt => left < right,
                BinaryOp::Le => left <= right,
                BinaryOp::Gt => left > right,
                _ => left >= right,
            })
        }
    }
}

/// Text form of an operand, or `None` for the absence of a value.
///
/// A variable that is missing from the document and one that holds JSON
/// `null` both resolve to `None`, as does the `null` literal. A nested
/// operation resolves to the text form of its boolean result.
pub fn resolve(node: &AstNode, document: &Value) -> Result<Option<String>, EvalError> {
    match node {
        AstNode::Value(path) => Ok(DottedPath::parse(path)
            .lookup(document)
            .present()
            .map(scalar_text)),
        AstNode::String(value) => Ok(Some(value.clone())),
        AstNode::Number(value) => Ok(Some(value.to_string())),
        AstNode::Boolean(value) => Ok(Some(value.to_string())),
        AstNode::Null => Ok(None),
        AstNode::BinaryOp { .. } => Ok(Some(evaluate_node(node, document)?.to_string())),
    }
}

// Objects and arrays have no scalar text and read as the empty string.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn numeric_operand(node: &AstNode, op: BinaryOp, document: &Value) -> Result<f64, EvalError> {
    let text = resolve(node, document)?.ok_or_else(|| EvalError::MissingNumber {
        op,
        operand: node.to_string(),
    })?;
    match parse_number(text.trim()) {
        Some(number) => Ok(number),
        None => Err(EvalError::NotANumber { op, value: text }),
    }
}

// Decimal and exponent forms, plus the exact spellings `Infinity` and `NaN`.
// `str::parse` would also take `inf`, `infinity` and `nan` in any case.
fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(|ch| ch == '+' || ch == '-').unwrap_or(text);
    if unsigned.starts_with(|ch: char| ch.is_ascii_alphabetic())
        && unsigned != "Infinity"
        && unsigned != "NaN"
    {
        return None;
    }
    text.parse::<f64>().ok()
}

#[cfg(test)]
#[path = "evaluator_test.rs"]
mod tests;
