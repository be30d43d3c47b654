//! Tagged JSON form of the AST.
//!
//! Every node is an object carrying a `type` discriminator next to its
//! variant fields:
//!
//! | variant     | `type`        | fields                  |
//! |-------------|---------------|-------------------------|
//! | BinaryOp    | `binaryOp`    | `op`, `left`, `right`   |
//! | Value       | `value`       | `value` (dotted path)   |
//! | String      | `string`      | `value` (string)        |
//! | Number      | `number`      | `value` (integer)       |
//! | Null        | `nullNode`    | none                    |
//! | Boolean     | `booleanNode` | `value` (bool)          |
//!
//! This is the persisted form, so the tags and field names must not change.

use crate::ast::{AstNode, BinaryOp};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub const TYPE_FIELD: &str = "type";
pub const TAG_BINARY_OP: &str = "binaryOp";
pub const TAG_VALUE: &str = "value";
pub const TAG_STRING: &str = "string";
pub const TAG_NUMBER: &str = "number";
pub const TAG_NULL: &str = "nullNode";
pub const TAG_BOOLEAN: &str = "booleanNode";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid AST json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("AST node at {path} must be a JSON object")]
    NotAnObject { path: String },
    #[error("AST node at {path} has no `type` discriminator")]
    MissingType { path: String },
    #[error("AST node at {path} has unknown type `{tag}`")]
    UnknownType { path: String, tag: String },
    #[error("AST node at {path} is missing field `{field}`")]
    MissingField { path: String, field: &'static str },
    #[error("AST node at {path} has invalid field `{field}`: expected {expected}")]
    InvalidField {
        path: String,
        field: &'static str,
        expected: &'static str,
    },
    #[error("AST node at {path} has unexpected field `{field}`")]
    UnknownField { path: String, field: String },
    #[error("AST node at {path} has unknown operator `{op}`")]
    UnknownOperator { path: String, op: String },
}

pub fn serialize(node: &AstNode) -> Result<String, CodecError> {
    Ok(serde_json::to_string(node)?)
}

/// Decodes a serialized tree. Nesting depth is unbounded since every
/// chained operator adds one object level.
pub fn deserialize(input: &str) -> Result<AstNode, CodecError> {
    let mut deserializer = serde_json::Deserializer::from_str(input);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    decode(&value)
}

pub fn decode(value: &Value) -> Result<AstNode, CodecError> {
    decode_at(value, "$")
}

impl Serialize for AstNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AstNode::BinaryOp { op, left, right } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry(TYPE_FIELD, TAG_BINARY_OP)?;
                map.serialize_entry("op", op.symbol())?;
                map.serialize_entry("left", left.as_ref())?;
                map.serialize_entry("right", right.as_ref())?;
                map.end()
            }
            AstNode::Value(path) => tagged_value(serializer, TAG_VALUE, path),
            AstNode::String(value) => tagged_value(serializer, TAG_STRING, value),
            AstNode::Number(value) => tagged_value(serializer, TAG_NUMBER, value),
            AstNode::Boolean(value) => tagged_value(serializer, TAG_BOOLEAN, value),
            AstNode::Null => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(TYPE_FIELD, TAG_NULL)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for AstNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode(&value).map_err(D::Error::custom)
    }
}

fn tagged_value<S: Serializer, T: Serialize + ?Sized>(
    serializer: S,
    tag: &'static str,
    value: &T,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(2))?;
    map.serialize_entry(TYPE_FIELD, tag)?;
    map.serialize_entry("value", value)?;
    map.end()
}

fn decode_at(value: &Value, path: &str) -> Result<AstNode, CodecError> {
    let object = value.as_object().ok_or_else(|| CodecError::NotAnObject {
        path: path.to_string(),
    })?;
    let tag = match object.get(TYPE_FIELD) {
        Some(Value::String(tag)) => tag.as_str(),
        Some(_) => {
            return Err(CodecError::InvalidField {
                path: path.to_string(),
                field: "type",
                expected: "string",
            })
        }
        None => {
            return Err(CodecError::MissingType {
                path: path.to_string(),
            })
        }
    };

    match tag {
        TAG_BINARY_OP => {
            reject_unknown_fields(object, path, &["op", "left", "right"])?;
            let symbol = string_field(object, path, "op")?;
            let op = BinaryOp::from_symbol(symbol).ok_or_else(|| CodecError::UnknownOperator {
                path: path.to_string(),
                op: symbol.to_string(),
            })?;
            let left = decode_at(required(object, path, "left")?, &format!("{path}.left"))?;
            let right = decode_at(required(object, path, "right")?, &format!("{path}.right"))?;
            Ok(AstNode::binary(op, left, right))
        }
        TAG_VALUE => {
            reject_unknown_fields(object, path, &["value"])?;
            Ok(AstNode::Value(string_field(object, path, "value")?.to_string()))
        }
        TAG_STRING => {
            reject_unknown_fields(object, path, &["value"])?;
            Ok(AstNode::String(string_field(object, path, "value")?.to_string()))
        }
        TAG_NUMBER => {
            reject_unknown_fields(object, path, &["value"])?;
            let number = required(object, path, "value")?
                .as_i64()
                .ok_or_else(|| invalid_field(path, "value", "integer"))?;
            Ok(AstNode::Number(number))
        }
        TAG_BOOLEAN => {
            reject_unknown_fields(object, path, &["value"])?;
            let flag = required(object, path, "value")?
                .as_bool()
                .ok_or_else(|| invalid_field(path, "value", "boolean"))?;
            Ok(AstNode::Boolean(flag))
        }
        TAG_NULL => {
            reject_unknown_fields(object, path, &[])?;
            Ok(AstNode::Null)
        }
        other => Err(CodecError::UnknownType {
            path: path.to_string(),
            tag: other.to_string(),
        }),
    }
}

fn required<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    field: &'static str,
) -> Result<&'a Value, CodecError> {
    object.get(field).ok_or_else(|| CodecError::MissingField {
        path: path.to_string(),
        field,
    })
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    field: &'static str,
) -> Result<&'a str, CodecError> {
    required(object, path, field)?
        .as_str()
        .ok_or_else(|| invalid_field(path, field, "string"))
}

fn invalid_field(path: &str, field: &'static str, expected: &'static str) -> CodecError {
    CodecError::InvalidField {
        path: path.to_string(),
        field,
        expected,
    }
}

fn reject_unknown_fields(
    object: &Map<String, Value>,
    path: &str,
    allowed: &[&str],
) -> Result<(), CodecError> {
    match object
        .keys()
        .find(|key| key.as_str() != TYPE_FIELD && !allowed.contains(&key.as_str()))
    {
        Some(field) => Err(CodecError::UnknownField {
            path: path.to_string(),
            field: field.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
