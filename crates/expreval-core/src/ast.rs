use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    BinaryOp {
        op: BinaryOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    /// Dotted variable reference, resolved against the document at evaluation time.
    Value(String),
    String(String),
    Number(i64),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl AstNode {
    pub fn binary(op: BinaryOp, left: AstNode, right: AstNode) -> Self {
        AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn value(path: impl Into<String>) -> Self {
        AstNode::Value(path.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        AstNode::String(value.into())
    }

    /// Short variant name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::BinaryOp { .. } => "expression",
            AstNode::Value(_) => "variable",
            AstNode::String(_) => "string",
            AstNode::Number(_) => "number",
            AstNode::Boolean(_) => "boolean",
            AstNode::Null => "null",
        }
    }

    /// String, number and null literals carry no boolean meaning on their own.
    pub fn is_non_boolean_literal(&self) -> bool {
        matches!(self, AstNode::String(_) | AstNode::Number(_) | AstNode::Null)
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "AND" => BinaryOp::And,
            "OR" => BinaryOp::Or,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            _ => return None,
        };
        Some(op)
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Renders the node back to expression text. Every binary operation is
/// parenthesized, so rendering a parsed tree and parsing it again yields the
/// same tree.
impl Display for AstNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AstNode::BinaryOp { op, left, right } => write!(f, "({left} {op} {right})"),
            AstNode::Value(path) => f.write_str(path),
            AstNode::String(value) => write!(f, "\"{value}\""),
            AstNode::Number(value) => write!(f, "{value}"),
            AstNode::Boolean(value) => write!(f, "{value}"),
            AstNode::Null => f.write_str("null"),
        }
    }
}
