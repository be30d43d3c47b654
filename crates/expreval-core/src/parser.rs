//! Recursive-descent parser.
//!
//! ```text
//! expression := term (OR term)*
//! term       := comparison (AND comparison)*
//! comparison := primary (compOp primary)*
//! primary    := '(' expression ')' | value
//! value      := VARIABLE | TRUE | FALSE | STRING | NUMBER | NULL
//! ```
//!
//! Every level folds to the left. Positions in errors are indexes into the
//! token sequence.

use crate::ast::{AstNode, BinaryOp};
use crate::lexer::{tokenize, LexError, Token, TokenKind};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token {found} at index {position}")]
    UnexpectedToken { found: String, position: usize },
    #[error("unexpected end of input at index {position}")]
    UnexpectedEnd { position: usize },
    #[error("expected {expected} but found {found} at index {position}")]
    Expected {
        expected: TokenKind,
        found: String,
        position: usize,
    },
    #[error("invalid operand for {op} at index {position}: {operand} has no boolean meaning")]
    InvalidLogicalOperand {
        op: BinaryOp,
        operand: &'static str,
        position: usize,
    },
    #[error("incompatible types for comparison at index {position}: {left} {op} {right}")]
    IncompatibleComparison {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
        position: usize,
    },
    #[error("a standalone {kind} literal is not a valid expression (index {position})")]
    StandaloneLiteral { kind: &'static str, position: usize },
    #[error("invalid number literal {literal} at index {position}")]
    InvalidNumber { literal: String, position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEnd { position }
            | ParseError::Expected { position, .. }
            | ParseError::InvalidLogicalOperand { position, .. }
            | ParseError::IncompatibleComparison { position, .. }
            | ParseError::StandaloneLiteral { position, .. }
            | ParseError::InvalidNumber { position, .. } => *position,
        }
    }
}

/// Failure of the text-to-tree pipeline.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("tokenize failed: {0}")]
    Lex(#[from] LexError),
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

/// Single-use parser over one token sequence. `parse` consumes it, so a
/// cursor is never shared between two parses.
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
}

pub fn parse(tokens: &[Token]) -> Result<AstNode, ParseError> {
    Parser::new(tokens).parse()
}

pub fn parse_expression(input: &str) -> Result<AstNode, CompileError> {
    let tokens = tokenize(input)?;
    Ok(parse(&tokens)?)
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn parse(mut self) -> Result<AstNode, ParseError> {
        let expression = self.parse_or()?;
        if let Some(token) = self.peek() {
            return Err(ParseError::UnexpectedToken {
                found: describe(token),
                position: self.index,
            });
        }
        if expression.is_non_boolean_literal() {
            return Err(ParseError::StandaloneLiteral {
                kind: expression.kind_name(),
                position: self.index,
            });
        }
        Ok(expression)
    }

    fn parse_or(&mut self) -> Result<AstNode, ParseError> {
        self.parse_logical_chain(TokenKind::Or, BinaryOp::Or, Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<AstNode, ParseError> {
        self.parse_logical_chain(TokenKind::And, BinaryOp::And, Self::parse_comparison)
    }

    fn parse_logical_chain<G>(
        &mut self,
        kind: TokenKind,
        op: BinaryOp,
        mut parse_operand: G,
    ) -> Result<AstNode, ParseError>
    where
        G: FnMut(&mut Self) -> Result<AstNode, ParseError>,
    {
        let mut node = parse_operand(self)?;
        while self.match_kind(kind) {
            self.check_logical_operand(&node, op)?;
            let right = parse_operand(self)?;
            self.check_logical_operand(&right, op)?;
            node = AstNode::binary(op, node, right);
        }
        Ok(node)
    }

    fn parse_comparison(&mut self) -> Result<AstNode, ParseError> {
        let mut node = self.parse_primary()?;
        while let Some(op) = self.peek().and_then(|token| comparison_op(token.kind)) {
            self.index += 1;
            let right = self.parse_primary()?;
            if !comparable(&node, &right) {
                return Err(ParseError::IncompatibleComparison {
                    op,
                    left: node.kind_name(),
                    right: right.kind_name(),
                    position: self.index,
                });
            }
            node = AstNode::binary(op, node, right);
        }
        Ok(node)
    }

    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        if self.match_kind(TokenKind::LParen) {
            let expression = self.parse_or()?;
            self.expect(TokenKind::RParen)?;
            return Ok(expression);
        }
        self.parse_value()
    }

    fn parse_value(&mut self) -> Result<AstNode, ParseError> {
        let position = self.index;
        let Some(token) = self.peek() else {
            return Err(ParseError::UnexpectedEnd { position });
        };
        let node = match token.kind {
            TokenKind::Variable => AstNode::Value(token.text.clone()),
            TokenKind::True => AstNode::Boolean(true),
            TokenKind::False => AstNode::Boolean(false),
            TokenKind::String => AstNode::String(token.text.clone()),
            TokenKind::Number => {
                let number = token.text.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
                    literal: token.text.clone(),
                    position,
                })?;
                AstNode::Number(number)
            }
            TokenKind::Null => AstNode::Null,
            _ => {
                return Err(ParseError::UnexpectedToken {
                    found: describe(token),
                    position,
                })
            }
        };
        self.index += 1;
        Ok(node)
    }

    fn check_logical_operand(&self, node: &AstNode, op: BinaryOp) -> Result<(), ParseError> {
        if node.is_non_boolean_literal() {
            return Err(ParseError::InvalidLogicalOperand {
                op,
                operand: node.kind_name(),
                position: self.index,
            });
        }
        Ok(())
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|token| token.kind == kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.match_kind(kind) {
            return Ok(());
        }
        Err(ParseError::Expected {
            expected: kind,
            found: self.peek().map(describe).unwrap_or_else(|| "end of input".to_string()),
            position: self.index,
        })
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }
}

fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Eq => BinaryOp::Eq,
        TokenKind::Ne => BinaryOp::Ne,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Le => BinaryOp::Le,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::Ge => BinaryOp::Ge,
        _ => return None,
    };
    Some(op)
}

// A variable's type is only known at evaluation time, so it is accepted
// against anything. Literals must pair with their own kind.
fn comparable(left: &AstNode, right: &AstNode) -> bool {
    matches!(
        (left, right),
        (AstNode::Value(_), _)
            | (_, AstNode::Value(_))
            | (AstNode::Number(_), AstNode::Number(_))
            | (AstNode::String(_), AstNode::String(_))
            | (AstNode::Boolean(_), AstNode::Boolean(_))
            | (AstNode::Null, AstNode::Null)
    )
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Variable => format!("variable `{}`", token.text),
        TokenKind::String => format!("string \"{}\"", token.text),
        TokenKind::Number => format!("number {}", token.text),
        kind => kind.name().to_string(),
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
