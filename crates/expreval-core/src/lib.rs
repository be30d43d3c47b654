pub mod ast;
pub mod codec;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod path;

pub use ast::{AstNode, BinaryOp};
pub use codec::{decode, deserialize, serialize, CodecError};
pub use evaluator::{evaluate, evaluate_expression, evaluate_node, resolve, EvalError, ExpressionError};
pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use parser::{parse, parse_expression, CompileError, ParseError, Parser};
pub use path::{DottedPath, Lookup};
