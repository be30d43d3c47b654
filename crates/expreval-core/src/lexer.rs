use regex::Regex;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Matched text. String literals have their enclosing quotes stripped.
    pub text: String,
    /// Byte offset of the token in the source text.
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    And,
    Or,
    Null,
    True,
    False,
    Variable,
    LParen,
    RParen,
    Eq,
    Le,
    Ge,
    Ne,
    Lt,
    Gt,
    String,
    Number,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Variable => "variable",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Eq => "'=='",
            TokenKind::Le => "'<='",
            TokenKind::Ge => "'>='",
            TokenKind::Ne => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::String => "string",
            TokenKind::Number => "number",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },
    #[error("unterminated string at {pos}")]
    UnterminatedString { pos: usize },
}

impl LexError {
    pub fn pos(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { pos, .. } | LexError::UnterminatedString { pos } => *pos,
        }
    }
}

// Tried in order against the unconsumed input; the first match wins. Keywords
// come before the variable pattern so they are never read as identifiers.
// A `None` kind marks whitespace, which is consumed but not emitted.
const PATTERNS: &[(Option<TokenKind>, &str)] = &[
    (Some(TokenKind::And), r"^AND\b"),
    (Some(TokenKind::Or), r"^OR\b"),
    (Some(TokenKind::Null), r"^null\b"),
    (Some(TokenKind::True), r"^true\b"),
    (Some(TokenKind::False), r"^false\b"),
    (
        Some(TokenKind::Variable),
        r"^[a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*",
    ),
    (Some(TokenKind::LParen), r"^\("),
    (Some(TokenKind::RParen), r"^\)"),
    (Some(TokenKind::Eq), r"^=="),
    (Some(TokenKind::Le), r"^<="),
    (Some(TokenKind::Ge), r"^>="),
    (Some(TokenKind::Ne), r"^!="),
    (Some(TokenKind::Lt), r"^<"),
    (Some(TokenKind::Gt), r"^>"),
    (Some(TokenKind::String), r#"^"[^"]*""#),
    (Some(TokenKind::Number), r"^[0-9]+"),
    (None, r"^[ \t\n\x0B\x0C\r]+"),
];

fn patterns() -> &'static [(Option<TokenKind>, Regex)] {
    static COMPILED: OnceLock<Vec<(Option<TokenKind>, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(kind, pattern)| (*kind, Regex::new(pattern).expect("valid token pattern")))
            .collect()
    })
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut pos = 0usize;
    let mut tokens = Vec::new();

    while pos < input.len() {
        let rest = &input[pos..];
        let Some((kind, len)) = match_at(rest) else {
            return Err(no_match_error(rest, pos));
        };
        if let Some(kind) = kind {
            tokens.push(make_token(kind, &rest[..len], pos));
        }
        pos += len;
    }

    Ok(tokens)
}

fn match_at(rest: &str) -> Option<(Option<TokenKind>, usize)> {
    patterns().iter().find_map(|(kind, regex)| {
        regex
            .find(rest)
            .filter(|found| !found.is_empty())
            .map(|found| (*kind, found.end()))
    })
}

fn make_token(kind: TokenKind, matched: &str, pos: usize) -> Token {
    let text = match kind {
        TokenKind::String => matched[1..matched.len() - 1].to_string(),
        _ => matched.to_string(),
    };
    Token { kind, text, pos }
}

fn no_match_error(rest: &str, pos: usize) -> LexError {
    let ch = rest.chars().next().unwrap_or_default();
    if ch == '"' {
        LexError::UnterminatedString { pos }
    } else {
        LexError::UnexpectedCharacter { ch, pos }
    }
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
