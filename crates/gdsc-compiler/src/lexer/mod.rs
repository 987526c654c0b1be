//! Source tokenizer.
//!
//! A single forward scan over the (whitespace-trimmed) source. At each
//! position the ordered matcher list is consulted and the first matcher to
//! claim input wins; when none does, the scan fails with the current line.
//! Whitespace and comments are recorded as meta lexemes and stripped before
//! the stream is returned, and every stream ends with the engine's fixed
//! `Newline`, `Eof`, `Empty` tail.

mod cursor;
mod matchers;

#[cfg(test)]
mod tokenize_tests;

use gdsc_core::{BytecodeProvider, TokenKind, Variant};

use crate::CompileError;

pub use cursor::SourceCursor;
pub use matchers::{Matcher, matcher_set};

/// Operand captured alongside a lexeme, before interning assigns indices.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    /// Identifier or annotation text.
    Ident(String),
    /// Literal value.
    Const(Variant),
    /// Index into a provider built-in name list.
    Index(u32),
}

/// One matched span of source.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub operand: Operand,
    pub line: u32,
    /// Whitespace or comment; dropped before the stream is returned.
    pub meta: bool,
}

impl Lexeme {
    pub fn plain(kind: TokenKind, line: u32) -> Self {
        Self { kind, operand: Operand::None, line, meta: false }
    }

    pub fn with_operand(kind: TokenKind, operand: Operand, line: u32) -> Self {
        Self { kind, operand, line, meta: false }
    }

    pub fn meta(line: u32) -> Self {
        Self { kind: TokenKind::Empty, operand: Operand::None, line, meta: true }
    }
}

/// Tokenize source into a lexeme stream.
pub fn tokenize(source: &str, provider: &BytecodeProvider) -> Result<Vec<Lexeme>, CompileError> {
    let matchers = matcher_set();
    let mut cursor = SourceCursor::new(source.trim());
    let mut lexemes = Vec::new();

    'scan: while cursor.has_remaining() {
        for matcher in &matchers {
            if let Some(lexeme) = matcher.try_match(&mut cursor, provider)? {
                lexemes.push(lexeme);
                continue 'scan;
            }
        }
        return Err(CompileError::Lex { line: cursor.line() });
    }

    lexemes.retain(|l| !l.meta);

    let line = cursor.line();
    lexemes.push(Lexeme::plain(TokenKind::Newline, line));
    lexemes.push(Lexeme::plain(TokenKind::Eof, line));
    lexemes.push(Lexeme::plain(TokenKind::Empty, line));
    Ok(lexemes)
}
