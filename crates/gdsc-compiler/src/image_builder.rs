//! Interning pass: lexeme stream → [`ScriptImage`].
//!
//! Assigns dense first-seen indices for identifiers and constants, rewrites
//! each operand into a table reference, and records a sparse line-table
//! entry at every `Newline`.

use gdsc_core::{
    ConstantPool, Interner, LineTable, ScriptImage, Token, TokenKind, TokenPayload,
};

use crate::lexer::{Lexeme, Operand};

/// Build the serializable image from a tokenized stream.
pub fn build_image(lexemes: Vec<Lexeme>) -> ScriptImage {
    let mut identifiers = Interner::new();
    let mut constants = ConstantPool::new();
    let mut lines = LineTable::new();
    let mut tokens = Vec::with_capacity(lexemes.len());

    // Line 1 starts at token 0; each newline opens the next line at its own
    // stream position.
    lines.push(0, 1);
    let mut next_line = 2;

    for (i, lexeme) in lexemes.into_iter().enumerate() {
        let payload = match lexeme.operand {
            Operand::None => TokenPayload::None,
            Operand::Ident(text) => TokenPayload::Identifier(identifiers.intern(&text)),
            Operand::Const(value) => TokenPayload::Constant(constants.intern(value)),
            Operand::Index(index) => TokenPayload::BuiltIn(index),
        };
        if lexeme.kind == TokenKind::Newline {
            lines.push(i as u32, next_line);
            next_line += 1;
        }
        let mut token = Token::with_payload(lexeme.kind, payload);
        token.line = lexeme.line;
        tokens.push(token);
    }

    ScriptImage {
        identifiers: identifiers.into_vec(),
        constants: constants.into_vec(),
        lines,
        columns: LineTable::new(),
        tokens,
    }
}
