//! End-to-end decompile tests against the compiler.

use gdsc_bytecode::{FormatError, FormatVersion, encode};
use gdsc_compiler::{compile, lexer};
use gdsc_core::{BytecodeProvider, ScriptImage, Token, TokenKind, TokenPayload};
use indoc::indoc;

use crate::decompile;

const SOURCE: &str = indoc! {"
    extends Node

    var health = 100

    func take_damage(amount):
        health -= amount
        if health <= 0:
            queue_free()
"};

fn kinds(source: &str, provider: &BytecodeProvider) -> Vec<TokenKind> {
    lexer::tokenize(source, provider)
        .unwrap()
        .iter()
        .map(|l| l.kind)
        .collect()
}

/// Indentation is not recoverable, so equivalence is judged on the token
/// stream: recompiling the reconstructed source must yield the same kinds.
#[test]
fn legacy_roundtrip_preserves_the_token_stream() {
    let provider = BytecodeProvider::reference(13);
    let bytes = compile(SOURCE, &provider).unwrap();

    let decompiled = decompile(&bytes, &provider).unwrap();
    assert_eq!(decompiled.format, FormatVersion::Legacy { version: 13 });
    assert!(decompiled.diagnostics.is_empty());
    assert_eq!(kinds(&decompiled.source, &provider), kinds(SOURCE, &provider));
}

#[test]
fn modern_roundtrip_preserves_the_token_stream() {
    let provider = BytecodeProvider::reference(100);
    let bytes = compile(SOURCE, &provider).unwrap();

    let decompiled = decompile(&bytes, &provider).unwrap();
    assert_eq!(decompiled.format, FormatVersion::Modern { version: 100 });
    assert!(decompiled.diagnostics.is_empty());
    assert_eq!(kinds(&decompiled.source, &provider), kinds(SOURCE, &provider));
}

#[test]
fn dangling_reference_degrades_instead_of_failing() {
    let provider = BytecodeProvider::reference(13);
    let mut image = ScriptImage::default();
    image.identifiers = vec!["x".to_owned()];
    image.tokens = vec![
        Token::with_payload(TokenKind::PrVar, TokenPayload::None),
        Token::with_payload(TokenKind::Identifier, TokenPayload::Identifier(0)),
        Token::with_payload(TokenKind::OpAssign, TokenPayload::None),
        Token::with_payload(TokenKind::Constant, TokenPayload::Constant(7)),
        Token::new(TokenKind::Newline),
        Token::new(TokenKind::Eof),
        Token::new(TokenKind::Empty),
    ];

    let bytes = encode(&image, &provider).unwrap();
    let decompiled = decompile(&bytes, &provider).unwrap();
    assert_eq!(decompiled.source, "var x = null\n");
    assert_eq!(decompiled.diagnostics.len(), 1);
}

#[test]
fn container_corruption_fails_loudly() {
    let provider = BytecodeProvider::reference(13);
    assert!(matches!(
        decompile(b"XISC\x0d\x00\x00\x00", &provider),
        Err(FormatError::BadMagic)
    ));
}
