//! End-to-end compile tests: source in, decodable container out.

use gdsc_bytecode::{FormatVersion, decode};
use gdsc_core::{BytecodeProvider, TokenKind, Variant};
use indoc::indoc;

use crate::{CompileError, compile};

const SOURCE: &str = indoc! {"
    extends Node

    var health = 100

    func take_damage(amount):
        health -= amount
        if health <= 0:
            queue_free()
"};

#[test]
fn compiled_container_decodes_legacy() {
    let provider = BytecodeProvider::reference(13);
    let bytes = compile(SOURCE, &provider).unwrap();

    let decoded = decode(&bytes, &provider).unwrap();
    assert_eq!(decoded.format, FormatVersion::Legacy { version: 13 });
    assert!(decoded.image.identifiers.contains(&"health".to_owned()));
    assert!(decoded.image.constants.contains(&Variant::Int32(100)));
    assert_eq!(
        decoded.image.tokens.last().map(|t| t.kind),
        Some(TokenKind::Empty)
    );
}

#[test]
fn compiled_container_decodes_modern() {
    let provider = BytecodeProvider::reference(100);
    let bytes = compile(SOURCE, &provider).unwrap();

    let decoded = decode(&bytes, &provider).unwrap();
    assert_eq!(decoded.format, FormatVersion::Modern { version: 100 });
    assert!(decoded.image.identifiers.contains(&"take_damage".to_owned()));
}

#[test]
fn token_lines_survive_the_roundtrip() {
    let provider = BytecodeProvider::reference(13);
    let bytes = compile("var a\nvar b", &provider).unwrap();

    let decoded = decode(&bytes, &provider).unwrap();
    let lines: Vec<u32> = decoded.image.tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 1, 2, 2, 2, 3, 3, 3]);
}

#[test]
fn lex_failure_aborts_compilation() {
    let provider = BytecodeProvider::reference(13);
    let err = compile("var ok\n`", &provider).unwrap_err();
    assert!(matches!(err, CompileError::Lex { line: 2 }));
}
