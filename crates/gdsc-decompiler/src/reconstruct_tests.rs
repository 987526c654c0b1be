//! Tests for source reconstruction and the spacing rules.

use gdsc_compiler::compile_to_image;
use gdsc_core::{BytecodeProvider, ScriptImage, Token, TokenKind, TokenPayload, Variant};

use super::reconstruct;

fn provider() -> BytecodeProvider {
    BytecodeProvider::reference(13)
}

fn rebuild(source: &str) -> String {
    let p = provider();
    let image = compile_to_image(source, &p).unwrap();
    let (text, diagnostics) = reconstruct(&image, &p);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    text
}

#[test]
fn statements_space_their_words() {
    assert_eq!(rebuild("var health = 100"), "var health = 100\n");
    assert_eq!(rebuild("if health <= 0:"), "if health <= 0:\n");
}

#[test]
fn calls_and_subscripts_attach() {
    assert_eq!(rebuild("queue_free()"), "queue_free()\n");
    assert_eq!(rebuild("items[0]"), "items[0]\n");
    assert_eq!(rebuild("get_node(path).show()"), "get_node(path).show()\n");
}

#[test]
fn member_access_has_no_spaces() {
    assert_eq!(rebuild("a.b.c"), "a.b.c\n");
    assert_eq!(rebuild("$Sprite.visible"), "$Sprite.visible\n");
}

#[test]
fn separators_bind_left() {
    assert_eq!(rebuild("f(a, b, c)"), "f(a, b, c)\n");
}

#[test]
fn constants_render_in_source_form() {
    assert_eq!(rebuild("var x = 1.5"), "var x = 1.5\n");
    assert_eq!(rebuild("var s = \"hi\""), "var s = \"hi\"\n");
}

#[test]
fn builtins_resolve_through_the_provider() {
    assert_eq!(rebuild("sin(x)"), "sin(x)\n");
    assert_eq!(rebuild("int(y)"), "int(y)\n");
}

#[test]
fn blank_lines_survive() {
    assert_eq!(rebuild("var a\n\nvar b"), "var a\n\nvar b\n");
}

#[test]
fn line_jumps_indent_from_the_column_index() {
    // No newline tokens at all: breaks and indentation must come from the
    // carried line/column positions alone.
    let p = provider();
    let mut image = ScriptImage::default();
    image.identifiers = vec!["a".to_owned(), "b".to_owned()];

    let mut first = Token::with_payload(TokenKind::Identifier, TokenPayload::Identifier(0));
    first.line = 1;
    first.column = 1;
    let mut second = Token::with_payload(TokenKind::Identifier, TokenPayload::Identifier(1));
    second.line = 3;
    second.column = 5;
    image.tokens = vec![first, second, Token::new(TokenKind::Eof)];

    let (text, diagnostics) = reconstruct(&image, &p);
    assert_eq!(text, "a\n\n    b");
    assert!(diagnostics.is_empty());
}

#[test]
fn dangling_identifier_degrades_to_placeholder() {
    let p = provider();
    let mut image = ScriptImage::default();
    image.tokens = vec![
        Token::with_payload(TokenKind::Identifier, TokenPayload::Identifier(5)),
        Token::new(TokenKind::Newline),
        Token::new(TokenKind::Eof),
        Token::new(TokenKind::Empty),
    ];

    let (text, diagnostics) = reconstruct(&image, &p);
    assert_eq!(text, "null\n");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("identifier index 5"));
}

#[test]
fn dangling_constant_still_renders_the_rest() {
    let p = provider();
    let mut image = ScriptImage::default();
    image.identifiers = vec!["x".to_owned()];
    image.constants = vec![Variant::Int32(1)];
    image.tokens = vec![
        Token::with_payload(TokenKind::PrVar, TokenPayload::None),
        Token::with_payload(TokenKind::Identifier, TokenPayload::Identifier(0)),
        Token::with_payload(TokenKind::OpAssign, TokenPayload::None),
        Token::with_payload(TokenKind::Constant, TokenPayload::Constant(9)),
        Token::new(TokenKind::Newline),
        Token::new(TokenKind::Eof),
        Token::new(TokenKind::Empty),
    ];

    let (text, diagnostics) = reconstruct(&image, &p);
    assert_eq!(text, "var x = null\n");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("constant index 9"));
}
