//! Tests for the scan loop and matcher ordering.

use gdsc_core::{BytecodeProvider, TokenKind, Variant};
use indoc::indoc;

use crate::CompileError;

use super::{Lexeme, Operand, tokenize};

fn provider() -> BytecodeProvider {
    BytecodeProvider::reference(13)
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, &provider())
        .unwrap()
        .iter()
        .map(|l| l.kind)
        .collect()
}

/// Lexemes without the fixed `Newline`/`Eof`/`Empty` tail.
fn body(source: &str) -> Vec<Lexeme> {
    let mut lexemes = tokenize(source, &provider()).unwrap();
    lexemes.truncate(lexemes.len() - 3);
    lexemes
}

#[test]
fn stream_ends_with_fixed_tail() {
    use TokenKind::*;
    assert_eq!(kinds("pass"), vec![CfPass, Newline, Eof, Empty]);
}

#[test]
fn longest_operator_wins() {
    use TokenKind::*;
    assert_eq!(
        kinds("a <<= 1"),
        vec![Identifier, OpAssignShiftLeft, Constant, Newline, Eof, Empty]
    );
    assert_eq!(
        kinds("a << 1"),
        vec![Identifier, OpShiftLeft, Constant, Newline, Eof, Empty]
    );
    assert_eq!(
        kinds("a < b"),
        vec![Identifier, OpLess, Identifier, Newline, Eof, Empty]
    );
    assert_eq!(
        kinds("a != b"),
        vec![Identifier, OpNotEqual, Identifier, Newline, Eof, Empty]
    );
    assert_eq!(kinds("!a"), vec![OpBitInvert, Identifier, Newline, Eof, Empty]);
}

#[test]
fn arrow_before_minus() {
    use TokenKind::*;
    assert_eq!(
        kinds("func f() -> void"),
        vec![
            PrFunction,
            Identifier,
            ParenthesisOpen,
            ParenthesisClose,
            ForwardArrow,
            PrVoid,
            Newline,
            Eof,
            Empty
        ]
    );
    assert_eq!(kinds("a - b"), vec![Identifier, OpSub, Identifier, Newline, Eof, Empty]);
}

#[test]
fn keywords_stop_at_word_boundaries() {
    use TokenKind::*;
    assert_eq!(kinds("var x"), vec![PrVar, Identifier, Newline, Eof, Empty]);
    // `varx` must not split into `var` + `x`.
    assert_eq!(kinds("varx"), vec![Identifier, Newline, Eof, Empty]);
    assert_eq!(kinds("in x"), vec![OpIn, Identifier, Newline, Eof, Empty]);
    // `int` is a built-in type, not `in` + `t`.
    assert_eq!(kinds("int"), vec![BuiltInType, Newline, Eof, Empty]);
}

#[test]
fn builtins_resolve_to_list_indices() {
    let p = provider();
    let lexemes = body("int");
    assert_eq!(lexemes[0].kind, TokenKind::BuiltInType);
    let Operand::Index(idx) = lexemes[0].operand else {
        panic!("expected index operand");
    };
    assert_eq!(p.builtin_type_name(idx), Some("int"));

    let lexemes = body("sin");
    assert_eq!(lexemes[0].kind, TokenKind::BuiltInFunc);
    assert_eq!(lexemes[0].operand, Operand::Index(0));
}

#[test]
fn wildcard_only_when_alone() {
    use TokenKind::*;
    assert_eq!(kinds("_"), vec![Wildcard, Newline, Eof, Empty]);
    assert_eq!(kinds("_x"), vec![Identifier, Newline, Eof, Empty]);
}

#[test]
fn annotation_keeps_leading_at() {
    let lexemes = body("@export_range");
    assert_eq!(lexemes[0].kind, TokenKind::Annotation);
    assert_eq!(
        lexemes[0].operand,
        Operand::Ident("@export_range".to_owned())
    );
}

#[test]
fn numeric_literals() {
    let cases = [
        ("42", Variant::Int32(42)),
        ("0xFF", Variant::Int32(255)),
        ("5000000000", Variant::Int64(5_000_000_000)),
        ("1.5", Variant::Float64(1.5)),
        ("2e3", Variant::Float64(2000.0)),
        ("1.5e-2", Variant::Float64(0.015)),
    ];
    for (source, expected) in cases {
        let lexemes = body(source);
        assert_eq!(lexemes.len(), 1, "source {source:?}");
        assert_eq!(lexemes[0].operand, Operand::Const(expected), "source {source:?}");
    }
}

#[test]
fn dot_after_integer_is_member_access() {
    use TokenKind::*;
    assert_eq!(kinds("1.x"), vec![Constant, Period, Identifier, Newline, Eof, Empty]);
}

#[test]
fn string_literals_and_escapes() {
    let lexemes = body(r#""a\nb""#);
    assert_eq!(
        lexemes[0].operand,
        Operand::Const(Variant::String("a\nb".to_owned()))
    );

    let lexemes = body(r#"'it\'s'"#);
    assert_eq!(
        lexemes[0].operand,
        Operand::Const(Variant::String("it's".to_owned()))
    );
}

#[test]
fn unterminated_string_reports_line() {
    let err = tokenize("var a\nvar b = \"oops", &provider()).unwrap_err();
    assert!(matches!(err, CompileError::Lex { line: 2 }));
}

#[test]
fn unrecognized_input_reports_line() {
    let err = tokenize("var a\n\\", &provider()).unwrap_err();
    assert!(matches!(err, CompileError::Lex { line: 2 }));
}

#[test]
fn comments_and_whitespace_are_stripped() {
    use TokenKind::*;
    let source = indoc! {"
        # leading comment
        var x = 1 # trailing
    "};
    assert_eq!(
        kinds(source),
        vec![Newline, PrVar, Identifier, OpAssign, Constant, Newline, Eof, Empty]
    );
}

#[test]
fn lexeme_lines_advance_at_newlines() {
    let source = "var a\nvar b";
    let lexemes = tokenize(source, &provider()).unwrap();
    let lines: Vec<u32> = lexemes.iter().map(|l| l.line).collect();
    // `var a`, the newline that ends line 1, then `var b` and the tail.
    assert_eq!(lines, vec![1, 1, 1, 2, 2, 2, 2, 2]);
}

#[test]
fn word_operators_match_before_identifiers() {
    use TokenKind::*;
    assert_eq!(
        kinds("a and not b"),
        vec![Identifier, OpAnd, OpNot, Identifier, Newline, Eof, Empty]
    );
    assert_eq!(kinds("android"), vec![Identifier, Newline, Eof, Empty]);
}

#[test]
fn named_float_constants() {
    use TokenKind::*;
    assert_eq!(
        kinds("PI TAU INF NAN"),
        vec![ConstPi, ConstTau, ConstInf, ConstNan, Newline, Eof, Empty]
    );
}
