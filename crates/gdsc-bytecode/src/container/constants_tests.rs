//! Tests for the constant type dispatch.

use gdsc_core::{BytecodeProvider, Variant};

use super::{ByteCursor, FormatError, decode_constant, encode_constant};

fn roundtrip(value: Variant) -> Variant {
    let provider = BytecodeProvider::reference(13);
    let mut buf = Vec::new();
    encode_constant(&mut buf, &value, &provider).unwrap();
    let mut cursor = ByteCursor::new(&buf);
    decode_constant(&mut cursor, &provider).unwrap()
}

#[test]
fn scalar_constants() {
    assert_eq!(roundtrip(Variant::Nil), Variant::Nil);
    assert_eq!(roundtrip(Variant::Bool(true)), Variant::Bool(true));
    assert_eq!(roundtrip(Variant::Int32(-5)), Variant::Int32(-5));
    assert_eq!(roundtrip(Variant::Int64(1 << 40)), Variant::Int64(1 << 40));
    assert_eq!(roundtrip(Variant::Float32(0.25)), Variant::Float32(0.25));
    assert_eq!(roundtrip(Variant::Float64(0.1)), Variant::Float64(0.1));
}

#[test]
fn wide_flag_selects_width() {
    let provider = BytecodeProvider::reference(13);

    let mut buf = Vec::new();
    encode_constant(&mut buf, &Variant::Int64(7), &provider).unwrap();
    let tag = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    assert_eq!(tag & 0xFF, provider.type_ordinal("int").unwrap());
    assert_ne!(tag & (1 << 16), 0);
    assert_eq!(buf.len(), 4 + 8);

    let mut buf = Vec::new();
    encode_constant(&mut buf, &Variant::Int32(7), &provider).unwrap();
    let tag = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    assert_eq!(tag & (1 << 16), 0);
    assert_eq!(buf.len(), 4 + 4);
}

#[test]
fn string_constant_pads_to_alignment() {
    let provider = BytecodeProvider::reference(13);

    let mut buf = Vec::new();
    encode_constant(&mut buf, &Variant::String("abcde".to_owned()), &provider).unwrap();
    // tag + length + 5 bytes + 3 padding
    assert_eq!(buf.len(), 4 + 4 + 8);

    let mut cursor = ByteCursor::new(&buf);
    assert_eq!(
        decode_constant(&mut cursor, &provider).unwrap(),
        Variant::String("abcde".to_owned())
    );
}

#[test]
fn math_constants_roundtrip() {
    let v = Variant::Transform([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 4.0, 5.0, 6.0]);
    assert_eq!(roundtrip(v.clone()), v);

    let v = Variant::Color { r: 0.1, g: 0.2, b: 0.3, a: 1.0 };
    assert_eq!(roundtrip(v.clone()), v);
}

#[test]
fn reserved_kinds_fail_loudly() {
    let provider = BytecodeProvider::reference(13);
    let node_path = provider.type_ordinal("NodePath").unwrap();

    let buf = node_path.to_le_bytes();
    let mut cursor = ByteCursor::new(&buf);
    let err = decode_constant(&mut cursor, &provider).unwrap_err();
    match err {
        FormatError::UnsupportedConstantType { tag, name } => {
            assert_eq!(tag, node_path);
            assert_eq!(name, "NodePath");
        }
        other => panic!("expected UnsupportedConstantType, got {other:?}"),
    }
}

#[test]
fn unknown_tag_fails() {
    let provider = BytecodeProvider::reference(13);

    let buf = 0xEEu32.to_le_bytes();
    let mut cursor = ByteCursor::new(&buf);
    assert!(matches!(
        decode_constant(&mut cursor, &provider),
        Err(FormatError::UnsupportedConstantType { .. })
    ));
}

#[test]
fn truncated_constant_is_corrupt() {
    let provider = BytecodeProvider::reference(13);
    let int_ord = provider.type_ordinal("int").unwrap();

    let buf = int_ord.to_le_bytes(); // tag only, payload missing
    let mut cursor = ByteCursor::new(&buf);
    assert!(matches!(
        decode_constant(&mut cursor, &provider),
        Err(FormatError::CorruptPayload(_))
    ));
}
