//! Container writer.
//!
//! Serializes a [`ScriptImage`] in one pass: magic, version, counts, the
//! identifier and constant tables, the sparse line series, then the token
//! stream. The provider's declared bytecode version selects the legacy or
//! modern layout.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use gdsc_core::{BytecodeProvider, ScriptImage, Token};

use super::{EncodeError, MAGIC, MODERN_VERSION_MIN, XOR_MASK, encode_constant};

/// Serialize an image into a byte container.
pub fn encode(image: &ScriptImage, provider: &BytecodeProvider) -> Result<Vec<u8>, EncodeError> {
    if provider.bytecode_version() >= MODERN_VERSION_MIN {
        encode_modern(image, provider)
    } else {
        encode_legacy(image, provider)
    }
}

fn encode_legacy(image: &ScriptImage, provider: &BytecodeProvider) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&MAGIC);
    put_u32(&mut buf, provider.bytecode_version());
    put_u32(&mut buf, image.identifiers.len() as u32);
    put_u32(&mut buf, image.constants.len() as u32);
    put_u32(&mut buf, image.lines.len() as u32);
    put_u32(&mut buf, image.tokens.len() as u32);

    for ident in &image.identifiers {
        put_legacy_identifier(&mut buf, ident);
    }
    for value in &image.constants {
        encode_constant(&mut buf, value, provider)?;
    }
    for (token_index, line) in image.lines.iter() {
        put_u32(&mut buf, token_index);
        put_u32(&mut buf, line);
    }
    for token in &image.tokens {
        put_token_cell(&mut buf, token, provider)?;
    }
    Ok(buf)
}

fn encode_modern(image: &ScriptImage, provider: &BytecodeProvider) -> Result<Vec<u8>, EncodeError> {
    let mut body = Vec::new();
    put_u32(&mut body, image.identifiers.len() as u32);
    put_u32(&mut body, image.constants.len() as u32);
    put_u32(&mut body, image.lines.len() as u32);
    put_u32(&mut body, 0); // reserved
    put_u32(&mut body, image.tokens.len() as u32);

    for ident in &image.identifiers {
        put_modern_identifier(&mut body, ident);
    }
    for value in &image.constants {
        encode_constant(&mut body, value, provider)?;
    }
    // Line series, then the companion column series. The column series
    // stores line + 1 at every transition; that is the observed on-disk
    // layout, preserved verbatim.
    for (token_index, line) in image.lines.iter() {
        put_u32(&mut body, token_index);
        put_u32(&mut body, line);
    }
    for (token_index, line) in image.lines.iter() {
        put_u32(&mut body, token_index);
        put_u32(&mut body, line + 1);
    }
    for token in &image.tokens {
        put_token_cell(&mut body, token, provider)?;
        put_u32(&mut body, token.line);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&body)
        .and_then(|_| encoder.finish())
        .map_err(|e| EncodeError::Compress(e.to_string()))
        .and_then(|compressed| {
            let mut buf = Vec::new();
            buf.extend_from_slice(&MAGIC);
            put_u32(&mut buf, provider.bytecode_version());
            put_u32(&mut buf, provider.bytecode_version()); // inner sub-version
            put_u32(&mut buf, body.len() as u32);
            buf.extend_from_slice(&compressed);
            Ok(buf)
        })
}

/// Legacy identifier cell: 4-byte length prefix, XOR-masked UTF-8, masked
/// NUL padding to 4-byte alignment. The length field stores encoded length
/// *plus* padding. When the raw length is already 4-aligned a full extra
/// quad of padding is still emitted — the original encoder does this, and
/// existing containers depend on it, so it is preserved rather than fixed.
fn put_legacy_identifier(buf: &mut Vec<u8>, ident: &str) {
    let encoded = ident.as_bytes();
    let length_pos = buf.len();
    put_u32(buf, 0); // patched below
    for &b in encoded {
        buf.push(b ^ XOR_MASK);
    }

    let mut padding = 0u32;
    if encoded.len() % 4 == 0 {
        for _ in 0..4 {
            buf.push(XOR_MASK); // masked NUL
            padding += 1;
        }
    }
    while (encoded.len() + padding as usize) % 4 != 0 {
        buf.push(XOR_MASK);
        padding += 1;
    }

    let total = encoded.len() as u32 + padding;
    buf[length_pos..length_pos + 4].copy_from_slice(&total.to_le_bytes());
}

/// Modern identifier cell: length prefix counts 4-byte units, one masked
/// u32 per character.
fn put_modern_identifier(buf: &mut Vec<u8>, ident: &str) {
    let chars: Vec<char> = ident.chars().collect();
    put_u32(buf, chars.len() as u32);
    for c in chars {
        for b in (c as u32).to_le_bytes() {
            buf.push(b ^ XOR_MASK);
        }
    }
}

/// Token cell: `ordinal | payload << 8`, one byte when the whole cell fits
/// in 7 bits, otherwise a 4-byte little-endian value with bit 7 set.
fn put_token_cell(
    buf: &mut Vec<u8>,
    token: &Token,
    provider: &BytecodeProvider,
) -> Result<(), EncodeError> {
    let ordinal = provider
        .token_ordinal(token.kind)
        .ok_or(EncodeError::UnknownTokenKind { kind: token.kind })?;
    let cell = ordinal | (token.payload.raw() << 8);
    if cell < 0x80 {
        buf.push(cell as u8);
    } else {
        put_u32(buf, cell | 0x80);
    }
    Ok(())
}

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}
