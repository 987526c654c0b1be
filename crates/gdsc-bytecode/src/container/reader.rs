//! Container reader and format dispatcher.
//!
//! Reads the magic and declared version, then routes to the legacy or
//! modern parse path. Header-level problems (magic, version, compression
//! framing, table decode) abort the whole decode; nothing here attempts
//! partial recovery — that policy lives in the reconstruction layer, which
//! only deals in per-token references.

use std::io::Read;

use flate2::read::ZlibDecoder;
use gdsc_core::{
    BytecodeProvider, CarryForward, LineTable, ScriptImage, Token, TokenKind, TokenPayload,
};

use super::{
    ByteCursor, DecodedContainer, FormatError, FormatVersion, MAGIC, MODERN_VERSION_MIN, XOR_MASK,
    decode_constant,
};

/// Decode a byte container into a [`ScriptImage`].
pub fn decode(bytes: &[u8], provider: &BytecodeProvider) -> Result<DecodedContainer, FormatError> {
    let mut cursor = ByteCursor::new(bytes);
    let magic = cursor.read_bytes(4).map_err(|_| FormatError::BadMagic)?;
    if magic != MAGIC {
        return Err(FormatError::BadMagic);
    }

    let version = cursor.read_u32()?;
    if version >= MODERN_VERSION_MIN {
        decode_modern(&mut cursor, version, provider)
    } else {
        decode_legacy(&mut cursor, version, provider)
    }
}

fn decode_legacy(
    cursor: &mut ByteCursor<'_>,
    version: u32,
    provider: &BytecodeProvider,
) -> Result<DecodedContainer, FormatError> {
    if version != provider.bytecode_version() {
        return Err(FormatError::UnsupportedVersion(version));
    }

    let identifier_count = cursor.read_u32()?;
    let constant_count = cursor.read_u32()?;
    let line_count = cursor.read_u32()?;
    let token_count = cursor.read_u32()?;

    let mut image = ScriptImage::default();
    for _ in 0..identifier_count {
        image.identifiers.push(read_legacy_identifier(cursor)?);
    }
    for _ in 0..constant_count {
        image.constants.push(decode_constant(cursor, provider)?);
    }
    image.lines = read_line_series(cursor, line_count)?;

    let mut lines = CarryForward::new(&image.lines, 1);
    for i in 0..token_count {
        let cell = read_token_cell(cursor)?;
        let kind = lookup_kind(cell & 0xFF, provider)?;
        let mut token = Token::with_payload(kind, payload_for(kind, cell >> 8));
        token.line = lines.advance(i);
        image.tokens.push(token);
    }

    Ok(DecodedContainer {
        format: FormatVersion::Legacy { version },
        image,
    })
}

fn decode_modern(
    cursor: &mut ByteCursor<'_>,
    version: u32,
    provider: &BytecodeProvider,
) -> Result<DecodedContainer, FormatError> {
    let sub_version = cursor.read_u32()?;
    if sub_version > MODERN_VERSION_MIN {
        return Err(FormatError::UnsupportedVersion(sub_version));
    }
    let declared_size = cursor.read_u32()? as usize;
    if declared_size == 0 {
        return Err(FormatError::CorruptPayload(
            "declared decompressed size is zero".to_owned(),
        ));
    }

    let mut body = Vec::with_capacity(declared_size);
    ZlibDecoder::new(cursor.take_remaining())
        .read_to_end(&mut body)
        .map_err(|e| FormatError::CorruptPayload(format!("decompression failed: {e}")))?;
    if body.len() != declared_size {
        return Err(FormatError::CorruptPayload(format!(
            "decompressed size mismatch: declared {declared_size}, got {}",
            body.len()
        )));
    }

    let cursor = &mut ByteCursor::new(&body);
    let identifier_count = cursor.read_u32()?;
    let constant_count = cursor.read_u32()?;
    let line_count = cursor.read_u32()?;
    cursor.read_u32()?; // reserved
    let token_count = cursor.read_u32()?;

    let mut image = ScriptImage::default();
    for _ in 0..identifier_count {
        image.identifiers.push(read_modern_identifier(cursor)?);
    }
    for _ in 0..constant_count {
        image.constants.push(decode_constant(cursor, provider)?);
    }
    image.lines = read_line_series(cursor, line_count)?;
    image.columns = read_line_series(cursor, line_count)?;

    let mut lines = CarryForward::new(&image.lines, 1);
    let mut columns = CarryForward::new(&image.columns, 1);
    for i in 0..token_count {
        let cell = read_token_cell(cursor)?;
        cursor.read_u32()?; // per-token line field; the sparse series wins
        let kind = lookup_kind(cell & 0x7F, provider)?;
        let mut token = Token::with_payload(kind, payload_for(kind, cell >> 8));
        token.line = lines.advance(i);
        token.column = columns.advance(i);
        image.tokens.push(token);
    }

    Ok(DecodedContainer {
        format: FormatVersion::Modern { version },
        image,
    })
}

/// Legacy identifier: length covers the XOR-masked bytes including NUL
/// padding; decode as UTF-8 and trim the padding.
fn read_legacy_identifier(cursor: &mut ByteCursor<'_>) -> Result<String, FormatError> {
    let len = cursor.read_u32()? as usize;
    let masked = cursor.read_bytes(len)?;
    let bytes: Vec<u8> = masked.iter().map(|b| b ^ XOR_MASK).collect();
    let s = String::from_utf8(bytes)
        .map_err(|e| FormatError::CorruptPayload(format!("identifier is not UTF-8: {e}")))?;
    Ok(s.trim_end_matches('\0').to_owned())
}

/// Modern identifier: length counts 4-byte units, one masked u32 per
/// character.
fn read_modern_identifier(cursor: &mut ByteCursor<'_>) -> Result<String, FormatError> {
    let units = cursor.read_u32()? as usize;
    let masked = cursor.read_bytes(units * 4)?;
    let mut s = String::with_capacity(units);
    for chunk in masked.chunks_exact(4) {
        let code = u32::from_le_bytes([
            chunk[0] ^ XOR_MASK,
            chunk[1] ^ XOR_MASK,
            chunk[2] ^ XOR_MASK,
            chunk[3] ^ XOR_MASK,
        ]);
        let c = char::from_u32(code).ok_or_else(|| {
            FormatError::CorruptPayload(format!("identifier code point {code:#x} is invalid"))
        })?;
        s.push(c);
    }
    Ok(s.trim_end_matches('\0').to_owned())
}

fn read_line_series(cursor: &mut ByteCursor<'_>, count: u32) -> Result<LineTable, FormatError> {
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let token_index = cursor.read_u32()?;
        let value = cursor.read_u32()?;
        entries.push((token_index, value));
    }
    Ok(LineTable::from_entries(entries))
}

/// Extended token cell: one byte, unless its high bit is set — then back up
/// and re-read the cell as a 4-byte value with that same bit cleared.
fn read_token_cell(cursor: &mut ByteCursor<'_>) -> Result<u32, FormatError> {
    let first = cursor.peek_u8()?;
    if first & 0x80 != 0 {
        Ok(cursor.read_u32()? & !0x80)
    } else {
        cursor.read_u8()?;
        Ok(u32::from(first))
    }
}

fn lookup_kind(ordinal: u32, provider: &BytecodeProvider) -> Result<TokenKind, FormatError> {
    provider.token_kind(ordinal).ok_or_else(|| {
        FormatError::CorruptPayload(format!("unknown token ordinal {ordinal}"))
    })
}

/// Which table a token's raw payload indexes depends only on its kind.
fn payload_for(kind: TokenKind, raw: u32) -> TokenPayload {
    match kind {
        TokenKind::Identifier | TokenKind::Annotation => TokenPayload::Identifier(raw),
        TokenKind::Constant => TokenPayload::Constant(raw),
        TokenKind::BuiltInType | TokenKind::BuiltInFunc => TokenPayload::BuiltIn(raw),
        _ => TokenPayload::None,
    }
}
