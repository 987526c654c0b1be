//! Constant type-tag dispatch.
//!
//! The on-disk tag is a u32: low byte selects the type ordinal in the
//! provider's table, bit 16 is the wide-numeric flag (Int64/Float64).
//! Encoder and decoder dispatch through the same provider type names so the
//! two directions cannot drift apart.
//!
//! NodePath and RID are present in every release's type table but have no
//! codec: decoding one would require guessing a byte count, and a wrong
//! guess desynchronizes every read after it. Both fail loudly instead.

use gdsc_core::{BytecodeProvider, Variant};

use super::{ByteCursor, EncodeError, FormatError};

/// Wide-numeric flag in the type tag.
const WIDE_FLAG: u32 = 1 << 16;

pub(crate) fn encode_constant(
    buf: &mut Vec<u8>,
    value: &Variant,
    provider: &BytecodeProvider,
) -> Result<(), EncodeError> {
    let name = value.type_name();
    let ordinal = provider
        .type_ordinal(name)
        .ok_or_else(|| EncodeError::UnsupportedConstantType {
            name: name.to_owned(),
        })?;
    let mut tag = ordinal;
    if value.is_wide() {
        tag |= WIDE_FLAG;
    }
    buf.extend_from_slice(&tag.to_le_bytes());

    match value {
        Variant::Nil => {}
        Variant::Bool(b) => buf.extend_from_slice(&u32::from(*b).to_le_bytes()),
        Variant::Int32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Variant::Int64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Variant::Float32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Variant::Float64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Variant::String(s) => {
            let bytes = s.as_bytes();
            buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            buf.extend_from_slice(bytes);
            // Pad the string body to 4-byte alignment.
            let rem = bytes.len() % 4;
            if rem != 0 {
                buf.extend_from_slice(&[0u8; 4][..4 - rem]);
            }
        }
        Variant::Vector2 { x, y } => put_f32s(buf, &[*x, *y]),
        Variant::Rect2 { x, y, w, h } => put_f32s(buf, &[*x, *y, *w, *h]),
        Variant::Vector3 { x, y, z } => put_f32s(buf, &[*x, *y, *z]),
        Variant::Transform2d(v) => put_f32s(buf, v),
        Variant::Plane { x, y, z, d } => put_f32s(buf, &[*x, *y, *z, *d]),
        Variant::Quat { x, y, z, w } => put_f32s(buf, &[*x, *y, *z, *w]),
        Variant::Aabb(v) => put_f32s(buf, v),
        Variant::Basis(v) => put_f32s(buf, v),
        Variant::Transform(v) => put_f32s(buf, v),
        Variant::Color { r, g, b, a } => put_f32s(buf, &[*r, *g, *b, *a]),
    }
    Ok(())
}

pub(crate) fn decode_constant(
    cursor: &mut ByteCursor<'_>,
    provider: &BytecodeProvider,
) -> Result<Variant, FormatError> {
    let tag = cursor.read_u32()?;
    let wide = tag & WIDE_FLAG != 0;
    let name = provider
        .type_name(tag & 0xFF)
        .ok_or(FormatError::UnsupportedConstantType {
            tag,
            name: "unknown".to_owned(),
        })?
        .to_owned();

    let value = match name.as_str() {
        "Nil" => Variant::Nil,
        "bool" => Variant::Bool(cursor.read_u32()? != 0),
        "int" => {
            if wide {
                Variant::Int64(cursor.read_i64()?)
            } else {
                Variant::Int32(cursor.read_i32()?)
            }
        }
        "float" => {
            if wide {
                Variant::Float64(cursor.read_f64()?)
            } else {
                Variant::Float32(cursor.read_f32()?)
            }
        }
        "String" => {
            let len = cursor.read_u32()? as usize;
            let bytes = cursor.read_bytes(len)?;
            let s = std::str::from_utf8(bytes).map_err(|e| {
                FormatError::CorruptPayload(format!("string constant is not UTF-8: {e}"))
            })?;
            let s = s.to_owned();
            let rem = len % 4;
            if rem != 0 {
                cursor.read_bytes(4 - rem)?;
            }
            Variant::String(s)
        }
        "Vector2" => Variant::Vector2 {
            x: cursor.read_f32()?,
            y: cursor.read_f32()?,
        },
        "Rect2" => Variant::Rect2 {
            x: cursor.read_f32()?,
            y: cursor.read_f32()?,
            w: cursor.read_f32()?,
            h: cursor.read_f32()?,
        },
        "Vector3" => Variant::Vector3 {
            x: cursor.read_f32()?,
            y: cursor.read_f32()?,
            z: cursor.read_f32()?,
        },
        "Transform2D" => Variant::Transform2d(read_f32s(cursor)?),
        "Plane" => Variant::Plane {
            x: cursor.read_f32()?,
            y: cursor.read_f32()?,
            z: cursor.read_f32()?,
            d: cursor.read_f32()?,
        },
        "Quat" => Variant::Quat {
            x: cursor.read_f32()?,
            y: cursor.read_f32()?,
            z: cursor.read_f32()?,
            w: cursor.read_f32()?,
        },
        "AABB" => Variant::Aabb(read_f32s(cursor)?),
        "Basis" => Variant::Basis(read_f32s(cursor)?),
        "Transform" => Variant::Transform(read_f32s(cursor)?),
        "Color" => Variant::Color {
            r: cursor.read_f32()?,
            g: cursor.read_f32()?,
            b: cursor.read_f32()?,
            a: cursor.read_f32()?,
        },
        // Reserved kinds with no codec. Failing here keeps the stream
        // position trustworthy for the caller's error report.
        "NodePath" | "RID" => return Err(FormatError::UnsupportedConstantType { tag, name }),
        _ => return Err(FormatError::UnsupportedConstantType { tag, name }),
    };
    Ok(value)
}

fn put_f32s(buf: &mut Vec<u8>, vals: &[f32]) {
    for v in vals {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn read_f32s<const N: usize>(cursor: &mut ByteCursor<'_>) -> Result<[f32; N], FormatError> {
    let mut out = [0.0f32; N];
    for v in &mut out {
        *v = cursor.read_f32()?;
    }
    Ok(out)
}
