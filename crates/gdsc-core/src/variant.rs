//! Structural value model for literal constants.
//!
//! One tagged union shared by both binary dialects of the container format.
//! The codecs live in `gdsc-bytecode`; this type only knows its structure
//! and its source-form rendering.
//!
//! NodePath and RID exist in the engine's type table but have no decoder
//! here — the dispatch layer rejects them loudly instead of guessing a byte
//! count and desynchronizing the stream.

use std::fmt;

/// A typed literal value from a script's constant table.
///
/// Equality is structural with bit-equality on float payloads, so two NaN
/// constants with the same bit pattern dedup to one pool entry.
#[derive(Clone, Debug)]
pub enum Variant {
    Nil,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Vector2 { x: f32, y: f32 },
    Rect2 { x: f32, y: f32, w: f32, h: f32 },
    Vector3 { x: f32, y: f32, z: f32 },
    /// Column-major 2D transform: x-axis, y-axis, origin.
    Transform2d([f32; 6]),
    Plane { x: f32, y: f32, z: f32, d: f32 },
    Quat { x: f32, y: f32, z: f32, w: f32 },
    /// Position followed by size.
    Aabb([f32; 6]),
    /// Row-major 3x3 basis.
    Basis([f32; 9]),
    /// Basis followed by origin.
    Transform([f32; 12]),
    Color { r: f32, g: f32, b: f32, a: f32 },
}

impl Variant {
    /// Engine type name used by the constant dispatch table.
    pub fn type_name(&self) -> &'static str {
        match self {
            Variant::Nil => "Nil",
            Variant::Bool(_) => "bool",
            Variant::Int32(_) | Variant::Int64(_) => "int",
            Variant::Float32(_) | Variant::Float64(_) => "float",
            Variant::String(_) => "String",
            Variant::Vector2 { .. } => "Vector2",
            Variant::Rect2 { .. } => "Rect2",
            Variant::Vector3 { .. } => "Vector3",
            Variant::Transform2d(_) => "Transform2D",
            Variant::Plane { .. } => "Plane",
            Variant::Quat { .. } => "Quat",
            Variant::Aabb(_) => "AABB",
            Variant::Basis(_) => "Basis",
            Variant::Transform(_) => "Transform",
            Variant::Color { .. } => "Color",
        }
    }

    /// Whether the on-disk type tag carries the wide-numeric flag.
    pub fn is_wide(&self) -> bool {
        matches!(self, Variant::Int64(_) | Variant::Float64(_))
    }
}

fn feq(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        use Variant::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (Float32(a), Float32(b)) => feq(*a, *b),
            (Float64(a), Float64(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (Vector2 { x: ax, y: ay }, Vector2 { x: bx, y: by }) => feq(*ax, *bx) && feq(*ay, *by),
            (
                Rect2 { x: ax, y: ay, w: aw, h: ah },
                Rect2 { x: bx, y: by, w: bw, h: bh },
            ) => feq(*ax, *bx) && feq(*ay, *by) && feq(*aw, *bw) && feq(*ah, *bh),
            (
                Vector3 { x: ax, y: ay, z: az },
                Vector3 { x: bx, y: by, z: bz },
            ) => feq(*ax, *bx) && feq(*ay, *by) && feq(*az, *bz),
            (Transform2d(a), Transform2d(b)) => a.iter().zip(b).all(|(x, y)| feq(*x, *y)),
            (
                Plane { x: ax, y: ay, z: az, d: ad },
                Plane { x: bx, y: by, z: bz, d: bd },
            ) => feq(*ax, *bx) && feq(*ay, *by) && feq(*az, *bz) && feq(*ad, *bd),
            (
                Quat { x: ax, y: ay, z: az, w: aw },
                Quat { x: bx, y: by, z: bz, w: bw },
            ) => feq(*ax, *bx) && feq(*ay, *by) && feq(*az, *bz) && feq(*aw, *bw),
            (Aabb(a), Aabb(b)) => a.iter().zip(b).all(|(x, y)| feq(*x, *y)),
            (Basis(a), Basis(b)) => a.iter().zip(b).all(|(x, y)| feq(*x, *y)),
            (Transform(a), Transform(b)) => a.iter().zip(b).all(|(x, y)| feq(*x, *y)),
            (
                Color { r: ar, g: ag, b: ab, a: aa },
                Color { r: br, g: bg, b: bb, a: ba },
            ) => feq(*ar, *br) && feq(*ag, *bg) && feq(*ab, *bb) && feq(*aa, *ba),
            _ => false,
        }
    }
}

impl Eq for Variant {}

fn write_seq(f: &mut fmt::Formatter<'_>, name: &str, vals: &[f32]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, v) in vals.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v:?}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Variant {
    /// Source-form rendering. Floats use the debug formatter so a stored
    /// `1.0` prints with its decimal point and re-tokenizes as a float.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Nil => write!(f, "null"),
            Variant::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Variant::Int32(v) => write!(f, "{v}"),
            Variant::Int64(v) => write!(f, "{v}"),
            Variant::Float32(v) => write!(f, "{v:?}"),
            Variant::Float64(v) => write!(f, "{v:?}"),
            Variant::String(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\r' => write!(f, "\\r")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")
            }
            Variant::Vector2 { x, y } => write_seq(f, "Vector2", &[*x, *y]),
            Variant::Rect2 { x, y, w, h } => write_seq(f, "Rect2", &[*x, *y, *w, *h]),
            Variant::Vector3 { x, y, z } => write_seq(f, "Vector3", &[*x, *y, *z]),
            Variant::Transform2d(v) => write_seq(f, "Transform2D", v),
            Variant::Plane { x, y, z, d } => write_seq(f, "Plane", &[*x, *y, *z, *d]),
            Variant::Quat { x, y, z, w } => write_seq(f, "Quat", &[*x, *y, *z, *w]),
            Variant::Aabb(v) => write_seq(f, "AABB", v),
            Variant::Basis(v) => write_seq(f, "Basis", v),
            Variant::Transform(v) => write_seq(f, "Transform", v),
            Variant::Color { r, g, b, a } => write_seq(f, "Color", &[*r, *g, *b, *a]),
        }
    }
}
