//! Container layout and the two physical encodings.
//!
//! Common prefix: 4-byte ASCII magic, u32 format version. Versions below
//! [`MODERN_VERSION_MIN`] use the legacy raw layout; versions at or above it
//! use the modern layout, which wraps everything after the version field in
//! `sub-version u32, decompressed-size u32, zlib payload` and adds a column
//! series plus a per-token line field.
//!
//! All integers are little-endian. Identifier bytes are XOR-masked with
//! [`XOR_MASK`] in both encodings.

mod constants;
mod cursor;
mod reader;
mod writer;

#[cfg(test)]
mod constants_tests;

pub use reader::decode;
pub use writer::encode;

pub(crate) use constants::{decode_constant, encode_constant};
pub(crate) use cursor::ByteCursor;

use gdsc_core::ScriptImage;

/// Magic tag at offset 0.
pub const MAGIC: [u8; 4] = *b"GDSC";

/// First format version using the modern compressed layout.
pub const MODERN_VERSION_MIN: u32 = 100;

/// Mask applied to every identifier byte on disk.
pub const XOR_MASK: u8 = 0xB6;

/// Which physical encoding a container declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatVersion {
    Legacy { version: u32 },
    Modern { version: u32 },
}

impl FormatVersion {
    pub fn is_modern(self) -> bool {
        matches!(self, FormatVersion::Modern { .. })
    }

    pub fn version(self) -> u32 {
        match self {
            FormatVersion::Legacy { version } | FormatVersion::Modern { version } => version,
        }
    }
}

/// A fully decoded container.
#[derive(Debug, Clone)]
pub struct DecodedContainer {
    pub format: FormatVersion,
    pub image: ScriptImage,
}

/// Decode-side failures.
///
/// All of these are fatal to the whole decode: once the header, a table, or
/// the compression framing cannot be trusted there is no meaningful partial
/// result. Per-token reference problems are not represented here — they are
/// downgraded to diagnostics by the reconstruction layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormatError {
    #[error("bad magic: expected GDSC")]
    BadMagic,

    #[error("unsupported bytecode version {0}")]
    UnsupportedVersion(u32),

    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    #[error("unsupported constant type tag {tag:#x} ({name})")]
    UnsupportedConstantType { tag: u32, name: String },
}

/// Encode-side failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EncodeError {
    /// The provider's type table has no ordinal for this constant type, or
    /// the type is one of the reserved unimplemented kinds.
    #[error("unsupported constant type {name}")]
    UnsupportedConstantType { name: String },

    /// The provider's token table has no ordinal for this kind.
    #[error("token kind {kind:?} has no ordinal in this bytecode version")]
    UnknownTokenKind { kind: gdsc_core::TokenKind },

    #[error("compression failed: {0}")]
    Compress(String),
}
