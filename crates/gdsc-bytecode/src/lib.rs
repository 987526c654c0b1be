//! GDScript bytecode container format.
//!
//! This crate contains:
//! - The container writer (`encode`) and reader/dispatcher (`decode`)
//! - The constant type-tag dispatch shared by both directions
//! - The extended (1-byte-or-4-byte) token cell encoding
//! - `FormatError` / `EncodeError`

pub mod container;

pub use container::{
    DecodedContainer, EncodeError, FormatError, FormatVersion, MAGIC, MODERN_VERSION_MIN,
    XOR_MASK, decode, encode,
};
