//! Core data model for GDScript bytecode tooling.
//!
//! This crate contains:
//! - Token model (`TokenKind`, `TokenPayload`, `Token`)
//! - Structural literal values (`Variant`)
//! - Interned tables (`Interner`, `ConstantPool`)
//! - Sparse line/column transition tables (`LineTable`, `CarryForward`)
//! - Per-release bytecode descriptors (`BytecodeProvider`)
//! - The decoded container shape (`ScriptImage`)

mod image;
mod interner;
mod line_table;
mod provider;
mod token;
mod variant;

#[cfg(test)]
mod provider_tests;

pub use image::ScriptImage;
pub use interner::{ConstantPool, Interner};
pub use line_table::{CarryForward, LineTable};
pub use provider::{BytecodeProvider, ProviderData, ProviderSpec};
pub use token::{Token, TokenKind, TokenPayload};
pub use variant::Variant;
