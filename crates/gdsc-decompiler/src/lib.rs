//! GDScript bytecode-to-source decompiler.
//!
//! [`decompile`] is the inverse of the compiler pipeline: decode the
//! container with [`gdsc_bytecode::decode`], then rebuild source text from
//! the token stream. Container-level corruption (bad magic, wrong version,
//! broken compression) fails the whole run; dangling table references do
//! not — they degrade to placeholders and are reported as diagnostics.

pub mod reconstruct;

#[cfg(test)]
mod decompile_tests;
#[cfg(test)]
mod reconstruct_tests;

use gdsc_bytecode::{FormatError, FormatVersion};
use gdsc_core::BytecodeProvider;

pub use reconstruct::reconstruct;

/// Result of a decompile run.
#[derive(Debug, Clone)]
pub struct Decompiled {
    pub source: String,
    /// Container layout the input used.
    pub format: FormatVersion,
    /// One entry per reference that failed to resolve.
    pub diagnostics: Vec<String>,
}

/// Decompile a bytecode container back into source text.
pub fn decompile(bytes: &[u8], provider: &BytecodeProvider) -> Result<Decompiled, FormatError> {
    let container = gdsc_bytecode::decode(bytes, provider)?;
    log::debug!(
        "decoded {:?} container: {} identifiers, {} constants, {} tokens",
        container.format,
        container.image.identifiers.len(),
        container.image.constants.len(),
        container.image.tokens.len(),
    );

    let (source, diagnostics) = reconstruct(&container.image, provider);
    Ok(Decompiled {
        source,
        format: container.format,
        diagnostics,
    })
}
