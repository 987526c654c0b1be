//! GDScript source-to-bytecode compiler.
//!
//! The pipeline is three stages: [`lexer::tokenize`] scans the source with
//! the ordered matcher list, [`build_image`] interns operands into the
//! dense tables, and [`gdsc_bytecode::encode`] serializes the result in the
//! layout the supplied [`BytecodeProvider`] calls for.

pub mod lexer;

mod image_builder;

#[cfg(test)]
mod compile_tests;

use gdsc_core::{BytecodeProvider, ScriptImage};

pub use image_builder::build_image;

/// Compilation failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    /// No matcher claimed the input at this line.
    #[error("unrecognized token on line {line}")]
    Lex { line: u32 },
    #[error(transparent)]
    Encode(#[from] gdsc_bytecode::EncodeError),
}

/// Compile source text into a bytecode container.
pub fn compile(source: &str, provider: &BytecodeProvider) -> Result<Vec<u8>, CompileError> {
    let image = compile_to_image(source, provider)?;
    Ok(gdsc_bytecode::encode(&image, provider)?)
}

/// Run the tokenize and intern stages without serializing.
pub fn compile_to_image(
    source: &str,
    provider: &BytecodeProvider,
) -> Result<ScriptImage, CompileError> {
    let lexemes = lexer::tokenize(source, provider)?;
    Ok(build_image(lexemes))
}
