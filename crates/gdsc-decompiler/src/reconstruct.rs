//! Token stream → source text.
//!
//! Reconstruction is best-effort by design: a reference that points outside
//! its table never aborts the run. The offending token renders as a `null`
//! placeholder, the problem is logged, and a diagnostic describing it rides
//! along with the output.
//!
//! Line breaks come from `Newline` tokens where the stream has them. When a
//! token's carried line is ahead of the running output line anyway, the gap
//! is closed with breaks and the token is indented to `column - 1` — that is
//! the only indentation the container records, so none is invented from
//! token structure.

use gdsc_core::{BytecodeProvider, ScriptImage, Token, TokenKind, TokenPayload};

/// Rebuild source text from a decoded image.
///
/// Returns the text and the diagnostics collected for every reference that
/// could not be resolved.
pub fn reconstruct(image: &ScriptImage, provider: &BytecodeProvider) -> (String, Vec<String>) {
    let mut out = String::new();
    let mut diagnostics = Vec::new();
    let mut previous = TokenKind::Newline;
    let mut line = 1u32;

    for (index, token) in image.tokens.iter().enumerate() {
        match token.kind {
            // Structural kinds with no source form.
            TokenKind::Eof | TokenKind::Empty | TokenKind::Error | TokenKind::Cursor => continue,
            TokenKind::Newline => {
                out.push('\n');
                line += 1;
                previous = TokenKind::Newline;
                continue;
            }
            _ => {}
        }

        if token.line > line {
            for _ in line..token.line {
                out.push('\n');
            }
            for _ in 1..token.column.max(1) {
                out.push(' ');
            }
            line = token.line;
            previous = TokenKind::Newline;
        }

        let text = match render(index, token, image, provider) {
            Ok(text) => text,
            Err(diagnostic) => {
                log::warn!("{diagnostic}");
                diagnostics.push(diagnostic);
                "null".to_owned()
            }
        };

        if wants_space_before(token.kind, previous) {
            out.push(' ');
        }
        out.push_str(&text);
        previous = token.kind;
    }

    (out, diagnostics)
}

/// Source text for one token; `Err` carries the diagnostic for a reference
/// that does not resolve.
fn render(
    index: usize,
    token: &Token,
    image: &ScriptImage,
    provider: &BytecodeProvider,
) -> Result<String, String> {
    if let Some(text) = token.kind.static_text() {
        return Ok(text.to_owned());
    }
    match (token.kind, token.payload) {
        (TokenKind::Identifier | TokenKind::Annotation, TokenPayload::Identifier(i)) => image
            .identifier(i)
            .map(str::to_owned)
            .ok_or_else(|| {
                format!(
                    "token {index}: identifier index {i} out of range ({} entries)",
                    image.identifiers.len()
                )
            }),
        (TokenKind::Constant, TokenPayload::Constant(i)) => image
            .constant(i)
            .map(|v| v.to_string())
            .ok_or_else(|| {
                format!(
                    "token {index}: constant index {i} out of range ({} entries)",
                    image.constants.len()
                )
            }),
        (TokenKind::BuiltInType, TokenPayload::BuiltIn(i)) => provider
            .builtin_type_name(i)
            .map(str::to_owned)
            .ok_or_else(|| format!("token {index}: built-in type index {i} unknown")),
        (TokenKind::BuiltInFunc, TokenPayload::BuiltIn(i)) => provider
            .builtin_func_name(i)
            .map(str::to_owned)
            .ok_or_else(|| format!("token {index}: built-in function index {i} unknown")),
        (kind, payload) => Err(format!(
            "token {index}: {kind:?} carries unexpected payload {payload:?}"
        )),
    }
}

/// Whether a space separates this token from the previous one.
fn wants_space_before(kind: TokenKind, previous: TokenKind) -> bool {
    use TokenKind::*;

    // Line starts and open/access punctuation bind to the right.
    if matches!(
        previous,
        Newline | ParenthesisOpen | BracketOpen | Period | Dollar | OpBitInvert
    ) {
        return false;
    }
    // Closing and separator punctuation binds to the left.
    if matches!(
        kind,
        Comma | Semicolon | Colon | Period | ParenthesisClose | BracketClose | CurlyBracketClose
    ) {
        return false;
    }
    // Calls and subscripts attach to the expression they follow.
    if kind == ParenthesisOpen
        && matches!(
            previous,
            Identifier | BuiltInFunc | BuiltInType | ParenthesisClose | BracketClose
        )
    {
        return false;
    }
    if kind == BracketOpen
        && matches!(previous, Identifier | Constant | ParenthesisClose | BracketClose)
    {
        return false;
    }
    true
}
