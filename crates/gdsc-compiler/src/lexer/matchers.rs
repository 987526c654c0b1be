//! The ordered matcher list.
//!
//! Each matcher recognizes exactly one lexical shape at the cursor. The
//! tokenizer tries them strictly in list order and takes the first hit, so
//! the ordering below *is* the tokenizer's dispatch: longer operators sit
//! before their prefixes (`<<=` before `<<` before `<`), keywords before the
//! identifier catch-all, and the whitespace/comment metas come first.

use gdsc_core::{BytecodeProvider, TokenKind, Variant};

use crate::CompileError;

use super::cursor::SourceCursor;
use super::{Lexeme, Operand};

/// One lexical shape. Implementations either consume input and produce a
/// lexeme, decline without consuming anything, or fail the whole scan.
pub trait Matcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError>;
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Longest run of word characters at the cursor, if it starts one.
fn word_at<'a>(cursor: &SourceCursor<'a>) -> Option<&'a str> {
    let rest = cursor.rest();
    if !rest.chars().next().is_some_and(is_word_start) {
        return None;
    }
    let end = rest
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(rest.len(), |(i, _)| i);
    Some(&rest[..end])
}

/// Insignificant spacing, recorded as a meta lexeme and stripped later.
pub struct WhitespaceMatcher {
    text: &'static str,
}

impl WhitespaceMatcher {
    pub fn new(text: &'static str) -> Self {
        Self { text }
    }
}

impl Matcher for WhitespaceMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        if !cursor.starts_with(self.text) {
            return Ok(None);
        }
        let line = cursor.line();
        cursor.advance(self.text.len());
        Ok(Some(Lexeme::meta(line)))
    }
}

/// `#` comment running to end of line. The newline stays for the
/// [`NewlineMatcher`].
pub struct CommentMatcher;

impl Matcher for CommentMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        if cursor.peek() != Some('#') {
            return Ok(None);
        }
        let line = cursor.line();
        let rest = cursor.rest();
        let end = rest.find('\n').unwrap_or(rest.len());
        cursor.advance(end);
        Ok(Some(Lexeme::meta(line)))
    }
}

pub struct NewlineMatcher;

impl Matcher for NewlineMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        let len = if cursor.starts_with("\r\n") {
            2
        } else if cursor.starts_with("\n") {
            1
        } else {
            return Ok(None);
        };
        // The newline token carries the line it terminates.
        let line = cursor.line();
        cursor.advance(len);
        Ok(Some(Lexeme::plain(TokenKind::Newline, line)))
    }
}

/// Fixed word with a word-boundary check, so `in` never fires inside `int`.
pub struct KeywordMatcher {
    kind: TokenKind,
}

impl Matcher for KeywordMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        let Some(text) = self.kind.static_text() else {
            return Ok(None);
        };
        if !cursor.starts_with(text) || cursor.char_at(text.len()).is_some_and(is_word_char) {
            return Ok(None);
        }
        let line = cursor.line();
        cursor.advance(text.len());
        Ok(Some(Lexeme::plain(self.kind, line)))
    }
}

/// Fixed punctuation or operator text, matched byte-for-byte.
pub struct SymbolMatcher {
    kind: TokenKind,
}

impl Matcher for SymbolMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        let Some(text) = self.kind.static_text() else {
            return Ok(None);
        };
        if !cursor.starts_with(text) {
            return Ok(None);
        }
        let line = cursor.line();
        cursor.advance(text.len());
        Ok(Some(Lexeme::plain(self.kind, line)))
    }
}

/// Lone `_`, only when not the start of a longer identifier.
pub struct WildcardMatcher;

impl Matcher for WildcardMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        if cursor.peek() != Some('_') || cursor.char_at(1).is_some_and(is_word_char) {
            return Ok(None);
        }
        let line = cursor.line();
        cursor.advance(1);
        Ok(Some(Lexeme::plain(TokenKind::Wildcard, line)))
    }
}

/// `@name`. The stored identifier keeps its `@` so reconstruction is a
/// plain table lookup.
pub struct AnnotationMatcher;

impl Matcher for AnnotationMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        if cursor.peek() != Some('@') || !cursor.char_at(1).is_some_and(is_word_start) {
            return Ok(None);
        }
        let line = cursor.line();
        cursor.advance(1);
        let word = word_at(cursor).unwrap_or_default();
        let text = format!("@{word}");
        cursor.advance(word.len());
        Ok(Some(Lexeme::with_operand(
            TokenKind::Annotation,
            Operand::Ident(text),
            line,
        )))
    }
}

/// Numeric and string literals.
pub struct ConstantMatcher;

impl Matcher for ConstantMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        match cursor.peek() {
            Some('"') | Some('\'') => match_string(cursor),
            Some(c) if c.is_ascii_digit() => match_number(cursor),
            _ => Ok(None),
        }
    }
}

fn match_string(cursor: &mut SourceCursor<'_>) -> Result<Option<Lexeme>, CompileError> {
    let line = cursor.line();
    let rest = cursor.rest();
    let mut chars = rest.char_indices();
    let Some((_, quote)) = chars.next() else {
        return Ok(None);
    };

    let mut value = String::new();
    while let Some((i, c)) = chars.next() {
        match c {
            c if c == quote => {
                cursor.advance(i + quote.len_utf8());
                return Ok(Some(Lexeme::with_operand(
                    TokenKind::Constant,
                    Operand::Const(Variant::String(value)),
                    line,
                )));
            }
            '\n' => break,
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, esc)) => value.push(esc),
                None => break,
            },
            c => value.push(c),
        }
    }
    // Unterminated string.
    Err(CompileError::Lex { line })
}

fn match_number(cursor: &mut SourceCursor<'_>) -> Result<Option<Lexeme>, CompileError> {
    let line = cursor.line();
    let rest = cursor.rest();

    if rest.starts_with("0x") || rest.starts_with("0X") {
        let digits_end = rest[2..]
            .find(|c: char| !c.is_ascii_hexdigit())
            .map_or(rest.len(), |i| i + 2);
        let digits = &rest[2..digits_end];
        if digits.is_empty() {
            return Err(CompileError::Lex { line });
        }
        let value = i64::from_str_radix(digits, 16).map_err(|_| CompileError::Lex { line })?;
        cursor.advance(digits_end);
        return Ok(Some(Lexeme::with_operand(
            TokenKind::Constant,
            Operand::Const(int_variant(value)),
            line,
        )));
    }

    let mut end = digit_run_end(rest, 0);
    let mut is_float = false;

    // Fractional part only when a digit follows the dot; a bare `.` after
    // digits is member access on an integer literal.
    if rest[end..].starts_with('.')
        && rest[end + 1..].chars().next().is_some_and(|c| c.is_ascii_digit())
    {
        is_float = true;
        end = digit_run_end(rest, end + 1);
    }
    if let Some(exp) = exponent_end(rest, end) {
        is_float = true;
        end = exp;
    }

    let literal = &rest[..end];
    let lexeme = if is_float {
        let value: f64 = literal.parse().map_err(|_| CompileError::Lex { line })?;
        Lexeme::with_operand(TokenKind::Constant, Operand::Const(Variant::Float64(value)), line)
    } else {
        let value: i64 = literal.parse().map_err(|_| CompileError::Lex { line })?;
        Lexeme::with_operand(TokenKind::Constant, Operand::Const(int_variant(value)), line)
    };
    cursor.advance(end);
    Ok(Some(lexeme))
}

fn digit_run_end(s: &str, from: usize) -> usize {
    s[from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| from + i)
}

/// End of an `e[+-]?digits` exponent starting at `from`, if one is there.
fn exponent_end(s: &str, from: usize) -> Option<usize> {
    let tail = &s[from..];
    if !tail.starts_with('e') && !tail.starts_with('E') {
        return None;
    }
    let sign = match tail[1..].chars().next() {
        Some('+') | Some('-') => 1,
        _ => 0,
    };
    let digits = digit_run_end(tail, 1 + sign) - (1 + sign);
    if digits == 0 {
        return None;
    }
    Some(from + 1 + sign + digits)
}

/// Narrowest integer variant that holds the value.
fn int_variant(value: i64) -> Variant {
    if let Ok(v) = i32::try_from(value) {
        Variant::Int32(v)
    } else {
        Variant::Int64(value)
    }
}

/// Word found in one of the provider's built-in name lists; the operand is
/// the list index.
pub struct BuiltInMatcher {
    kind: TokenKind,
}

impl BuiltInMatcher {
    pub fn types() -> Self {
        Self { kind: TokenKind::BuiltInType }
    }

    pub fn funcs() -> Self {
        Self { kind: TokenKind::BuiltInFunc }
    }
}

impl Matcher for BuiltInMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        let Some(word) = word_at(cursor) else {
            return Ok(None);
        };
        let list = match self.kind {
            TokenKind::BuiltInType => provider.builtin_types(),
            _ => provider.builtin_funcs(),
        };
        let Some(index) = list.iter().position(|n| n == word) else {
            return Ok(None);
        };
        let line = cursor.line();
        cursor.advance(word.len());
        Ok(Some(Lexeme::with_operand(
            self.kind,
            Operand::Index(index as u32),
            line,
        )))
    }
}

/// Catch-all word matcher; must stay last in the list.
pub struct IdentifierMatcher;

impl Matcher for IdentifierMatcher {
    fn try_match(
        &self,
        cursor: &mut SourceCursor<'_>,
        _provider: &BytecodeProvider,
    ) -> Result<Option<Lexeme>, CompileError> {
        let Some(word) = word_at(cursor) else {
            return Ok(None);
        };
        let line = cursor.line();
        let text = word.to_owned();
        cursor.advance(text.len());
        Ok(Some(Lexeme::with_operand(
            TokenKind::Identifier,
            Operand::Ident(text),
            line,
        )))
    }
}

fn kw(kind: TokenKind) -> Box<dyn Matcher> {
    Box::new(KeywordMatcher { kind })
}

fn sym(kind: TokenKind) -> Box<dyn Matcher> {
    Box::new(SymbolMatcher { kind })
}

/// Build the full matcher list in dispatch order.
pub fn matcher_set() -> Vec<Box<dyn Matcher>> {
    use TokenKind::*;
    vec![
        Box::new(WhitespaceMatcher::new(" ")),
        Box::new(WhitespaceMatcher::new("\t")),
        Box::new(CommentMatcher),
        Box::new(NewlineMatcher),
        kw(CfIf),
        kw(CfElif),
        kw(CfElse),
        kw(CfFor),
        kw(CfWhile),
        kw(CfBreak),
        kw(CfContinue),
        kw(CfPass),
        kw(CfReturn),
        kw(CfMatch),
        kw(PrFunction),
        kw(PrClassName),
        kw(PrClass),
        kw(PrExtends),
        kw(PrOnready),
        kw(PrTool),
        kw(PrStatic),
        kw(PrExport),
        kw(PrSetget),
        kw(PrConst),
        kw(PrVar),
        kw(PrVoid),
        kw(PrEnum),
        kw(PrPreload),
        kw(PrAssert),
        kw(PrYield),
        kw(PrSignal),
        kw(PrBreakpoint),
        kw(PrRemotesync),
        kw(PrMastersync),
        kw(PrPuppetsync),
        kw(PrRemote),
        kw(PrSync),
        kw(PrMaster),
        kw(PrSlave),
        kw(PrPuppet),
        kw(PrAs),
        kw(PrIs),
        kw(SelfKw),
        kw(OpIn),
        Box::new(WildcardMatcher),
        sym(Comma),
        sym(Semicolon),
        sym(Period),
        sym(QuestionMark),
        sym(Colon),
        sym(Dollar),
        sym(ForwardArrow),
        sym(OpAssignAdd),
        sym(OpAssignSub),
        sym(OpAssignMul),
        sym(OpAssignDiv),
        sym(OpAssignMod),
        sym(OpAssignShiftLeft),
        sym(OpAssignShiftRight),
        sym(OpShiftLeft),
        sym(OpShiftRight),
        sym(OpAssignBitAnd),
        sym(OpAssignBitOr),
        sym(OpAssignBitXor),
        sym(OpEqual),
        sym(OpNotEqual),
        sym(OpLessEqual),
        sym(OpLess),
        sym(OpGreaterEqual),
        sym(OpGreater),
        kw(OpAnd),
        kw(OpOr),
        kw(OpNot),
        sym(OpAdd),
        sym(OpSub),
        sym(OpMul),
        sym(OpDiv),
        sym(OpMod),
        sym(OpBitAnd),
        sym(OpBitOr),
        sym(OpBitXor),
        sym(OpBitInvert),
        sym(OpAssign),
        sym(BracketOpen),
        sym(BracketClose),
        sym(CurlyBracketOpen),
        sym(CurlyBracketClose),
        sym(ParenthesisOpen),
        sym(ParenthesisClose),
        kw(ConstPi),
        kw(ConstTau),
        kw(ConstInf),
        kw(ConstNan),
        Box::new(AnnotationMatcher),
        Box::new(ConstantMatcher),
        Box::new(BuiltInMatcher::types()),
        Box::new(BuiltInMatcher::funcs()),
        Box::new(IdentifierMatcher),
    ]
}
