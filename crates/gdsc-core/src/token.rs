//! Token model shared by the compiler and decompiler pipelines.
//!
//! `TokenKind` is the closed set of lexical categories the engine's
//! tokenizer produces. The numeric ordinal a kind maps to on disk is *not*
//! stored here — it varies per bytecode release and comes from the
//! [`BytecodeProvider`](crate::BytecodeProvider) supplied to each run.

/// Lexical category of a token.
///
/// Covers the engine's full token set: operators, control-flow and
/// declaration keywords, punctuation, named constants, and the payload
/// carriers (`Identifier`, `Constant`, `BuiltInType`, `BuiltInFunc`,
/// `Annotation`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    /// Sentinel appended after `Eof`; carries nothing.
    Empty,
    Identifier,
    Constant,
    SelfKw,
    BuiltInType,
    BuiltInFunc,
    OpIn,
    OpEqual,
    OpNotEqual,
    OpLess,
    OpLessEqual,
    OpGreater,
    OpGreaterEqual,
    OpAnd,
    OpOr,
    OpNot,
    OpAdd,
    OpSub,
    OpMul,
    OpDiv,
    OpMod,
    OpShiftLeft,
    OpShiftRight,
    OpAssign,
    OpAssignAdd,
    OpAssignSub,
    OpAssignMul,
    OpAssignDiv,
    OpAssignMod,
    OpAssignShiftLeft,
    OpAssignShiftRight,
    OpAssignBitAnd,
    OpAssignBitOr,
    OpAssignBitXor,
    OpBitAnd,
    OpBitOr,
    OpBitXor,
    OpBitInvert,
    CfIf,
    CfElif,
    CfElse,
    CfFor,
    CfWhile,
    CfBreak,
    CfContinue,
    CfPass,
    CfReturn,
    CfMatch,
    PrFunction,
    PrClass,
    PrClassName,
    PrExtends,
    PrIs,
    PrOnready,
    PrTool,
    PrStatic,
    PrExport,
    PrSetget,
    PrConst,
    PrVar,
    PrAs,
    PrVoid,
    PrEnum,
    PrPreload,
    PrAssert,
    PrYield,
    PrSignal,
    PrBreakpoint,
    PrRemote,
    PrSync,
    PrMaster,
    PrSlave,
    PrPuppet,
    PrRemotesync,
    PrMastersync,
    PrPuppetsync,
    BracketOpen,
    BracketClose,
    CurlyBracketOpen,
    CurlyBracketClose,
    ParenthesisOpen,
    ParenthesisClose,
    Comma,
    Semicolon,
    Period,
    QuestionMark,
    Colon,
    Dollar,
    ForwardArrow,
    Newline,
    ConstPi,
    ConstTau,
    Wildcard,
    ConstInf,
    ConstNan,
    Annotation,
    Error,
    Eof,
    Cursor,
}

impl TokenKind {
    /// Fixed source text for kinds whose spelling never varies.
    ///
    /// Returns `None` for payload carriers (identifiers, constants,
    /// built-ins, annotations) and for the structural kinds (`Newline`,
    /// `Eof`, `Empty`, `Error`, `Cursor`). This table is the single source
    /// of truth for both the matcher list and the source reconstructor.
    pub fn static_text(self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            SelfKw => "self",
            OpIn => "in",
            OpEqual => "==",
            OpNotEqual => "!=",
            OpLess => "<",
            OpLessEqual => "<=",
            OpGreater => ">",
            OpGreaterEqual => ">=",
            OpAnd => "and",
            OpOr => "or",
            OpNot => "not",
            OpAdd => "+",
            OpSub => "-",
            OpMul => "*",
            OpDiv => "/",
            OpMod => "%",
            OpShiftLeft => "<<",
            OpShiftRight => ">>",
            OpAssign => "=",
            OpAssignAdd => "+=",
            OpAssignSub => "-=",
            OpAssignMul => "*=",
            OpAssignDiv => "/=",
            OpAssignMod => "%=",
            OpAssignShiftLeft => "<<=",
            OpAssignShiftRight => ">>=",
            OpAssignBitAnd => "&=",
            OpAssignBitOr => "|=",
            OpAssignBitXor => "^=",
            OpBitAnd => "&",
            OpBitOr => "|",
            OpBitXor => "^",
            OpBitInvert => "!",
            CfIf => "if",
            CfElif => "elif",
            CfElse => "else",
            CfFor => "for",
            CfWhile => "while",
            CfBreak => "break",
            CfContinue => "continue",
            CfPass => "pass",
            CfReturn => "return",
            CfMatch => "match",
            PrFunction => "func",
            PrClass => "class",
            PrClassName => "class_name",
            PrExtends => "extends",
            PrIs => "is",
            PrOnready => "onready",
            PrTool => "tool",
            PrStatic => "static",
            PrExport => "export",
            PrSetget => "setget",
            PrConst => "const",
            PrVar => "var",
            PrAs => "as",
            PrVoid => "void",
            PrEnum => "enum",
            PrPreload => "preload",
            PrAssert => "assert",
            PrYield => "yield",
            PrSignal => "signal",
            PrBreakpoint => "breakpoint",
            PrRemote => "remote",
            PrSync => "sync",
            PrMaster => "master",
            PrSlave => "slave",
            PrPuppet => "puppet",
            PrRemotesync => "remotesync",
            PrMastersync => "mastersync",
            PrPuppetsync => "puppetsync",
            BracketOpen => "[",
            BracketClose => "]",
            CurlyBracketOpen => "{",
            CurlyBracketClose => "}",
            ParenthesisOpen => "(",
            ParenthesisClose => ")",
            Comma => ",",
            Semicolon => ";",
            Period => ".",
            QuestionMark => "?",
            Colon => ":",
            Dollar => "$",
            ForwardArrow => "->",
            ConstPi => "PI",
            ConstTau => "TAU",
            Wildcard => "_",
            ConstInf => "INF",
            ConstNan => "NAN",
            _ => return None,
        })
    }

    /// Whether the fixed spelling is a word (needs word-boundary matching
    /// and space separation from adjacent words).
    pub fn is_word(self) -> bool {
        self.static_text().is_some_and(|t| {
            t.chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        })
    }
}

/// Operand attached to a token, if any.
///
/// A closed union: payload carriers reference one of the interned tables
/// (or, for built-ins, the provider's name lists) by dense index; everything
/// else carries nothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TokenPayload {
    #[default]
    None,
    /// Index into the identifier table (also used by `Annotation`).
    Identifier(u32),
    /// Index into the constant pool.
    Constant(u32),
    /// Index into the provider's built-in type or function list.
    BuiltIn(u32),
}

impl TokenPayload {
    /// Raw value stored in the on-disk token cell (`cell >> 8`).
    pub fn raw(self) -> u32 {
        match self {
            TokenPayload::None => 0,
            TokenPayload::Identifier(i) | TokenPayload::Constant(i) | TokenPayload::BuiltIn(i) => i,
        }
    }
}

/// A single token in a compiled script's stream.
///
/// Immutable once produced. `line` and `column` are 1-based; `column` is
/// only populated when decoding the modern container format.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub payload: TokenPayload,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            payload: TokenPayload::None,
            line: 0,
            column: 0,
        }
    }

    pub fn with_payload(kind: TokenKind, payload: TokenPayload) -> Self {
        Self {
            kind,
            payload,
            line: 0,
            column: 0,
        }
    }
}
