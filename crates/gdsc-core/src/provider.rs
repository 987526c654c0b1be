//! Per-release bytecode descriptors.
//!
//! The on-disk ordinals for token kinds and constant types change between
//! engine releases, so the core never hard-codes them. Every compile or
//! decompile run receives a [`BytecodeProvider`] from the external version
//! catalog; [`ProviderSpec`] is the serde-friendly shape catalogs ship
//! descriptors in (JSON/YAML), and [`BytecodeProvider::reference`] builds
//! one known-good descriptor for tests and demos.

use std::collections::HashMap;

use crate::TokenKind;

/// Free-text metadata about a bytecode release.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ProviderData {
    /// Declared container format version; `>= 100` selects the modern
    /// compressed layout.
    pub bytecode_version: u32,
    /// Engine commit the tables were extracted from.
    #[serde(default)]
    pub commit_hash: String,
    #[serde(default)]
    pub description: String,
}

/// Raw descriptor as shipped by a version catalog.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProviderSpec {
    pub data: ProviderData,
    /// Token kind for each raw ordinal, dense from 0.
    pub token_kinds: Vec<TokenKind>,
    /// Constant type name for each raw type ordinal, dense from 0.
    pub type_names: Vec<String>,
    /// Built-in type names; `BuiltInType` payloads index this list.
    pub builtin_types: Vec<String>,
    /// Built-in function names; `BuiltInFunc` payloads index this list.
    pub builtin_funcs: Vec<String>,
}

/// Resolved descriptor with reverse lookups, supplied to every pipeline run.
#[derive(Debug, Clone)]
pub struct BytecodeProvider {
    data: ProviderData,
    token_kinds: Vec<TokenKind>,
    token_ordinals: HashMap<TokenKind, u32>,
    type_names: Vec<String>,
    type_ordinals: HashMap<String, u32>,
    builtin_types: Vec<String>,
    builtin_funcs: Vec<String>,
}

impl From<ProviderSpec> for BytecodeProvider {
    fn from(spec: ProviderSpec) -> Self {
        let token_ordinals = spec
            .token_kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| (k, i as u32))
            .collect();
        let type_ordinals = spec
            .type_names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i as u32))
            .collect();
        Self {
            data: spec.data,
            token_kinds: spec.token_kinds,
            token_ordinals,
            type_names: spec.type_names,
            type_ordinals,
            builtin_types: spec.builtin_types,
            builtin_funcs: spec.builtin_funcs,
        }
    }
}

impl BytecodeProvider {
    pub fn data(&self) -> &ProviderData {
        &self.data
    }

    pub fn bytecode_version(&self) -> u32 {
        self.data.bytecode_version
    }

    /// Token kind for a raw on-disk ordinal.
    pub fn token_kind(&self, ordinal: u32) -> Option<TokenKind> {
        self.token_kinds.get(ordinal as usize).copied()
    }

    /// Raw ordinal for a token kind.
    pub fn token_ordinal(&self, kind: TokenKind) -> Option<u32> {
        self.token_ordinals.get(&kind).copied()
    }

    /// Constant type name for a raw type ordinal (low byte of the tag).
    pub fn type_name(&self, ordinal: u32) -> Option<&str> {
        self.type_names.get(ordinal as usize).map(|s| s.as_str())
    }

    /// Raw type ordinal for a constant type name.
    pub fn type_ordinal(&self, name: &str) -> Option<u32> {
        self.type_ordinals.get(name).copied()
    }

    pub fn builtin_types(&self) -> &[String] {
        &self.builtin_types
    }

    pub fn builtin_funcs(&self) -> &[String] {
        &self.builtin_funcs
    }

    pub fn builtin_type_name(&self, index: u32) -> Option<&str> {
        self.builtin_types.get(index as usize).map(|s| s.as_str())
    }

    pub fn builtin_func_name(&self, index: u32) -> Option<&str> {
        self.builtin_funcs.get(index as usize).map(|s| s.as_str())
    }

    /// Known-good descriptor for tests and demos.
    ///
    /// Uses the classic 3.x token ordering with `Annotation` appended at the
    /// end. Real per-release descriptors come from the external catalog.
    pub fn reference(bytecode_version: u32) -> Self {
        ProviderSpec {
            data: ProviderData {
                bytecode_version,
                commit_hash: String::new(),
                description: "reference descriptor".to_owned(),
            },
            token_kinds: reference_token_kinds(),
            type_names: REFERENCE_TYPE_NAMES.iter().map(|s| (*s).to_owned()).collect(),
            builtin_types: REFERENCE_BUILTIN_TYPES.iter().map(|s| (*s).to_owned()).collect(),
            builtin_funcs: REFERENCE_BUILTIN_FUNCS.iter().map(|s| (*s).to_owned()).collect(),
        }
        .into()
    }
}

/// Classic token ordering: ordinal = position in this list.
fn reference_token_kinds() -> Vec<TokenKind> {
    use TokenKind::*;
    vec![
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
        Error,
        Eof,
        Cursor,
        Annotation,
    ]
}

const REFERENCE_TYPE_NAMES: &[&str] = &[
    "Nil",
    "bool",
    "int",
    "float",
    "String",
    "Vector2",
    "Rect2",
    "Vector3",
    "Transform2D",
    "Plane",
    "Quat",
    "AABB",
    "Basis",
    "Transform",
    "Color",
    "NodePath",
    "RID",
    "Object",
    "Dictionary",
    "Array",
];

const REFERENCE_BUILTIN_TYPES: &[&str] = &[
    "bool",
    "int",
    "float",
    "String",
    "Vector2",
    "Rect2",
    "Vector3",
    "Transform2D",
    "Plane",
    "Quat",
    "AABB",
    "Basis",
    "Transform",
    "Color",
    "NodePath",
    "RID",
    "Object",
    "Dictionary",
    "Array",
    "PoolByteArray",
    "PoolIntArray",
    "PoolRealArray",
    "PoolStringArray",
    "PoolVector2Array",
    "PoolVector3Array",
    "PoolColorArray",
];

const REFERENCE_BUILTIN_FUNCS: &[&str] = &[
    "sin",
    "cos",
    "tan",
    "sinh",
    "cosh",
    "tanh",
    "asin",
    "acos",
    "atan",
    "atan2",
    "sqrt",
    "fmod",
    "fposmod",
    "posmod",
    "floor",
    "ceil",
    "round",
    "abs",
    "sign",
    "pow",
    "log",
    "exp",
    "is_nan",
    "is_inf",
    "is_equal_approx",
    "is_zero_approx",
    "ease",
    "decimals",
    "step_decimals",
    "stepify",
    "lerp",
    "lerp_angle",
    "inverse_lerp",
    "range_lerp",
    "smoothstep",
    "move_toward",
    "dectime",
    "randomize",
    "randi",
    "randf",
    "rand_range",
    "seed",
    "rand_seed",
    "deg2rad",
    "rad2deg",
    "linear2db",
    "db2linear",
    "polar2cartesian",
    "cartesian2polar",
    "wrapi",
    "wrapf",
    "max",
    "min",
    "clamp",
    "nearest_po2",
    "weakref",
    "funcref",
    "convert",
    "typeof",
    "type_exists",
    "char",
    "ord",
    "str",
    "print",
    "printt",
    "prints",
    "printerr",
    "printraw",
    "print_debug",
    "push_error",
    "push_warning",
    "var2str",
    "str2var",
    "var2bytes",
    "bytes2var",
    "range",
    "load",
    "inst2dict",
    "dict2inst",
    "validate_json",
    "parse_json",
    "to_json",
    "hash",
    "Color8",
    "ColorN",
    "print_stack",
    "get_stack",
    "instance_from_id",
    "len",
    "is_instance_valid",
];
