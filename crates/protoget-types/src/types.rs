//! Type identities and the structural data behind them.

/// Handle to an interned type.
///
/// Basic types and a few shapes the resolver needs are pre-registered at
/// fixed ids; everything else is allocated on first use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// A type the resolver could not determine. Never recorded for an
    /// expression; only appears inside composite types (e.g. a field whose
    /// type names an unknown package member).
    pub const UNKNOWN: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const INT8: TypeId = TypeId(3);
    pub const INT16: TypeId = TypeId(4);
    pub const INT32: TypeId = TypeId(5);
    pub const INT64: TypeId = TypeId(6);
    pub const UINT: TypeId = TypeId(7);
    pub const UINT8: TypeId = TypeId(8);
    pub const UINT16: TypeId = TypeId(9);
    pub const UINT32: TypeId = TypeId(10);
    pub const UINT64: TypeId = TypeId(11);
    pub const FLOAT32: TypeId = TypeId(12);
    pub const FLOAT64: TypeId = TypeId(13);
    pub const STRING: TypeId = TypeId(14);
    /// `func()`
    pub const EMPTY_SIGNATURE: TypeId = TypeId(15);
    /// The predeclared `error` interface.
    pub const ERROR: TypeId = TypeId(16);

    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Unknown,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
}

impl BasicKind {
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Unknown => "<unknown>",
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::String => "string",
        }
    }
}

/// A struct field. Embedded fields are named after their type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub name: String,
    pub type_id: TypeId,
    pub embedded: bool,
}

/// An interface method requirement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSig {
    pub name: String,
    /// A `TypeData::Signature`.
    pub signature: TypeId,
}

/// Structural type data. Everything except `Named` is interned, so two
/// structurally identical types share one `TypeId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Basic(BasicKind),
    Pointer(TypeId),
    Slice(TypeId),
    /// Array lengths are not tracked; `[3]T` and `[4]T` share one id.
    Array(TypeId),
    Map {
        key: TypeId,
        value: TypeId,
    },
    /// Channel direction is not tracked.
    Chan(TypeId),
    /// A variadic final parameter is recorded as a slice.
    Signature {
        params: Vec<TypeId>,
        results: Vec<TypeId>,
    },
    Struct(Vec<FieldInfo>),
    /// Methods sorted by name.
    Interface(Vec<MethodSig>),
    /// Index into the named type table.
    Named(u32),
}

/// A method declared on a named type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub signature: TypeId,
    /// `func (x *T) M()` rather than `func (x T) M()`.
    pub pointer_receiver: bool,
}

/// A declared (defined) type: `type Name Underlying`.
#[derive(Clone, Debug)]
pub struct NamedTypeInfo {
    pub package: String,
    pub name: String,
    pub underlying: TypeId,
    pub methods: Vec<MethodInfo>,
}
