//! The closed catalogs of database types typecat knows about.
//!
//! There are two catalogs:
//! - [`BuiltinType`]: types that ship with Postgres (or one of its contrib
//!   extensions) and that the native registry can represent.
//! - [`CustomType`]: types installed by us into [`CUSTOM_TYPE_SCHEMA`].
//!
//! Every entry has a stable string id, which is what `format_type` prints for
//! it on a live database. Custom ids are schema-qualified once, when the
//! catalog is first touched, and are never seen unqualified afterwards.

use indexmap::IndexSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Schema that holds our custom types.
pub const CUSTOM_TYPE_SCHEMA: &str = "mathesar_types";

/// Which catalog a [`TypeIdentity`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    BuiltIn,
    Custom,
}

/// Built-in Postgres types.
///
/// XML is intentionally absent: the native registry has no class for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinType {
    /// `_array`, the catalog's name for the generic array pseudo-entry.
    Array,
    BigInt,
    BitVarying,
    Bit,
    Boolean,
    Bytea,
    /// `"char"`, the single-byte internal type (not `character`).
    Char,
    CharacterVarying,
    Character,
    Cidr,
    Date,
    DateRange,
    DoublePrecision,
    Float,
    Hstore,
    Inet,
    Int4Range,
    Int8Range,
    Integer,
    Interval,
    Json,
    Jsonb,
    MacAddr,
    Money,
    Name,
    Numeric,
    NumRange,
    Oid,
    Real,
    RegClass,
    SmallInt,
    Text,
    Time,
    TimeWithTimeZone,
    TimeWithoutTimeZone,
    Timestamp,
    TimestampWithTimeZone,
    TimestampWithoutTimeZone,
    TsRange,
    TsTzRange,
    TsVector,
    Uuid,
}

impl BuiltinType {
    /// Every built-in type, in declaration order.
    pub const ALL: [BuiltinType; 42] = [
        BuiltinType::Array,
        BuiltinType::BigInt,
        BuiltinType::BitVarying,
        BuiltinType::Bit,
        BuiltinType::Boolean,
        BuiltinType::Bytea,
        BuiltinType::Char,
        BuiltinType::CharacterVarying,
        BuiltinType::Character,
        BuiltinType::Cidr,
        BuiltinType::Date,
        BuiltinType::DateRange,
        BuiltinType::DoublePrecision,
        BuiltinType::Float,
        BuiltinType::Hstore,
        BuiltinType::Inet,
        BuiltinType::Int4Range,
        BuiltinType::Int8Range,
        BuiltinType::Integer,
        BuiltinType::Interval,
        BuiltinType::Json,
        BuiltinType::Jsonb,
        BuiltinType::MacAddr,
        BuiltinType::Money,
        BuiltinType::Name,
        BuiltinType::Numeric,
        BuiltinType::NumRange,
        BuiltinType::Oid,
        BuiltinType::Real,
        BuiltinType::RegClass,
        BuiltinType::SmallInt,
        BuiltinType::Text,
        BuiltinType::Time,
        BuiltinType::TimeWithTimeZone,
        BuiltinType::TimeWithoutTimeZone,
        BuiltinType::Timestamp,
        BuiltinType::TimestampWithTimeZone,
        BuiltinType::TimestampWithoutTimeZone,
        BuiltinType::TsRange,
        BuiltinType::TsTzRange,
        BuiltinType::TsVector,
        BuiltinType::Uuid,
    ];

    /// The type id, as printed by `pg_catalog.format_type`.
    pub const fn id(self) -> &'static str {
        match self {
            BuiltinType::Array => "_array",
            BuiltinType::BigInt => "bigint",
            BuiltinType::BitVarying => "bit varying",
            BuiltinType::Bit => "bit",
            BuiltinType::Boolean => "boolean",
            BuiltinType::Bytea => "bytea",
            BuiltinType::Char => "\"char\"",
            BuiltinType::CharacterVarying => "character varying",
            BuiltinType::Character => "character",
            BuiltinType::Cidr => "cidr",
            BuiltinType::Date => "date",
            BuiltinType::DateRange => "daterange",
            BuiltinType::DoublePrecision => "double precision",
            BuiltinType::Float => "float",
            BuiltinType::Hstore => "hstore",
            BuiltinType::Inet => "inet",
            BuiltinType::Int4Range => "int4range",
            BuiltinType::Int8Range => "int8range",
            BuiltinType::Integer => "integer",
            BuiltinType::Interval => "interval",
            BuiltinType::Json => "json",
            BuiltinType::Jsonb => "jsonb",
            BuiltinType::MacAddr => "macaddr",
            BuiltinType::Money => "money",
            BuiltinType::Name => "name",
            BuiltinType::Numeric => "numeric",
            BuiltinType::NumRange => "numrange",
            BuiltinType::Oid => "oid",
            BuiltinType::Real => "real",
            BuiltinType::RegClass => "regclass",
            BuiltinType::SmallInt => "smallint",
            BuiltinType::Text => "text",
            BuiltinType::Time => "time",
            BuiltinType::TimeWithTimeZone => "time with time zone",
            BuiltinType::TimeWithoutTimeZone => "time without time zone",
            BuiltinType::Timestamp => "timestamp",
            BuiltinType::TimestampWithTimeZone => "timestamp with time zone",
            BuiltinType::TimestampWithoutTimeZone => "timestamp without time zone",
            BuiltinType::TsRange => "tsrange",
            BuiltinType::TsTzRange => "tstzrange",
            BuiltinType::TsVector => "tsvector",
            BuiltinType::Uuid => "uuid",
        }
    }

    /// Look up a built-in type by its id.
    pub fn from_id(id: &str) -> Option<BuiltinType> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

/// Custom types installed into [`CUSTOM_TYPE_SCHEMA`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CustomType {
    Email,
    MathesarMoney,
    MulticurrencyMoney,
    Uri,
}

/// Qualified ids, indexed by `CustomType as usize`.
static CUSTOM_TYPE_IDS: LazyLock<[String; 4]> = LazyLock::new(|| {
    CustomType::ALL.map(|t| crate::qualify_in_custom_schema(t.unqualified_name()))
});

impl CustomType {
    /// Every custom type, in declaration order.
    pub const ALL: [CustomType; 4] = [
        CustomType::Email,
        CustomType::MathesarMoney,
        CustomType::MulticurrencyMoney,
        CustomType::Uri,
    ];

    /// The name of the type inside [`CUSTOM_TYPE_SCHEMA`].
    pub const fn unqualified_name(self) -> &'static str {
        match self {
            CustomType::Email => "email",
            CustomType::MathesarMoney => "mathesar_money",
            CustomType::MulticurrencyMoney => "multicurrency_money",
            CustomType::Uri => "uri",
        }
    }

    /// The schema-qualified type id, e.g. `mathesar_types.email`.
    pub fn id(self) -> &'static str {
        &CUSTOM_TYPE_IDS[self as usize]
    }

    /// Look up a custom type by its qualified id.
    ///
    /// Unqualified names do not match: `email` is not `mathesar_types.email`.
    pub fn from_id(id: &str) -> Option<CustomType> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

/// A database type known to typecat, from either catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeIdentity {
    BuiltIn(BuiltinType),
    Custom(CustomType),
}

impl TypeIdentity {
    /// The stable id of this type.
    pub fn id(self) -> &'static str {
        match self {
            TypeIdentity::BuiltIn(t) => t.id(),
            TypeIdentity::Custom(t) => t.id(),
        }
    }

    pub fn catalog(self) -> Catalog {
        match self {
            TypeIdentity::BuiltIn(_) => Catalog::BuiltIn,
            TypeIdentity::Custom(_) => Catalog::Custom,
        }
    }
}

impl From<BuiltinType> for TypeIdentity {
    fn from(t: BuiltinType) -> Self {
        TypeIdentity::BuiltIn(t)
    }
}

impl From<CustomType> for TypeIdentity {
    fn from(t: CustomType) -> Self {
        TypeIdentity::Custom(t)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned by [`TypeIdentity::from_str`] for ids in neither catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type id: {0}")]
pub struct UnknownTypeId(pub String);

impl FromStr for TypeIdentity {
    type Err = UnknownTypeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_by_id(s).ok_or_else(|| UnknownTypeId(s.to_string()))
    }
}

static ALL_BUILTIN: LazyLock<IndexSet<TypeIdentity>> =
    LazyLock::new(|| BuiltinType::ALL.into_iter().map(TypeIdentity::from).collect());

static ALL_CUSTOM: LazyLock<IndexSet<TypeIdentity>> =
    LazyLock::new(|| CustomType::ALL.into_iter().map(TypeIdentity::from).collect());

static ALL_KNOWN: LazyLock<IndexSet<TypeIdentity>> = LazyLock::new(|| {
    all_builtin()
        .iter()
        .chain(all_custom().iter())
        .copied()
        .collect()
});

/// Every built-in type.
pub fn all_builtin() -> &'static IndexSet<TypeIdentity> {
    &ALL_BUILTIN
}

/// Every custom type.
pub fn all_custom() -> &'static IndexSet<TypeIdentity> {
    &ALL_CUSTOM
}

/// Every known type: built-ins first, then custom types.
pub fn all_known() -> &'static IndexSet<TypeIdentity> {
    &ALL_KNOWN
}

/// Resolve a type id to a known type, trying built-ins before custom types.
///
/// Returns `None` for anything else; reflecting an arbitrary schema routinely
/// turns up ids we don't know, so this is not an error.
pub fn resolve_by_id(id: &str) -> Option<TypeIdentity> {
    BuiltinType::from_id(id)
        .map(TypeIdentity::BuiltIn)
        .or_else(|| CustomType::from_id(id).map(TypeIdentity::Custom))
}
