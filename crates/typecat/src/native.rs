//! Native type classes and the dialect registry that maps type ids to them.
//!
//! A [`NativeClass`] describes a type the engine can represent: which
//! constructor options it takes and how an instance renders as SQL. A
//! [`NativeInstance`] is a class plus concrete options, e.g. `NUMERIC` with
//! `precision = 10, scale = 2`.
//!
//! The [`Dialect`] registry is ordered. Canonical ids are registered before
//! their aliases, so scanning it for a class finds the canonical id first.

use crate::catalog::{BuiltinType, CustomType};
use indexmap::IndexMap;
use std::fmt;

/// A constructor option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOption {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl TypeOption {
    fn kind(&self) -> OptionKind {
        match self {
            TypeOption::Int(_) => OptionKind::Int,
            TypeOption::Bool(_) => OptionKind::Bool,
            TypeOption::Text(_) => OptionKind::Text,
        }
    }

    /// Parse a command-line style value: integers, then booleans, then text.
    pub fn parse(s: &str) -> TypeOption {
        if let Ok(n) = s.parse::<i64>() {
            TypeOption::Int(n)
        } else if let Ok(b) = s.parse::<bool>() {
            TypeOption::Bool(b)
        } else {
            TypeOption::Text(s.to_string())
        }
    }
}

impl From<i64> for TypeOption {
    fn from(n: i64) -> Self {
        TypeOption::Int(n)
    }
}

impl From<i32> for TypeOption {
    fn from(n: i32) -> Self {
        TypeOption::Int(n.into())
    }
}

impl From<bool> for TypeOption {
    fn from(b: bool) -> Self {
        TypeOption::Bool(b)
    }
}

impl From<&str> for TypeOption {
    fn from(s: &str) -> Self {
        TypeOption::Text(s.to_string())
    }
}

impl From<String> for TypeOption {
    fn from(s: String) -> Self {
        TypeOption::Text(s)
    }
}

impl fmt::Display for TypeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeOption::Int(n) => write!(f, "{n}"),
            TypeOption::Bool(b) => write!(f, "{b}"),
            TypeOption::Text(s) => f.write_str(s),
        }
    }
}

/// Constructor options, keyed by option name.
pub type TypeOptions = IndexMap<String, TypeOption>;

/// The kind of value an option expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Int,
    Bool,
    Text,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Int => f.write_str("integer"),
            OptionKind::Bool => f.write_str("boolean"),
            OptionKind::Text => f.write_str("text"),
        }
    }
}

/// Why a class could not be instantiated with a set of options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstantiateError {
    /// The class does not take this option at all.
    #[error("{class} takes no option named {option}")]
    UnexpectedOption { class: &'static str, option: String },

    /// A required option was not given.
    #[error("{class} requires option {option}")]
    MissingOption {
        class: &'static str,
        option: &'static str,
    },

    /// An option was given a value of the wrong kind.
    #[error("{class} option {option} must be {expected}")]
    InvalidOption {
        class: &'static str,
        option: String,
        expected: OptionKind,
    },
}

/// How an instance of a class renders as SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Render {
    /// Base SQL, then the given options in declaration order as a
    /// parenthesized list, stopping at the first one missing.
    Args,
    /// Base SQL, optional `(precision)`, then a fixed suffix.
    Temporal { suffix: &'static str },
    /// `INTERVAL`, optional fields, optional `(precision)`.
    Interval,
    /// `BIT` or `BIT VARYING`, optional `(length)`.
    Bit,
    /// `<item_type>[]`.
    Array,
    /// The base SQL is a name in the custom type schema.
    Custom,
}

/// A type the engine knows how to represent.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct NativeClass {
    name: &'static str,
    sql: &'static str,
    accepts: &'static [(&'static str, OptionKind)],
    requires: &'static [&'static str],
    render: Render,
}

impl NativeClass {
    const fn plain(name: &'static str, sql: &'static str) -> Self {
        Self {
            name,
            sql,
            accepts: &[],
            requires: &[],
            render: Render::Args,
        }
    }

    const fn with_args(
        name: &'static str,
        sql: &'static str,
        accepts: &'static [(&'static str, OptionKind)],
    ) -> Self {
        Self {
            name,
            sql,
            accepts,
            requires: &[],
            render: Render::Args,
        }
    }

    const fn temporal(name: &'static str, sql: &'static str, suffix: &'static str) -> Self {
        Self {
            name,
            sql,
            accepts: &[("precision", OptionKind::Int)],
            requires: &[],
            render: Render::Temporal { suffix },
        }
    }

    const fn custom(name: &'static str, unqualified: &'static str) -> Self {
        Self {
            name,
            sql: unqualified,
            accepts: &[],
            requires: &[],
            render: Render::Custom,
        }
    }

    /// Class name, unique among classes.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the options this class accepts.
    pub fn option_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accepts.iter().map(|(name, _)| *name)
    }

    /// Build an instance with the given options.
    ///
    /// Fails if an option is unknown to the class, has the wrong kind of
    /// value, or a required option is absent.
    pub fn instantiate(
        &'static self,
        options: &TypeOptions,
    ) -> Result<NativeInstance, InstantiateError> {
        for (option, value) in options {
            let accepted = self.accepts.iter().find(|(name, _)| *name == option.as_str());
            let Some((_, expected)) = accepted else {
                return Err(InstantiateError::UnexpectedOption {
                    class: self.name,
                    option: option.clone(),
                });
            };
            if value.kind() != *expected {
                return Err(InstantiateError::InvalidOption {
                    class: self.name,
                    option: option.clone(),
                    expected: *expected,
                });
            }
        }
        if let Some(missing) = self.requires.iter().find(|r| !options.contains_key(**r)) {
            return Err(InstantiateError::MissingOption {
                class: self.name,
                option: *missing,
            });
        }
        Ok(NativeInstance {
            class: self,
            options: options.clone(),
        })
    }
}

impl fmt::Display for NativeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A native class with concrete constructor options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeInstance {
    class: &'static NativeClass,
    options: TypeOptions,
}

impl NativeInstance {
    pub fn class(&self) -> &'static NativeClass {
        self.class
    }

    /// Render this instance as SQL type text, e.g. `NUMERIC(10, 2)`.
    pub fn compile(&self) -> String {
        let class = self.class;
        let paren = |option: &str| {
            self.options
                .get(option)
                .map(|v| format!("({v})"))
                .unwrap_or_default()
        };
        match class.render {
            Render::Args => {
                let args: Vec<String> = class
                    .accepts
                    .iter()
                    .map_while(|(name, _)| self.options.get(*name).map(|v| v.to_string()))
                    .collect();
                if args.is_empty() {
                    class.sql.to_string()
                } else {
                    format!("{}({})", class.sql, args.join(", "))
                }
            }
            Render::Temporal { suffix } => {
                format!("{}{}{}", class.sql, paren("precision"), suffix)
            }
            Render::Interval => {
                let mut sql = class.sql.to_string();
                if let Some(fields) = self.options.get("fields") {
                    sql.push(' ');
                    sql.push_str(&fields.to_string().to_uppercase());
                }
                sql.push_str(&paren("precision"));
                sql
            }
            Render::Bit => {
                let varying = matches!(self.options.get("varying"), Some(TypeOption::Bool(true)));
                let base = if varying { "BIT VARYING" } else { class.sql };
                format!("{}{}", base, paren("length"))
            }
            Render::Array => {
                let item = self
                    .options
                    .get("item_type")
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                format!("{item}[]")
            }
            Render::Custom => crate::qualify_in_custom_schema(class.sql),
        }
    }
}

/// Either a class or an instance of one.
///
/// Reverse lookups only accept classes; this type lets callers hand over
/// whatever they hold and have an instance rejected loudly.
#[derive(Debug, Clone, Copy)]
pub enum NativeRef<'a> {
    Class(&'a NativeClass),
    Instance(&'a NativeInstance),
}

impl<'a> From<&'a NativeClass> for NativeRef<'a> {
    fn from(class: &'a NativeClass) -> Self {
        NativeRef::Class(class)
    }
}

impl<'a> From<&'a NativeInstance> for NativeRef<'a> {
    fn from(instance: &'a NativeInstance) -> Self {
        NativeRef::Instance(instance)
    }
}

/// The native classes of the Postgres dialect.
pub mod classes {
    use super::{NativeClass, OptionKind, Render};

    const LENGTH: &[(&str, OptionKind)] = &[("length", OptionKind::Int)];

    pub static ARRAY: NativeClass = NativeClass {
        name: "ARRAY",
        sql: "ARRAY",
        accepts: &[("item_type", OptionKind::Text)],
        requires: &["item_type"],
        render: Render::Array,
    };
    pub static BIGINT: NativeClass = NativeClass::plain("BIGINT", "BIGINT");
    pub static BIT: NativeClass = NativeClass {
        name: "BIT",
        sql: "BIT",
        accepts: &[("length", OptionKind::Int), ("varying", OptionKind::Bool)],
        requires: &[],
        render: Render::Bit,
    };
    pub static BOOLEAN: NativeClass = NativeClass::plain("BOOLEAN", "BOOLEAN");
    pub static BYTEA: NativeClass = NativeClass::plain("BYTEA", "BYTEA");
    pub static STRING: NativeClass = NativeClass::with_args("String", "VARCHAR", LENGTH);
    pub static VARCHAR: NativeClass =
        NativeClass::with_args("VARCHAR", "CHARACTER VARYING", LENGTH);
    pub static CHAR: NativeClass = NativeClass::with_args("CHAR", "CHARACTER", LENGTH);
    pub static CIDR: NativeClass = NativeClass::plain("CIDR", "CIDR");
    pub static DATE: NativeClass = NativeClass::plain("DATE", "DATE");
    pub static DATERANGE: NativeClass = NativeClass::plain("DATERANGE", "DATERANGE");
    pub static DOUBLE_PRECISION: NativeClass =
        NativeClass::plain("DOUBLE_PRECISION", "DOUBLE PRECISION");
    pub static HSTORE: NativeClass = NativeClass::plain("HSTORE", "HSTORE");
    pub static INET: NativeClass = NativeClass::plain("INET", "INET");
    pub static INT4RANGE: NativeClass = NativeClass::plain("INT4RANGE", "INT4RANGE");
    pub static INT8RANGE: NativeClass = NativeClass::plain("INT8RANGE", "INT8RANGE");
    pub static INTEGER: NativeClass = NativeClass::plain("INTEGER", "INTEGER");
    pub static INTERVAL: NativeClass = NativeClass {
        name: "INTERVAL",
        sql: "INTERVAL",
        accepts: &[("fields", OptionKind::Text), ("precision", OptionKind::Int)],
        requires: &[],
        render: Render::Interval,
    };
    pub static JSON: NativeClass = NativeClass::plain("JSON", "JSON");
    pub static JSONB: NativeClass = NativeClass::plain("JSONB", "JSONB");
    pub static MACADDR: NativeClass = NativeClass::plain("MACADDR", "MACADDR");
    pub static MONEY: NativeClass = NativeClass::plain("MONEY", "MONEY");
    pub static NUMERIC: NativeClass = NativeClass::with_args(
        "NUMERIC",
        "NUMERIC",
        &[("precision", OptionKind::Int), ("scale", OptionKind::Int)],
    );
    pub static NUMRANGE: NativeClass = NativeClass::plain("NUMRANGE", "NUMRANGE");
    pub static OID: NativeClass = NativeClass::plain("OID", "OID");
    pub static REAL: NativeClass = NativeClass::plain("REAL", "REAL");
    pub static REGCLASS: NativeClass = NativeClass::plain("REGCLASS", "REGCLASS");
    pub static SMALLINT: NativeClass = NativeClass::plain("SMALLINT", "SMALLINT");
    pub static TEXT: NativeClass = NativeClass::plain("TEXT", "TEXT");
    pub static TIME: NativeClass = NativeClass::temporal("TIME", "TIME", " WITHOUT TIME ZONE");
    pub static TIMETZ: NativeClass = NativeClass::temporal("TIMETZ", "TIME", " WITH TIME ZONE");
    pub static TIMESTAMP: NativeClass =
        NativeClass::temporal("TIMESTAMP", "TIMESTAMP", " WITHOUT TIME ZONE");
    pub static TIMESTAMPTZ: NativeClass =
        NativeClass::temporal("TIMESTAMPTZ", "TIMESTAMP", " WITH TIME ZONE");
    pub static TSRANGE: NativeClass = NativeClass::plain("TSRANGE", "TSRANGE");
    pub static TSTZRANGE: NativeClass = NativeClass::plain("TSTZRANGE", "TSTZRANGE");
    pub static TSVECTOR: NativeClass = NativeClass::plain("TSVECTOR", "TSVECTOR");
    pub static UUID: NativeClass = NativeClass::plain("UUID", "UUID");

    pub static EMAIL: NativeClass = NativeClass::custom("Email", "email");
    pub static MATHESAR_MONEY: NativeClass =
        NativeClass::custom("MathesarMoney", "mathesar_money");
    pub static MULTICURRENCY_MONEY: NativeClass =
        NativeClass::custom("MulticurrencyMoney", "multicurrency_money");
    pub static URI: NativeClass = NativeClass::custom("URI", "uri");
}

/// A database engine's registry of native type classes, keyed by type id.
#[derive(Debug, Clone)]
pub struct Dialect {
    name: &'static str,
    registry: IndexMap<String, &'static NativeClass>,
}

impl Dialect {
    /// A dialect with nothing registered.
    pub fn empty(name: &'static str) -> Self {
        Self {
            name,
            registry: IndexMap::new(),
        }
    }

    /// The Postgres dialect, with every built-in and custom type registered.
    pub fn postgres() -> Self {
        use classes::*;

        let mut dialect = Self::empty("postgresql");

        // Canonical ids first: reverse lookups return the first match.
        let canonical: [(BuiltinType, &'static NativeClass); 36] = [
            (BuiltinType::Array, &ARRAY),
            (BuiltinType::BigInt, &BIGINT),
            (BuiltinType::Bit, &BIT),
            (BuiltinType::Boolean, &BOOLEAN),
            (BuiltinType::Bytea, &BYTEA),
            (BuiltinType::CharacterVarying, &VARCHAR),
            (BuiltinType::Character, &CHAR),
            (BuiltinType::Cidr, &CIDR),
            (BuiltinType::Date, &DATE),
            (BuiltinType::DateRange, &DATERANGE),
            (BuiltinType::DoublePrecision, &DOUBLE_PRECISION),
            (BuiltinType::Hstore, &HSTORE),
            (BuiltinType::Inet, &INET),
            (BuiltinType::Int4Range, &INT4RANGE),
            (BuiltinType::Int8Range, &INT8RANGE),
            (BuiltinType::Integer, &INTEGER),
            (BuiltinType::Interval, &INTERVAL),
            (BuiltinType::Json, &JSON),
            (BuiltinType::Jsonb, &JSONB),
            (BuiltinType::MacAddr, &MACADDR),
            (BuiltinType::Money, &MONEY),
            (BuiltinType::Numeric, &NUMERIC),
            (BuiltinType::NumRange, &NUMRANGE),
            (BuiltinType::Oid, &OID),
            (BuiltinType::Real, &REAL),
            (BuiltinType::RegClass, &REGCLASS),
            (BuiltinType::SmallInt, &SMALLINT),
            (BuiltinType::Text, &TEXT),
            (BuiltinType::TimeWithoutTimeZone, &TIME),
            (BuiltinType::TimeWithTimeZone, &TIMETZ),
            (BuiltinType::TimestampWithoutTimeZone, &TIMESTAMP),
            (BuiltinType::TimestampWithTimeZone, &TIMESTAMPTZ),
            (BuiltinType::TsRange, &TSRANGE),
            (BuiltinType::TsTzRange, &TSTZRANGE),
            (BuiltinType::TsVector, &TSVECTOR),
            (BuiltinType::Uuid, &UUID),
        ];
        let shared: [(BuiltinType, &'static NativeClass); 6] = [
            (BuiltinType::BitVarying, &BIT),
            (BuiltinType::Char, &STRING),
            (BuiltinType::Name, &STRING),
            (BuiltinType::Float, &DOUBLE_PRECISION),
            (BuiltinType::Time, &TIME),
            (BuiltinType::Timestamp, &TIMESTAMP),
        ];
        for (t, class) in canonical.into_iter().chain(shared) {
            dialect.register(t.id(), class);
        }

        let custom: [(CustomType, &'static NativeClass); 4] = [
            (CustomType::Email, &EMAIL),
            (CustomType::MathesarMoney, &MATHESAR_MONEY),
            (CustomType::MulticurrencyMoney, &MULTICURRENCY_MONEY),
            (CustomType::Uri, &URI),
        ];
        for (t, class) in custom {
            dialect.register(t.id(), class);
        }

        dialect
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register `class` under `id`, returning the class it replaces.
    ///
    /// A replaced id keeps its original position in the registry.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        class: &'static NativeClass,
    ) -> Option<&'static NativeClass> {
        self.registry.insert(id.into(), class)
    }

    /// The class registered under `id`.
    pub fn get(&self, id: &str) -> Option<&'static NativeClass> {
        self.registry.get(id).copied()
    }

    /// All registrations, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static NativeClass)> + '_ {
        self.registry.iter().map(|(id, class)| (id.as_str(), *class))
    }

    /// The first id registered for `class`.
    ///
    /// This is a linear scan. The registry is a few dozen entries and this
    /// only runs on reflection paths, so there is no reverse index.
    pub fn id_of(&self, class: &NativeClass) -> Option<&str> {
        self.iter()
            .find(|(_, registered)| *registered == class)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::postgres()
    }
}
