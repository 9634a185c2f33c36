//! Postgres column type catalog and resolution.
//!
//! This crate answers three questions about database column types:
//! - What types does the engine support at all? See [`all_known`] and the
//!   [`quirks`] classification.
//! - What types exist on *this* database right now? See
//!   [`Engine::available_known_types`].
//! - Given a native type class from reflection, which known type is it? See
//!   [`Engine::identity_for_native_class`].
//!
//! # Type ids
//!
//! Every type has a stable string id, exactly as `pg_catalog.format_type`
//! prints it: `numeric`, `timestamp with time zone`, `"char"`. Our custom
//! types are always schema-qualified (`mathesar_types.email`); that qualified
//! form is the only one that should ever be persisted.
//!
//! # Example
//!
//! ```ignore
//! use typecat::{Engine, BuiltinType, create_pool};
//!
//! let pool = create_pool("postgres://localhost/mathesar", 4)?;
//! let engine = Engine::new(pool);
//!
//! // One query, then in-memory checks.
//! let installed = engine.installed_type_ids().await?;
//! let has_hstore = engine
//!     .is_available(BuiltinType::Hstore.into(), Some(&installed))
//!     .await?;
//! ```

mod available;
pub mod catalog;
mod engine;
mod error;
pub mod native;
mod pool;
pub mod quirks;
mod traced;

pub use available::{INSTALLED_TYPES_SQL, InstalledTypeIds, is_installed, known_types_in};
pub use catalog::{
    BuiltinType, CUSTOM_TYPE_SCHEMA, Catalog, CustomType, TypeIdentity, UnknownTypeId,
    all_builtin, all_custom, all_known, resolve_by_id,
};
pub use engine::Engine;
pub use error::Error;
pub use native::{
    Dialect, InstantiateError, NativeClass, NativeInstance, NativeRef, TypeOption, TypeOptions,
};
pub use pool::{ConnectionProvider, create_pool};
pub use quirks::{Quirks, quirks_of};
pub use traced::{Connection, ConnectionExt, TracedConn};

// Re-export quoting so callers qualifying other objects use the same rules.
pub use typecat_sql::{qualify, quote_ident, quote_ident_if_needed};

/// Result type for typecat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Qualify `name` into [`CUSTOM_TYPE_SCHEMA`].
///
/// Custom type ids are built this way; so are ids for other objects we
/// install alongside them, such as helper functions.
pub fn qualify_in_custom_schema(name: &str) -> String {
    qualify(name, CUSTOM_TYPE_SCHEMA)
}
