//! Postgres identifier quoting and qualified naming.
//!
//! Two quoting styles are provided:
//! - [`quote_ident`] always quotes, which is what generated DDL wants.
//! - [`quote_ident_if_needed`] follows the Postgres convention of leaving
//!   plain lowercase identifiers bare, so qualified names come out the way
//!   `pg_catalog.format_type` prints them (`mathesar_types.email`, not
//!   `"mathesar_types"."email"`).

mod reserved;
pub use reserved::{COL_NAME_KEYWORDS, RESERVED_WORDS, is_reserved_word};

/// An identifier that always renders double-quoted, with embedded quotes
/// doubled.
///
/// ```
/// use typecat_sql::Ident;
/// assert_eq!(Ident("mathesar_types").to_string(), "\"mathesar_types\"");
/// assert_eq!(Ident("we\"ird").to_string(), "\"we\"\"ird\"");
/// ```
pub struct Ident<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> std::fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;

        f.write_char('"')?;
        for (i, part) in self.0.as_ref().split('"').enumerate() {
            if i > 0 {
                f.write_str("\"\"")?;
            }
            f.write_str(part)?;
        }
        f.write_char('"')
    }
}

/// Quote a PostgreSQL identifier.
///
/// Always quotes, doubling any embedded quotes. Use this when the text goes
/// straight into DDL and nobody compares it against catalog output.
pub fn quote_ident(name: &str) -> String {
    format!("{}", Ident(name))
}

/// Returns true if `name` cannot be used as a bare Postgres identifier.
///
/// Mirrors the server's `quote_identifier`: bare identifiers are folded to
/// lowercase, so anything with uppercase letters needs quotes to survive. So
/// do keywords other than unreserved ones, names starting with a digit or
/// `$`, and names with characters outside `[a-z0-9_$]`.
pub fn requires_quotes(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return true;
    };
    if first.is_ascii_digit() || first == '$' {
        return true;
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$')
    {
        return true;
    }
    is_reserved_word(name)
}

/// Quote a PostgreSQL identifier only when the server would otherwise
/// misread it.
///
/// # Example
/// ```
/// use typecat_sql::quote_ident_if_needed;
/// assert_eq!(quote_ident_if_needed("mathesar_types"), "mathesar_types");
/// assert_eq!(quote_ident_if_needed("user"), "\"user\"");
/// assert_eq!(quote_ident_if_needed("Types"), "\"Types\"");
/// ```
pub fn quote_ident_if_needed(name: &str) -> String {
    if requires_quotes(name) {
        quote_ident(name)
    } else {
        name.to_string()
    }
}

/// Build a schema-qualified identifier, quoting each part per Postgres rules.
///
/// Used for custom type ids as well as any other object living in a
/// dedicated schema (functions, casts).
///
/// # Example
/// ```
/// use typecat_sql::qualify;
/// assert_eq!(qualify("email", "mathesar_types"), "mathesar_types.email");
/// assert_eq!(qualify("email", "My Types"), "\"My Types\".email");
/// ```
pub fn qualify(unqualified_name: &str, schema: &str) -> String {
    [
        quote_ident_if_needed(schema),
        quote_ident_if_needed(unqualified_name),
    ]
    .join(".")
}
