//! Static classification of built-in types by their quirks.
//!
//! These are facts about Postgres and the native registry, not about any
//! particular database, so they live in tables rather than being queried.
//! Custom types have no quirks.

use crate::catalog::{BuiltinType, TypeIdentity};

/// Non-canonical synonyms. Reflection reports the canonical type instead.
const ALIAS: &[BuiltinType] = &[
    BuiltinType::Float,
    BuiltinType::Time,
    BuiltinType::Timestamp,
];

/// Types that do not reflect back as themselves for reasons other than being
/// an alias. `name` and `"char"` both come back as a generic string class,
/// and `bit varying` comes back as `bit`.
const INCONSISTENT_NON_ALIAS: &[BuiltinType] = &[
    BuiltinType::Name,
    BuiltinType::Char,
    BuiltinType::BitVarying,
];

/// Types the native registry models that have no application-level
/// counterpart.
const ENGINE_ONLY: &[BuiltinType] = &[BuiltinType::Array];

/// Types provided by an extension that may not be installed.
const OPTIONAL: &[BuiltinType] = &[BuiltinType::Hstore];

/// Quirk flags for a single type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    pub alias: bool,
    pub engine_only: bool,
    pub optional: bool,
    pub inconsistent: bool,
}

/// Flags for every built-in, indexed by `BuiltinType as usize`.
const BUILTIN_QUIRKS: [Quirks; BuiltinType::ALL.len()] = {
    let mut table = [Quirks {
        alias: false,
        engine_only: false,
        optional: false,
        inconsistent: false,
    }; BuiltinType::ALL.len()];

    let mut i = 0;
    while i < ALIAS.len() {
        table[ALIAS[i] as usize].alias = true;
        table[ALIAS[i] as usize].inconsistent = true;
        i += 1;
    }
    let mut i = 0;
    while i < INCONSISTENT_NON_ALIAS.len() {
        table[INCONSISTENT_NON_ALIAS[i] as usize].inconsistent = true;
        i += 1;
    }
    let mut i = 0;
    while i < ENGINE_ONLY.len() {
        table[ENGINE_ONLY[i] as usize].engine_only = true;
        i += 1;
    }
    let mut i = 0;
    while i < OPTIONAL.len() {
        table[OPTIONAL[i] as usize].optional = true;
        i += 1;
    }
    table
};

/// All quirk flags for `t` at once.
pub fn quirks_of(t: TypeIdentity) -> Quirks {
    match t {
        TypeIdentity::BuiltIn(b) => BUILTIN_QUIRKS[b as usize],
        TypeIdentity::Custom(_) => Quirks::default(),
    }
}

pub fn is_alias(t: TypeIdentity) -> bool {
    quirks_of(t).alias
}

pub fn is_engine_only(t: TypeIdentity) -> bool {
    quirks_of(t).engine_only
}

pub fn is_optional(t: TypeIdentity) -> bool {
    quirks_of(t).optional
}

pub fn is_inconsistent(t: TypeIdentity) -> bool {
    quirks_of(t).inconsistent
}

/// Ignored types get no native class.
///
/// Current rule: if a column declared as type X reflects as some other type,
/// X is ignored. That covers every alias plus the other inconsistent types.
pub fn is_ignored(t: TypeIdentity) -> bool {
    is_inconsistent(t)
}

pub fn is_reflection_supported(t: TypeIdentity) -> bool {
    !is_inconsistent(t)
}

pub fn is_application_supported(t: TypeIdentity) -> bool {
    let q = quirks_of(t);
    !q.inconsistent && !q.engine_only
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CustomType, all_builtin, all_custom, all_known};

    #[test]
    fn test_alias_implies_inconsistent() {
        for t in all_known() {
            if is_alias(*t) {
                assert!(is_inconsistent(*t), "{t} is an alias but not inconsistent");
            }
        }
    }

    #[test]
    fn test_inconsistent_membership() {
        let inconsistent: Vec<_> = all_builtin()
            .iter()
            .copied()
            .filter(|t| is_inconsistent(*t))
            .collect();
        let expected: Vec<TypeIdentity> = [
            BuiltinType::BitVarying,
            BuiltinType::Char,
            BuiltinType::Float,
            BuiltinType::Name,
            BuiltinType::Time,
            BuiltinType::Timestamp,
        ]
        .into_iter()
        .map(TypeIdentity::from)
        .collect();
        assert_eq!(inconsistent, expected);
    }

    #[test]
    fn test_custom_types_have_no_quirks() {
        for t in all_custom() {
            assert_eq!(quirks_of(*t), Quirks::default());
            assert!(is_reflection_supported(*t));
            assert!(is_application_supported(*t));
        }
    }

    #[test]
    fn test_derived_predicates() {
        let array = TypeIdentity::BuiltIn(BuiltinType::Array);
        assert!(is_engine_only(array));
        assert!(is_reflection_supported(array));
        assert!(!is_application_supported(array));

        let float = TypeIdentity::BuiltIn(BuiltinType::Float);
        assert!(is_alias(float));
        assert!(is_ignored(float));
        assert!(!is_reflection_supported(float));
        assert!(!is_application_supported(float));

        let name = TypeIdentity::BuiltIn(BuiltinType::Name);
        assert!(!is_alias(name));
        assert!(is_ignored(name));

        let hstore = TypeIdentity::BuiltIn(BuiltinType::Hstore);
        assert!(is_optional(hstore));
        assert!(is_application_supported(hstore));

        let numeric = TypeIdentity::BuiltIn(BuiltinType::Numeric);
        assert_eq!(quirks_of(numeric), Quirks::default());
        assert!(is_application_supported(numeric));

        assert!(!is_optional(CustomType::Email.into()));
    }
}
