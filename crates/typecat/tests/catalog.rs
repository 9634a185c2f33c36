use proptest::prelude::*;
use std::collections::HashSet;
use typecat::quirks::{is_alias, is_application_supported, is_ignored, is_inconsistent};
use typecat::{
    BuiltinType, Catalog, CustomType, Engine, TypeIdentity, all_builtin, all_custom, all_known,
    qualify, qualify_in_custom_schema, resolve_by_id,
};

#[test]
fn test_every_id_resolves_to_itself() {
    for t in all_known() {
        assert_eq!(resolve_by_id(t.id()), Some(*t));
    }
}

#[test]
fn test_catalog_membership() {
    assert!(all_builtin().iter().all(|t| t.catalog() == Catalog::BuiltIn));
    assert!(all_custom().iter().all(|t| t.catalog() == Catalog::Custom));

    let ids: HashSet<&str> = all_known().iter().map(|t| t.id()).collect();
    assert_eq!(ids.len(), all_builtin().len() + all_custom().len());
}

#[test]
fn test_custom_identity_qualification() {
    assert_eq!(qualify("email", "mathesar_types"), "mathesar_types.email");
    assert_eq!(
        TypeIdentity::from(CustomType::Email).id(),
        qualify_in_custom_schema("email")
    );
    // the same rule qualifies non-type objects
    assert_eq!(
        qualify_in_custom_schema("uri_scheme"),
        "mathesar_types.uri_scheme"
    );
}

#[test]
fn test_application_supported_types() {
    let unsupported: Vec<&str> = all_known()
        .iter()
        .filter(|t| !is_application_supported(**t))
        .map(|t| t.id())
        .collect();
    assert_eq!(
        unsupported,
        vec![
            "_array",
            "bit varying",
            "\"char\"",
            "float",
            "name",
            "time",
            "timestamp"
        ]
    );
}

#[test]
fn test_round_trip_through_engine() {
    let engine = Engine::new(());
    let mut bound = 0;
    for t in all_known() {
        if let Some(class) = engine.native_class_for(*t) {
            assert_eq!(engine.identity_for_native_class(class).unwrap(), *t);
            bound += 1;
        } else {
            assert!(is_ignored(*t));
        }
    }
    assert_eq!(bound, all_known().len() - 6);
}

#[test]
fn test_aliases_are_inconsistent() {
    for t in BuiltinType::ALL.map(TypeIdentity::from) {
        assert!(!is_alias(t) || is_inconsistent(t));
    }
}

proptest! {
    #[test]
    fn unknown_ids_resolve_to_none(id in "[a-z_ ]{1,30}xyz") {
        prop_assert_eq!(resolve_by_id(&id), None);
    }

    #[test]
    fn qualify_is_stable(name in "[a-z_]{1,16}", schema in "[a-zA-Z_ ]{1,16}") {
        prop_assert_eq!(qualify(&name, &schema), qualify(&name, &schema));
    }
}
