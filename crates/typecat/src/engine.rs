//! Binding type identities to a database engine's native types.

use crate::catalog::{TypeIdentity, resolve_by_id};
use crate::native::{Dialect, InstantiateError, NativeClass, NativeRef, TypeOptions};
use crate::quirks::is_ignored;
use crate::{Error, Result};
use tracing::debug;

/// A connection provider paired with the dialect of the database behind it.
///
/// The binding methods ([`Engine::native_class_for`],
/// [`Engine::compile_instance`], [`Engine::identity_for_native_class`]) only
/// consult the dialect. The availability methods go to the database.
#[derive(Debug, Clone)]
pub struct Engine<P> {
    provider: P,
    dialect: Dialect,
}

impl<P> Engine<P> {
    /// An engine using the Postgres dialect.
    pub fn new(provider: P) -> Self {
        Self::with_dialect(provider, Dialect::postgres())
    }

    pub fn with_dialect(provider: P, dialect: Dialect) -> Self {
        Self { provider, dialect }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The native class for `t`, or `None` if `t` is ignored or the dialect
    /// has nothing registered under its id.
    pub fn native_class_for(&self, t: TypeIdentity) -> Option<&'static NativeClass> {
        if is_ignored(t) {
            return None;
        }
        self.dialect.get(t.id())
    }

    /// Compile an instance of `t` built with `options` to SQL type text.
    ///
    /// Classes that take no such options are instantiated bare instead, so
    /// passing `{"length": 10}` for `TEXT` still yields `TEXT`. Returns `None`
    /// if there is no native class, or no instance can be built at all.
    pub fn compile_instance(&self, t: TypeIdentity, options: &TypeOptions) -> Option<String> {
        let class = self.native_class_for(t)?;
        let instance = match class.instantiate(options) {
            Ok(instance) => instance,
            Err(InstantiateError::UnexpectedOption { option, .. }) => {
                debug!(type_id = t.id(), %class, %option, "retrying without options");
                match class.instantiate(&TypeOptions::new()) {
                    Ok(instance) => instance,
                    Err(e) => {
                        debug!(type_id = t.id(), error = %e, "cannot instantiate type");
                        return None;
                    }
                }
            }
            Err(e) => {
                debug!(type_id = t.id(), error = %e, "cannot instantiate type");
                return None;
            }
        };
        Some(instance.compile())
    }

    /// Map a native class back to the type it was registered for.
    ///
    /// Callers only do this with classes they got from us, so a class we
    /// can't map is reported as [`Error::NotSupported`] rather than `None`.
    /// Passing an instance instead of a class is a [`Error::ContractViolation`].
    pub fn identity_for_native_class<'a>(
        &self,
        native: impl Into<NativeRef<'a>>,
    ) -> Result<TypeIdentity> {
        let class = match native.into() {
            NativeRef::Class(class) => class,
            NativeRef::Instance(instance) => {
                return Err(Error::ContractViolation(format!(
                    "expected a native type class, got an instance of {}",
                    instance.class()
                )));
            }
        };

        let Some(id) = self.dialect.id_of(class) else {
            debug!(%class, dialect = self.dialect.name(), "class not in registry");
            return Err(Error::NotSupported {
                class: class.name().to_string(),
                id: None,
            });
        };

        resolve_by_id(id).ok_or_else(|| {
            debug!(%class, id, "registry id is not a known type");
            Error::NotSupported {
                class: class.name().to_string(),
                id: Some(id.to_string()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuiltinType, CustomType, all_known};
    use crate::native::classes;
    use crate::quirks::is_inconsistent;

    fn engine() -> Engine<()> {
        Engine::new(())
    }

    fn opts<const N: usize>(pairs: [(&str, crate::TypeOption); N]) -> TypeOptions {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_native_class_for_skips_ignored() {
        let engine = engine();
        assert_eq!(
            engine.native_class_for(BuiltinType::Numeric.into()),
            Some(&classes::NUMERIC)
        );
        assert_eq!(engine.native_class_for(BuiltinType::Float.into()), None);
        assert_eq!(engine.native_class_for(BuiltinType::Name.into()), None);
        assert_eq!(
            engine.native_class_for(CustomType::Email.into()),
            Some(&classes::EMAIL)
        );

        let bare = Engine::with_dialect((), Dialect::empty("none"));
        assert_eq!(bare.native_class_for(BuiltinType::Numeric.into()), None);
    }

    #[test]
    fn test_round_trip_every_bound_type() {
        let engine = engine();
        for t in all_known() {
            match engine.native_class_for(*t) {
                Some(class) => assert_eq!(engine.identity_for_native_class(class).unwrap(), *t),
                None => assert!(is_inconsistent(*t), "{t} has no class but is consistent"),
            }
        }
    }

    #[test]
    fn test_shared_class_resolves_to_canonical() {
        let engine = engine();
        assert_eq!(
            engine.identity_for_native_class(&classes::TIMESTAMP).unwrap(),
            BuiltinType::TimestampWithoutTimeZone.into()
        );
        assert_eq!(
            engine.identity_for_native_class(&classes::STRING).unwrap(),
            BuiltinType::Char.into()
        );
    }

    #[test]
    fn test_instance_is_contract_violation() {
        let engine = engine();
        let instance = classes::NUMERIC.instantiate(&TypeOptions::new()).unwrap();
        let err = engine.identity_for_native_class(&instance).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)), "{err}");
    }

    #[test]
    fn test_unmapped_class_is_not_supported() {
        let empty = Engine::with_dialect((), Dialect::empty("none"));
        let err = empty.identity_for_native_class(&classes::TEXT).unwrap_err();
        assert!(matches!(err, Error::NotSupported { id: None, .. }), "{err}");

        let mut drifted = Dialect::empty("drifted");
        drifted.register("xml", &classes::TEXT);
        let engine = Engine::with_dialect((), drifted);
        let err = engine.identity_for_native_class(&classes::TEXT).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot map native class TEXT to a known type (registered as \"xml\")"
        );
    }

    #[test]
    fn test_compile_instance() {
        let engine = engine();
        let numeric = BuiltinType::Numeric.into();
        insta::assert_snapshot!(
            engine.compile_instance(numeric, &opts([("precision", 12.into()), ("scale", 4.into())])).unwrap(),
            @"NUMERIC(12, 4)"
        );
        insta::assert_snapshot!(
            engine.compile_instance(BuiltinType::TimestampWithTimeZone.into(), &TypeOptions::new()).unwrap(),
            @"TIMESTAMP WITH TIME ZONE"
        );
        insta::assert_snapshot!(
            engine.compile_instance(CustomType::MulticurrencyMoney.into(), &TypeOptions::new()).unwrap(),
            @"mathesar_types.multicurrency_money"
        );
    }

    #[test]
    fn test_compile_instance_falls_back_to_bare() {
        let engine = engine();
        assert_eq!(
            engine
                .compile_instance(BuiltinType::Text.into(), &opts([("length", 10.into())]))
                .as_deref(),
            Some("TEXT")
        );
        assert_eq!(
            engine
                .compile_instance(
                    BuiltinType::DoublePrecision.into(),
                    &opts([("precision", 53.into())])
                )
                .as_deref(),
            Some("DOUBLE PRECISION")
        );
    }

    #[test]
    fn test_compile_instance_none() {
        let engine = engine();
        // ignored: no class
        assert_eq!(
            engine.compile_instance(BuiltinType::Timestamp.into(), &TypeOptions::new()),
            None
        );
        // arrays need an item type, even after the bare retry
        assert_eq!(
            engine.compile_instance(BuiltinType::Array.into(), &TypeOptions::new()),
            None
        );
        assert_eq!(
            engine.compile_instance(BuiltinType::Array.into(), &opts([("dims", 2.into())])),
            None
        );
        // a value of the wrong kind is not retried
        assert_eq!(
            engine.compile_instance(
                BuiltinType::Numeric.into(),
                &opts([("precision", "wide".into())])
            ),
            None
        );
        assert_eq!(
            engine
                .compile_instance(
                    BuiltinType::Array.into(),
                    &opts([("item_type", "text".into())])
                )
                .as_deref(),
            Some("text[]")
        );
    }
}
