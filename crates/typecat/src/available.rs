//! Which known types are actually installed on a connected database.
//!
//! The dialect says what the engine *could* represent; only the database's
//! own catalog says what exists right now (extensions like `hstore`, our
//! custom types in `mathesar_types`).

use crate::catalog::{TypeIdentity, all_known};
use crate::{ConnectionExt, ConnectionProvider, Engine, Error, Result};
use std::collections::HashSet;
use tracing::debug;

/// Lists every top-level type on the database, formatted by
/// `pg_catalog.format_type` so ids match what reflection sees.
///
/// Adapted from the query psql runs for `\dT *`: composite types only count
/// if they are standalone (`relkind = 'c'`), and array types are skipped.
pub const INSTALLED_TYPES_SQL: &str = "\
SELECT
  pg_catalog.format_type(t.oid, NULL) AS \"Name\"
 FROM pg_catalog.pg_type t
      LEFT JOIN pg_catalog.pg_namespace n ON n.oid = t.typnamespace
 WHERE (t.typrelid = 0 OR (SELECT c.relkind = 'c' FROM pg_catalog.pg_class c WHERE c.oid = t.typrelid))
   AND NOT EXISTS(SELECT 1 FROM pg_catalog.pg_type el WHERE el.oid = t.typelem AND el.typarray = t.oid)";

/// A snapshot of the type ids installed on a database.
pub type InstalledTypeIds = HashSet<String>;

/// Whether `t` is in the `installed` snapshot.
pub fn is_installed(t: TypeIdentity, installed: &InstalledTypeIds) -> bool {
    installed.contains(t.id())
}

/// Every known type present in the `installed` snapshot.
pub fn known_types_in(installed: &InstalledTypeIds) -> Vec<TypeIdentity> {
    all_known()
        .iter()
        .copied()
        .filter(|t| is_installed(*t, installed))
        .collect()
}

impl<P: ConnectionProvider> Engine<P> {
    /// Fetch the ids of every type installed on the database.
    ///
    /// This is the only query typecat runs. The connection is held for the
    /// duration of the query and released however it ends.
    pub async fn installed_type_ids(&self) -> Result<InstalledTypeIds> {
        const OPERATION: &str = "fetching installed type ids";

        let conn = self.provider().acquire().await?;
        let rows = conn
            .traced()
            .query(INSTALLED_TYPES_SQL, &[])
            .await
            .map_err(|source| Error::Query {
                operation: OPERATION,
                source,
            })?;
        drop(conn);

        let ids = rows
            .iter()
            .map(|row| row.try_get::<_, String>(0))
            .collect::<std::result::Result<InstalledTypeIds, _>>()
            .map_err(|source| Error::Query {
                operation: OPERATION,
                source,
            })?;
        debug!(count = ids.len(), "fetched installed type ids");
        Ok(ids)
    }

    /// Whether `t` is installed on the database.
    ///
    /// Pass a snapshot from [`Engine::installed_type_ids`] to check many
    /// types without a query each. No quirk filtering happens here: an
    /// ignored type that is installed is still available.
    pub async fn is_available(
        &self,
        t: TypeIdentity,
        installed: Option<&InstalledTypeIds>,
    ) -> Result<bool> {
        match installed {
            Some(installed) => Ok(is_installed(t, installed)),
            None => {
                let installed = self.installed_type_ids().await?;
                Ok(is_installed(t, &installed))
            }
        }
    }

    /// Every known type installed on the database, using a single query.
    pub async fn available_known_types(&self) -> Result<Vec<TypeIdentity>> {
        let installed = self.installed_type_ids().await?;
        Ok(known_types_in(&installed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuiltinType, CustomType};
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A provider with no database behind it. Counts acquisition attempts.
    #[derive(Default)]
    struct Offline {
        attempts: AtomicUsize,
    }

    impl ConnectionProvider for Offline {
        type Conn<'a> = deadpool_postgres::Object;

        fn acquire(&self) -> impl Future<Output = Result<Self::Conn<'_>>> + Send {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Err(Error::ContractViolation(
                "no database in unit tests".to_string(),
            )))
        }
    }

    fn snapshot(ids: &[&str]) -> InstalledTypeIds {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_known_types_in_snapshot() {
        let installed = snapshot(&["numeric", "text", "boolean", "xml"]);
        let known = known_types_in(&installed);
        assert_eq!(
            known,
            vec![
                TypeIdentity::BuiltIn(BuiltinType::Boolean),
                TypeIdentity::BuiltIn(BuiltinType::Numeric),
                TypeIdentity::BuiltIn(BuiltinType::Text),
            ]
        );
        assert!(!known.contains(&BuiltinType::Integer.into()));
    }

    #[test]
    fn test_custom_types_need_qualified_ids() {
        let unqualified = snapshot(&["email"]);
        assert!(!is_installed(CustomType::Email.into(), &unqualified));

        let qualified = snapshot(&["mathesar_types.email"]);
        assert!(is_installed(CustomType::Email.into(), &qualified));
    }

    #[test]
    fn test_installed_ignores_quirks() {
        let installed = snapshot(&["timestamp", "_array"]);
        assert!(is_installed(BuiltinType::Timestamp.into(), &installed));
        assert!(is_installed(BuiltinType::Array.into(), &installed));
    }

    #[tokio::test]
    async fn test_snapshot_skips_query() {
        let engine = Engine::new(Offline::default());
        let installed = snapshot(&["numeric", "text", "boolean"]);

        let numeric = BuiltinType::Numeric.into();
        assert!(engine.is_available(numeric, Some(&installed)).await.unwrap());
        assert!(
            !engine
                .is_available(BuiltinType::Uuid.into(), Some(&installed))
                .await
                .unwrap()
        );
        assert_eq!(engine.provider().attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_without_snapshot_queries() {
        let engine = Engine::new(Offline::default());

        let err = engine
            .is_available(BuiltinType::Numeric.into(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));

        assert!(engine.available_known_types().await.is_err());
        assert_eq!(engine.provider().attempts.load(Ordering::SeqCst), 2);
    }
}
