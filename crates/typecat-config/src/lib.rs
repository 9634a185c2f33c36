//! Configuration schema for typecat.
//!
//! Lives in `.config/typecat.styx`:
//!
//! ```styx
//! database_url "postgres://mathesar@localhost/mathesar"
//! max_connections 4
//! log "typecat=debug"
//! ```

use facet::Facet;

/// Top-level configuration. Every field is optional; command-line flags take
/// precedence over anything set here.
#[derive(Debug, Default, Clone, Facet)]
pub struct Config {
    /// Database connection URL (URL or libpq key=value form).
    #[facet(default)]
    pub database_url: Option<String>,

    /// Maximum number of pooled connections.
    #[facet(default)]
    pub max_connections: Option<usize>,

    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    #[facet(default)]
    pub log: Option<String>,
}

impl Config {
    /// Pool size to use when none is configured.
    pub const DEFAULT_MAX_CONNECTIONS: usize = 4;

    /// Configured pool size, or [`Self::DEFAULT_MAX_CONNECTIONS`].
    pub fn max_connections(&self) -> usize {
        self.max_connections
            .unwrap_or(Self::DEFAULT_MAX_CONNECTIONS)
            .max(1)
    }

    /// Overlay values from `other` on top of `self`.
    pub fn merged_with(mut self, other: Config) -> Config {
        if other.database_url.is_some() {
            self.database_url = other.database_url;
        }
        if other.max_connections.is_some() {
            self.max_connections = other.max_connections;
        }
        if other.log.is_some() {
            self.log = other.log;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_connections_default_and_floor() {
        assert_eq!(Config::default().max_connections(), 4);

        let config = Config {
            max_connections: Some(0),
            ..Default::default()
        };
        assert_eq!(config.max_connections(), 1);
    }

    #[test]
    fn test_merged_with_prefers_other() {
        let file = Config {
            database_url: Some("postgres://file".to_string()),
            max_connections: Some(8),
            log: None,
        };
        let flags = Config {
            database_url: Some("postgres://flag".to_string()),
            ..Default::default()
        };

        let merged = file.merged_with(flags);
        assert_eq!(merged.database_url.as_deref(), Some("postgres://flag"));
        assert_eq!(merged.max_connections, Some(8));
        assert_eq!(merged.log, None);
    }
}
