//! Configuration file handling.
//!
//! Looks for `.config/typecat.styx` in the current directory or any parent directory.

pub use typecat_config::Config;

use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".config/typecat.styx";

/// Load configuration, searching up from the current directory.
///
/// A missing file is not an error: every setting can also come from flags.
pub fn load() -> Result<Option<(Config, PathBuf)>, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io(e.to_string()))?;
    match load_from(&cwd) {
        Ok(found) => Ok(Some(found)),
        Err(ConfigError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load configuration starting from a specific directory.
pub fn load_from(start: &Path) -> Result<(Config, PathBuf), ConfigError> {
    let config_path = find_config_file(start)?;
    let content =
        std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io(e.to_string()))?;

    let config: Config =
        facet_styx::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok((config, config_path))
}

fn find_config_file(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(ConfigError::NotFound);
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no .config/typecat.styx found in current directory or any parent")]
    NotFound,
    #[error("failed to read .config/typecat.styx: {0}")]
    Io(String),
    #[error("failed to parse .config/typecat.styx: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("typecat-cli-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_finds_config_in_parent() {
        let root = scratch_dir("parent");
        std::fs::create_dir_all(root.join(".config")).unwrap();
        std::fs::write(root.join(CONFIG_FILE), "").unwrap();
        let nested = root.join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, root.join(CONFIG_FILE));
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::NotFound.to_string(),
            "no .config/typecat.styx found in current directory or any parent"
        );
        assert_eq!(
            ConfigError::Parse("unexpected token".into()).to_string(),
            "failed to parse .config/typecat.styx: unexpected token"
        );
    }
}
