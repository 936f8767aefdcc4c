//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file. Validation runs after command-line
/// overrides are applied, see [`validate_config`](crate::config::validation::validate_config).
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServerConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [data]
            root = "/srv/labradorite"
            disable_safety = true

            [endpoints]
            host_enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.data.root, Path::new("/srv/labradorite"));
        assert!(config.data.disable_safety);
        assert!(config.data.preload);
        assert!(config.endpoints.host_enabled);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labradorite.toml");
        fs::write(&path, "[listener]\nbind_address = \"127.0.0.1:9999\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
    }

    #[test]
    fn test_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labradorite.toml");
        fs::write(&path, "[listener\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
        assert!(matches!(
            load_config(&dir.path().join("absent.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
