//! Startup orchestration.
//!
//! # Responsibilities
//! - Load every mapping table
//! - Preload device documents when configured
//! - Decide whether a data failure aborts startup
//!
//! # Design Decisions
//! - Fail fast: any data error is fatal unless safety is disabled
//! - With safety disabled a failed space starts empty or partially cached

use std::sync::Arc;

use crate::config::validation::ValidationError;
use crate::config::{ConfigError, DataConfig};
use crate::device::{ReloadError, Resolver, TargetSpace};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("failed to load {space} data: {source}")]
    Data {
        space: TargetSpace,
        #[source]
        source: ReloadError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the shared resolver and load all device data into it.
pub async fn bootstrap(config: &DataConfig) -> Result<Arc<Resolver>, StartupError> {
    let policy = config.load_policy();
    let resolver = Resolver::new(config.root.clone(), policy);

    tracing::info!(
        root = %config.root.display(),
        preload = policy.preload,
        disable_safety = policy.disable_safety,
        "Loading mappings and device data"
    );

    for space in TargetSpace::ALL {
        match resolver.load_space(space).await {
            Ok(snapshot) => {
                tracing::info!(
                    space = %space,
                    mappings = snapshot.table.len(),
                    cached = snapshot.cache.len(),
                    "Space ready"
                );
                resolver.catalog().publish(space, snapshot);
            }
            Err(e) if policy.disable_safety => {
                tracing::warn!(space = %space, error = %e, "Safety disabled, starting space without data");
            }
            Err(source) => return Err(StartupError::Data { space, source }),
        }
    }

    Ok(Arc::new(resolver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mapping::MAPPINGS_DIR;
    use std::fs;
    use std::path::Path;

    fn data_config(root: &Path, disable_safety: bool) -> DataConfig {
        DataConfig {
            root: root.to_path_buf(),
            preload: true,
            watch: false,
            disable_safety,
        }
    }

    #[tokio::test]
    async fn test_missing_mapping_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = bootstrap(&data_config(dir.path(), false)).await.unwrap_err();
        assert!(matches!(err, StartupError::Data { .. }));
    }

    #[tokio::test]
    async fn test_safety_override_starts_partial() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(MAPPINGS_DIR)).unwrap();
        fs::write(
            dir.path().join(MAPPINGS_DIR).join("boardconfigs.json"),
            r#"{"d94ap": "devices/d94ap.json"}"#,
        )
        .unwrap();

        let resolver = bootstrap(&data_config(dir.path(), true)).await.unwrap();
        assert_eq!(resolver.stats(TargetSpace::BoardConfig).entries, 1);
        assert_eq!(resolver.stats(TargetSpace::BoardConfig).cached, 0);
        assert_eq!(resolver.stats(TargetSpace::Model).entries, 0);
    }
}
