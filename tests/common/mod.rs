//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::Router;
use tempfile::TempDir;

use labradorite::config::ServerConfig;
use labradorite::lifecycle::bootstrap;
use labradorite::{DeviceLookup, HttpServer};

pub const D94AP: &str = r#"{
    "name": "iPhone 16 Pro Max",
    "boardconfig": "D94AP",
    "chips": {"soc": "A18 Pro", "cpu": {"cores": 6}},
    "storage": [256, 512, 1024]
}"#;

pub const J717AP: &str = r#"{"name": "iPad Pro (11-inch) (M4)", "chips": {"soc": "M4"}}"#;

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A data root with two devices mapped in every space.
pub fn data_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_file(root, "devices/d94ap.json", D94AP);
    write_file(root, "devices/j717ap.json", J717AP);
    write_file(
        root,
        "mappings/boardconfigs.json",
        r#"{"D94AP": "devices/d94ap.json", "J717AP": "devices/j717ap.json"}"#,
    );
    write_file(
        root,
        "mappings/models.json",
        r#"{"A3084": "devices/d94ap.json", "A2836": "devices/j717ap.json"}"#,
    );
    write_file(
        root,
        "mappings/identifiers.json",
        r#"{"iPhone17,2": "devices/d94ap.json", "iPad16,3": "devices/j717ap.json"}"#,
    );

    dir
}

/// Default config pointed at `root`.
pub fn config_for(root: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.data.root = root.to_path_buf();
    config
}

/// Bootstrap `config` and return the lookup plus the in-process router.
pub async fn build_app(config: ServerConfig) -> (DeviceLookup, Router) {
    let resolver = bootstrap(&config.data).await.unwrap();
    let lookup = DeviceLookup::new(resolver);
    let router = HttpServer::new(config, lookup.clone()).router();
    (lookup, router)
}
