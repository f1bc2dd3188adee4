use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::ConnectionDescriptor;

const APP_DIR: &str = "iot-bridge";
const FILE_NAME: &str = "config.json";

/// The saved connection descriptor: one JSON document, no versioning.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<platform config dir>/iot-bridge/config.json`, or `./.iot-bridge.json`
    /// when the platform has no config directory.
    pub fn default_location() -> Self {
        match dirs::config_dir() {
            Some(dir) => Self::at(dir.join(APP_DIR).join(FILE_NAME)),
            None => Self::at(".iot-bridge.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file → defaults.
    pub fn load(&self) -> Result<ConnectionDescriptor> {
        if !self.path.exists() {
            return Ok(ConnectionDescriptor::default());
        }
        let bytes = fs::read(&self.path)
            .with_context(|| format!("read settings {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse settings {}", self.path.display()))
    }

    pub fn save(&self, descriptor: &ConnectionDescriptor) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(descriptor).context("serialize settings")?;
        write_atomic(&self.path, &bytes)
            .with_context(|| format!("write settings {}", self.path.display()))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("nested/config.json"));
        let d = store.load().unwrap();
        assert_eq!(d, ConnectionDescriptor::default());
        assert_eq!(d.database_path, "/devices/esp32/command");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("nested/config.json"));
        let d = ConnectionDescriptor {
            api_key: "k".to_string(),
            project_id: "p1".to_string(),
            database_url: "https://x.firebaseio.com".to_string(),
            database_path: "/d/cmd".to_string(),
            ..ConnectionDescriptor::default()
        };
        store.save(&d).unwrap();
        assert_eq!(store.load().unwrap(), d);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"databaseURL\""));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(SettingsStore::at(path).load().is_err());
    }
}
