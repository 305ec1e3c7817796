use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::{DataSource, DEFAULT_SOURCE_URL};
use crate::data::prepare::TOP_N;

/// Runtime settings. Every field is optional in the file; missing ones
/// keep the defaults.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// CSV fetched on startup and by "Reload".
    pub source_url: String,
    /// How many records the charts show.
    pub top_n: usize,
    /// Default output directory for `export`.
    pub export_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            top_n: TOP_N,
            export_dir: PathBuf::from("charts"),
        }
    }
}

impl DashboardConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn source(&self) -> DataSource {
        DataSource::Url(self.source_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_keep_defaults() {
        let config: DashboardConfig = serde_json::from_str(r#"{"top_n": 5}"#).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.export_dir, PathBuf::from("charts"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<DashboardConfig>(r#"{"topN": 5}"#).is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"source_url": "http://localhost/data.csv"}}"#).unwrap();
        let config = DashboardConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.source(), DataSource::Url("http://localhost/data.csv".into()));
        assert_eq!(config.top_n, TOP_N);
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(DashboardConfig::load(None).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn unreadable_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config file"));
    }
}
