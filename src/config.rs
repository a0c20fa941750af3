use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Deserialize, Debug)]
pub struct IndexConfig {
    /// Filename of the index written into a scanned directory
    #[serde(default = "default_index_filename")]
    pub filename: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            filename: default_index_filename(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ScanConfig {
    /// Findings file read from the scanned directory
    #[serde(default = "default_findings_filename")]
    pub findings: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            findings: default_findings_filename(),
        }
    }
}

fn default_index_filename() -> String {
    crate::index::INDEX_FILENAME.to_string()
}

fn default_findings_filename() -> String {
    "findings.json".to_string()
}

impl Config {
    /// Load config from `path`. A missing file yields defaults; a present
    /// but invalid file is an error.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.index.filename, "index.covrst");
        assert_eq!(config.scan.findings, "findings.json");
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("covnav.toml");
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.index.filename, "index.covrst");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("covnav.toml");
        std::fs::write(&path, "[index]\nfilename = \"violations.covrst\"\n").unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.index.filename, "violations.covrst");
        assert_eq!(config.scan.findings, "findings.json");
    }

    #[test]
    fn test_load_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("covnav.toml");
        std::fs::write(&path, "index = \"not a table\"\n").unwrap();
        assert!(Config::load(path.to_str().unwrap()).is_err());
    }
}
