use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::RoadmapConfig;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "roadmap.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read the config.
///
/// An explicit path must exist. Otherwise `roadmap.toml` in `dir` is used
/// when present, and the defaults when it is not.
pub fn read_config(explicit: Option<&Path>, dir: &Path) -> Result<RoadmapConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                tracing::debug!(dir = %dir.display(), "no roadmap.toml, using defaults");
                return Ok(RoadmapConfig::default());
            }
            candidate
        }
    };

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(None, tmp.path()).unwrap();
        assert_eq!(config.roadmap.view, "timeline");
    }

    #[test]
    fn test_reads_file_in_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[roadmap]\nview = \"release\"\ntimeframe = \"1year\"\n\n[output]\nversion_label = \"2.0\"\n",
        )
        .unwrap();
        let config = read_config(None, tmp.path()).unwrap();
        assert_eq!(config.roadmap.view, "release");
        assert_eq!(config.roadmap.timeframe, "1year");
        assert_eq!(config.roadmap.grouping, "theme");
        assert_eq!(config.output.version_label.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("elsewhere.toml");
        let err = read_config(Some(&missing), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_parse_error_names_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[roadmap\nview = ").unwrap();
        let err = read_config(Some(&path), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
