use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::dataset::SplitNames;
use crate::core::splitter::{SplitError, SplitRatio, DEFAULT_SEED};

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Configuration for one split run.
///
/// Only the two paths are mandatory in a JSON config file; ratio, seed,
/// names, and overwrite fall back to their defaults when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Source root containing one subdirectory per class
    pub source_root: PathBuf,

    /// Output root for the split tree (created if missing)
    pub output_root: PathBuf,

    /// Target train/val/test proportions
    #[serde(default)]
    pub ratio: SplitRatio,

    /// Shuffle seed for reproducible splits
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Output directory names for the three splits
    #[serde(default)]
    pub names: SplitNames,

    /// Allow writing into an existing, non-empty output root
    #[serde(default)]
    pub overwrite: bool,
}

impl SplitConfig {
    pub fn new(source_root: PathBuf, output_root: PathBuf) -> Self {
        Self {
            source_root,
            output_root,
            ratio: SplitRatio::default(),
            seed: DEFAULT_SEED,
            names: SplitNames::default(),
            overwrite: false,
        }
    }

    /// Load a configuration from a JSON file and validate its ratio.
    pub fn load(path: &Path) -> Result<Self, SplitError> {
        info!("Loading split config from: {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| {
            SplitError::Config(format!("failed to read config file {:?}: {}", path, e))
        })?;
        let config: SplitConfig = serde_json::from_str(&contents).map_err(|e| {
            SplitError::Config(format!("failed to parse config file {:?}: {}", path, e))
        })?;

        config.ratio.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON, e.g. to rerun a split later.
    pub fn save(&self, path: &Path) -> Result<(), SplitError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SplitError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, json).map_err(|e| {
            SplitError::Config(format!("failed to write config file {:?}: {}", path, e))
        })?;
        info!("Saved split config to: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_in_missing_fields() {
        let json = r#"{ "source_root": "/data/plants", "output_root": "/data/split" }"#;
        let config: SplitConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.ratio, SplitRatio::default());
        assert_eq!(config.names, SplitNames::default());
        assert!(!config.overwrite);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("split.json");

        let mut config = SplitConfig::new(PathBuf::from("/in"), PathBuf::from("/out"));
        config.seed = 1234;
        config.names.val = "validation".to_string();
        config.save(&path).unwrap();

        let loaded = SplitConfig::load(&path).unwrap();
        assert_eq!(loaded.seed, 1234);
        assert_eq!(loaded.names.val, "validation");
        assert_eq!(loaded.source_root, PathBuf::from("/in"));
    }

    #[test]
    fn test_load_rejects_invalid_ratio() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(
            &path,
            r#"{
                "source_root": "/in",
                "output_root": "/out",
                "ratio": { "train": 0.5, "val": 0.6, "test": 0.2 }
            }"#,
        )
        .unwrap();

        let err = SplitConfig::load(&path).unwrap_err();
        assert!(matches!(err, SplitError::InvalidRatio(_)));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let err = SplitConfig::load(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SplitError::Config(_)));
    }
}
