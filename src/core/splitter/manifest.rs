use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::SplitConfig;
use crate::core::dataset::SplitNames;

use super::execute::{CopyFailure, SplitSummary};
use super::plan::SplitRatio;

pub const MANIFEST_FILENAME: &str = "split_manifest.json";

/// Per-class file counts actually written to each split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestClassCounts {
    pub label: String,
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

/// Record of a split run, written into the output root so the provenance of
/// a generated dataset (seed, ratio, failures) stays with the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitManifest {
    pub created_at: String,
    pub source_root: PathBuf,
    pub seed: u64,
    pub ratio: SplitRatio,
    pub names: SplitNames,
    pub copied_count: usize,
    pub classes: Vec<ManifestClassCounts>,
    #[serde(default)]
    pub failures: Vec<CopyFailure>,
}

impl SplitManifest {
    pub fn from_run(config: &SplitConfig, summary: &SplitSummary) -> Self {
        let classes = summary
            .classes
            .iter()
            .map(|c| ManifestClassCounts {
                label: c.label.clone(),
                train: c.train.len(),
                val: c.val.len(),
                test: c.test.len(),
            })
            .collect();

        Self {
            created_at: chrono::Local::now().to_rfc3339(),
            source_root: config.source_root.clone(),
            seed: config.seed,
            ratio: config.ratio,
            names: config.names.clone(),
            copied_count: summary.copied_count,
            classes,
            failures: summary.failures.clone(),
        }
    }

    /// Serialize the manifest as pretty JSON into the output root.
    pub fn save(&self, output_root: &Path) -> io::Result<PathBuf> {
        let path = output_root.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Load a manifest previously written by [`SplitManifest::save`].
    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::splitter::ClassAssignment;
    use tempfile::TempDir;

    fn sample_summary() -> SplitSummary {
        let mut class = ClassAssignment::new("potato".to_string());
        class.train.push(PathBuf::from("/out/train/potato/a.jpg"));
        class.train.push(PathBuf::from("/out/train/potato/b.jpg"));
        class.test.push(PathBuf::from("/out/test/potato/c.jpg"));
        SplitSummary {
            classes: vec![class],
            failures: vec![],
            copied_count: 3,
        }
    }

    #[test]
    fn test_manifest_counts_from_summary() {
        let config = SplitConfig {
            source_root: PathBuf::from("/data"),
            output_root: PathBuf::from("/out"),
            ratio: SplitRatio::default(),
            seed: 42,
            names: SplitNames::default(),
            overwrite: false,
        };
        let manifest = SplitManifest::from_run(&config, &sample_summary());
        assert_eq!(manifest.seed, 42);
        assert_eq!(manifest.copied_count, 3);
        assert_eq!(manifest.classes.len(), 1);
        assert_eq!(manifest.classes[0].train, 2);
        assert_eq!(manifest.classes[0].val, 0);
        assert_eq!(manifest.classes[0].test, 1);
    }

    #[test]
    fn test_manifest_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let config = SplitConfig {
            source_root: PathBuf::from("/data"),
            output_root: tmp.path().to_path_buf(),
            ratio: SplitRatio::default(),
            seed: 7,
            names: SplitNames::default(),
            overwrite: false,
        };
        let manifest = SplitManifest::from_run(&config, &sample_summary());
        let path = manifest.save(tmp.path()).unwrap();
        assert!(path.ends_with(MANIFEST_FILENAME));

        let loaded = SplitManifest::load(&path).unwrap();
        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.classes[0].label, "potato");
    }
}
