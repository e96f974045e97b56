use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::splitter::SplitError;

/// The three partitions a dataset is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitName {
    Train,
    Val,
    Test,
}

impl SplitName {
    pub fn as_str(&self) -> &str {
        match self {
            SplitName::Train => "train",
            SplitName::Val => "val",
            SplitName::Test => "test",
        }
    }

    pub fn all() -> [SplitName; 3] {
        [SplitName::Train, SplitName::Val, SplitName::Test]
    }
}

/// Output directory names for the three splits.
///
/// Defaults to the conventional `train`/`val`/`test` but can be overridden,
/// e.g. to `validation` for tooling that expects the long form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitNames {
    pub train: String,
    pub val: String,
    pub test: String,
}

impl Default for SplitNames {
    fn default() -> Self {
        Self {
            train: "train".to_string(),
            val: "val".to_string(),
            test: "test".to_string(),
        }
    }
}

impl SplitNames {
    /// Get the directory name for a specific split
    pub fn get(&self, split: SplitName) -> &str {
        match split {
            SplitName::Train => &self.train,
            SplitName::Val => &self.val,
            SplitName::Test => &self.test,
        }
    }
}

/// One class of the source dataset: the label (directory name) and the
/// files directly inside that directory, sorted by filename.
#[derive(Debug, Clone)]
pub struct ClassDir {
    pub label: String,
    pub files: Vec<PathBuf>,
}

/// Scan a source root whose immediate subdirectories are class labels.
///
/// Files are listed per class and sorted lexicographically so the seeded
/// shuffle downstream starts from the same canonical order on every
/// platform. Nested directories inside a class are ignored.
pub fn scan_source_tree(root: &Path) -> Result<Vec<ClassDir>, SplitError> {
    if !root.is_dir() {
        return Err(SplitError::InvalidInput(format!(
            "source root {:?} does not exist or is not a directory",
            root
        )));
    }

    let entries = fs::read_dir(root).map_err(|e| {
        SplitError::InvalidInput(format!("failed to read source root {:?}: {}", root, e))
    })?;

    let mut classes = Vec::new();
    for entry in entries.flatten() {
        let class_path = entry.path();
        if !class_path.is_dir() {
            continue;
        }

        let label = match class_path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping class directory with non-UTF-8 name: {:?}", class_path);
                continue;
            }
        };

        let mut files = Vec::new();
        if let Ok(class_entries) = fs::read_dir(&class_path) {
            for file_entry in class_entries.flatten() {
                let path = file_entry.path();
                if path.is_file() {
                    files.push(path);
                }
            }
        } else {
            warn!("Failed to read class directory: {:?}", class_path);
        }

        // Sort files for consistent ordering
        files.sort();

        if files.is_empty() {
            warn!("Class directory {:?} contains no files", class_path);
        }

        classes.push(ClassDir { label, files });
    }

    // Class order must not depend on directory iteration order
    classes.sort_by(|a, b| a.label.cmp(&b.label));

    if classes.is_empty() {
        return Err(SplitError::InvalidInput(format!(
            "source root {:?} contains no class subdirectories",
            root
        )));
    }

    let total: usize = classes.iter().map(|c| c.files.len()).sum();
    info!(
        "Found {} classes with {} files under {:?}",
        classes.len(),
        total,
        root
    );

    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn make_class(root: &Path, label: &str, files: &[&str]) {
        let dir = root.join(label);
        fs::create_dir_all(&dir).unwrap();
        for name in files {
            let mut f = File::create(dir.join(name)).unwrap();
            writeln!(f, "content of {}", name).unwrap();
        }
    }

    #[test]
    fn test_scan_finds_classes_and_sorted_files() {
        let tmp = TempDir::new().unwrap();
        make_class(tmp.path(), "tomato", &["b.jpg", "a.jpg", "c.jpg"]);
        make_class(tmp.path(), "potato", &["x.png"]);

        let classes = scan_source_tree(tmp.path()).unwrap();
        assert_eq!(classes.len(), 2);
        // Classes sorted by label
        assert_eq!(classes[0].label, "potato");
        assert_eq!(classes[1].label, "tomato");
        // Files sorted by name
        let names: Vec<_> = classes[1]
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_scan_ignores_loose_files_and_nested_dirs() {
        let tmp = TempDir::new().unwrap();
        make_class(tmp.path(), "healthy", &["1.jpg"]);
        File::create(tmp.path().join("readme.txt")).unwrap();
        fs::create_dir_all(tmp.path().join("healthy").join("nested")).unwrap();

        let classes = scan_source_tree(tmp.path()).unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].files.len(), 1);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let err = scan_source_tree(&missing).unwrap_err();
        assert!(matches!(err, SplitError::InvalidInput(_)));
    }

    #[test]
    fn test_scan_empty_root_fails() {
        let tmp = TempDir::new().unwrap();
        let err = scan_source_tree(tmp.path()).unwrap_err();
        assert!(matches!(err, SplitError::InvalidInput(_)));
    }

    #[test]
    fn test_split_name_strings() {
        assert_eq!(SplitName::Train.as_str(), "train");
        assert_eq!(SplitName::Val.as_str(), "val");
        assert_eq!(SplitName::Test.as_str(), "test");
    }

    #[test]
    fn test_split_names_default_and_get() {
        let names = SplitNames::default();
        assert_eq!(names.get(SplitName::Train), "train");
        assert_eq!(names.get(SplitName::Val), "val");
        assert_eq!(names.get(SplitName::Test), "test");
    }
}
