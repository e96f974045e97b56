//! Deterministic train/val/test splitting for class-labeled image datasets.
//!
//! The source tree is expected to contain one subdirectory per class, each
//! holding the files of that class. Splitting copies every file into
//! `output_root/<split>/<class>/<filename>`; source files are never touched.
//! The same seed over the same source tree always yields the same split.

pub mod config;
pub mod core;
pub mod infrastructure;

pub use config::SplitConfig;
pub use core::dataset::{scan_source_tree, ClassDir, SplitName, SplitNames};
pub use core::splitter::{
    plan_split, run_split, SplitError, SplitPlan, SplitRatio, SplitSummary, DEFAULT_SEED,
};
