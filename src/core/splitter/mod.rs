//! Seeded, proportional splitting of a class-labeled source tree.

mod error;
mod execute;
mod manifest;
mod plan;

pub use error::SplitError;
pub use execute::{
    check_output_root, execute_split, run_split, CopyFailure, SplitProgressMessage, SplitSummary,
};
pub use manifest::{ManifestClassCounts, SplitManifest, MANIFEST_FILENAME};
pub use plan::{
    plan_split, ClassAssignment, SplitPlan, SplitRatio, DEFAULT_SEED, RATIO_SUM_TOLERANCE,
};
