use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::Sender,
    Arc,
};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::SplitConfig;
use crate::core::dataset::{scan_source_tree, SplitName, SplitNames};
use crate::core::operations::{copy_file, dir_is_empty, ensure_dir};

use super::manifest::SplitManifest;
use super::plan::{plan_split, ClassAssignment, SplitPlan};
use super::SplitError;

/// How many copies between progress messages
const PROGRESS_INTERVAL: usize = 25;

/// Progress message for split execution
#[derive(Debug, Clone)]
pub enum SplitProgressMessage {
    Progress {
        current: usize,
        total: usize,
        last_copied: String,
    },
    Complete {
        success_count: usize,
        failed_count: usize,
    },
    Cancelled {
        completed_count: usize,
    },
    Error(String),
}

/// A single file that could not be copied. Recorded in the summary and
/// reported at the end of the run; never aborts the remaining copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub error: String,
}

/// What a run actually wrote: the per-split, per-class destination paths
/// plus every per-file failure.
#[derive(Debug, Clone, Default)]
pub struct SplitSummary {
    pub classes: Vec<ClassAssignment>,
    pub failures: Vec<CopyFailure>,
    pub copied_count: usize,
}

impl SplitSummary {
    pub fn total_attempted(&self) -> usize {
        self.copied_count + self.failures.len()
    }
}

/// Fail with [`SplitError::OutputConflict`] when the output root already
/// holds anything and overwrite was not requested. A missing output root is
/// fine; it is created during execution.
pub fn check_output_root(output_root: &Path, overwrite: bool) -> Result<(), SplitError> {
    if !output_root.exists() {
        return Ok(());
    }
    if !output_root.is_dir() {
        return Err(SplitError::OutputConflict(output_root.to_path_buf()));
    }
    let empty = dir_is_empty(output_root).map_err(|e| {
        SplitError::InvalidInput(format!(
            "failed to inspect output root {:?}: {}",
            output_root, e
        ))
    })?;
    if !empty && !overwrite {
        return Err(SplitError::OutputConflict(output_root.to_path_buf()));
    }
    Ok(())
}

/// Copy every planned file into `output_root/<split>/<class>/<filename>`.
///
/// Directories are created on demand. A failed copy is recorded and the run
/// moves on; only cancellation stops it early. The returned summary reflects
/// exactly what reached the disk.
pub fn execute_split(
    plan: &SplitPlan,
    output_root: &Path,
    names: &SplitNames,
    progress_tx: Option<Sender<SplitProgressMessage>>,
    cancel_flag: Option<Arc<AtomicBool>>,
) -> SplitSummary {
    let mut summary = SplitSummary::default();
    let total = plan.total_files();

    if total == 0 {
        warn!("Split plan is empty, nothing to copy");
        if let Some(tx) = progress_tx {
            let _ = tx.send(SplitProgressMessage::Complete {
                success_count: 0,
                failed_count: 0,
            });
        }
        return summary;
    }

    let mut processed = 0;

    for class in &plan.classes {
        let mut written = ClassAssignment::new(class.label.clone());

        for split in SplitName::all() {
            let group = class.get(split);
            if group.is_empty() {
                continue;
            }

            let dest_dir = output_root.join(names.get(split)).join(&class.label);
            if let Err(e) = ensure_dir(&dest_dir) {
                // The whole group is unreachable without its directory;
                // record each file and keep going with the other groups.
                error!("Skipping group {:?}/{:?}: {}", names.get(split), class.label, e);
                if let Some(ref tx) = progress_tx {
                    let _ = tx.send(SplitProgressMessage::Error(format!(
                        "Failed to create destination directory {:?}: {}",
                        dest_dir, e
                    )));
                }
                for src in group {
                    summary.failures.push(CopyFailure {
                        source: src.clone(),
                        dest: dest_dir.join(src.file_name().unwrap_or(OsStr::new(""))),
                        error: e.to_string(),
                    });
                    processed += 1;
                }
                continue;
            }

            for src in group {
                if let Some(ref cancel) = cancel_flag {
                    if cancel.load(Ordering::Relaxed) {
                        warn!("Split cancelled at {}/{}", processed, total);
                        if let Some(ref tx) = progress_tx {
                            let _ = tx.send(SplitProgressMessage::Cancelled {
                                completed_count: processed,
                            });
                        }
                        summary.classes.push(written);
                        return summary;
                    }
                }

                // Join the raw OsStr so non-UTF-8 names keep their identity
                // instead of collapsing onto one lossy destination.
                let filename = src.file_name().unwrap_or(OsStr::new(""));
                let dest = dest_dir.join(filename);

                match copy_file(src, &dest) {
                    Ok(()) => {
                        written.get_mut(split).push(dest);
                        summary.copied_count += 1;
                    }
                    Err(e) => {
                        error!("Failed to copy {:?}: {}", src, e);
                        summary.failures.push(CopyFailure {
                            source: src.clone(),
                            dest,
                            error: e.to_string(),
                        });
                    }
                }

                processed += 1;

                if let Some(ref tx) = progress_tx {
                    if processed % PROGRESS_INTERVAL == 0 || processed == total {
                        let _ = tx.send(SplitProgressMessage::Progress {
                            current: processed,
                            total,
                            last_copied: filename.to_string_lossy().into_owned(),
                        });
                    }
                }
            }
        }

        summary.classes.push(written);
    }

    info!(
        "Split complete: {} copied, {} failed",
        summary.copied_count,
        summary.failures.len()
    );

    if let Some(tx) = progress_tx {
        let _ = tx.send(SplitProgressMessage::Complete {
            success_count: summary.copied_count,
            failed_count: summary.failures.len(),
        });
    }

    summary
}

/// Validate, plan, and execute a full split run.
///
/// All validation (ratio, source tree, output conflict) happens before the
/// first filesystem mutation. After the copies a manifest describing the run
/// is written into the output root; a manifest write failure is logged but
/// does not fail an otherwise successful run.
pub fn run_split(
    config: &SplitConfig,
    progress_tx: Option<Sender<SplitProgressMessage>>,
    cancel_flag: Option<Arc<AtomicBool>>,
) -> Result<SplitSummary, SplitError> {
    config.ratio.validate()?;
    let classes = scan_source_tree(&config.source_root)?;
    check_output_root(&config.output_root, config.overwrite)?;

    let plan = plan_split(&classes, config.ratio, config.seed)?;
    let summary = execute_split(
        &plan,
        &config.output_root,
        &config.names,
        progress_tx,
        cancel_flag,
    );

    let manifest = SplitManifest::from_run(config, &summary);
    match manifest.save(&config.output_root) {
        Ok(path) => info!("Wrote split manifest to {:?}", path),
        Err(e) => warn!("Failed to write split manifest: {}", e),
    }

    Ok(summary)
}
