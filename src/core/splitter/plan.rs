use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::dataset::{ClassDir, SplitName};

use super::SplitError;

/// Default shuffle seed, matching the common convention for reproducible runs.
pub const DEFAULT_SEED: u64 = 42;

/// Maximum allowed deviation of the ratio sum from 1.0.
pub const RATIO_SUM_TOLERANCE: f64 = 1e-6;

/// Target proportions for the train/val/test splits, applied per class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatio {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self {
            train: 0.7,
            val: 0.1,
            test: 0.2,
        }
    }
}

impl SplitRatio {
    pub fn new(train: f64, val: f64, test: f64) -> Result<Self, SplitError> {
        let ratio = Self { train, val, test };
        ratio.validate()?;
        Ok(ratio)
    }

    /// Get the target ratio for a specific split
    pub fn get(&self, split: SplitName) -> f64 {
        match split {
            SplitName::Train => self.train,
            SplitName::Val => self.val,
            SplitName::Test => self.test,
        }
    }

    /// Check the ratio invariant: every component non-negative and the sum
    /// equal to 1.0 within [`RATIO_SUM_TOLERANCE`].
    pub fn validate(&self) -> Result<(), SplitError> {
        for (name, value) in [("train", self.train), ("val", self.val), ("test", self.test)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SplitError::InvalidRatio(format!(
                    "{} ratio must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        let sum = self.train + self.val + self.test;
        if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(SplitError::InvalidRatio(format!(
                "ratios must sum to 1.0, got {} + {} + {} = {}",
                self.train, self.val, self.test, sum
            )));
        }
        Ok(())
    }
}

/// The files of one class assigned to each split.
#[derive(Debug, Clone, Default)]
pub struct ClassAssignment {
    pub label: String,
    pub train: Vec<PathBuf>,
    pub val: Vec<PathBuf>,
    pub test: Vec<PathBuf>,
}

impl ClassAssignment {
    pub fn new(label: String) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    pub fn get(&self, split: SplitName) -> &[PathBuf] {
        match split {
            SplitName::Train => &self.train,
            SplitName::Val => &self.val,
            SplitName::Test => &self.test,
        }
    }

    pub fn get_mut(&mut self, split: SplitName) -> &mut Vec<PathBuf> {
        match split {
            SplitName::Train => &mut self.train,
            SplitName::Val => &mut self.val,
            SplitName::Test => &mut self.test,
        }
    }

    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }
}

/// A complete split assignment over all classes, ready to execute.
#[derive(Debug, Clone, Default)]
pub struct SplitPlan {
    pub classes: Vec<ClassAssignment>,
    pub ratio: SplitRatio,
    pub seed: u64,
}

impl SplitPlan {
    pub fn is_empty(&self) -> bool {
        self.classes.iter().all(|c| c.total() == 0)
    }

    pub fn total_files(&self) -> usize {
        self.classes.iter().map(|c| c.total()).sum()
    }
}

/// Build the per-class RNG from the run seed and the class label.
///
/// The label is folded into the seed with FNV-1a so that reusing one seed
/// does not give every class the same permutation. ChaCha8 keeps the
/// stream identical across platforms and releases.
fn class_rng(seed: u64, label: &str) -> ChaCha8Rng {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in label.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    ChaCha8Rng::seed_from_u64(seed ^ hash)
}

/// Assign every file of every class to a split.
///
/// Per class: shuffle the sorted file list with the seeded RNG, then take
/// `floor(ratio.train * total)` files for train, `floor(ratio.val * total)`
/// for val, and everything left for test. Absorbing the rounding remainder
/// into test guarantees the three counts always sum to the class total; a
/// single-file class with a ratio like (0.7, 0.1, 0.2) therefore lands its
/// one file in test.
pub fn plan_split(
    classes: &[ClassDir],
    ratio: SplitRatio,
    seed: u64,
) -> Result<SplitPlan, SplitError> {
    ratio.validate()?;

    let mut plan = SplitPlan {
        classes: Vec::with_capacity(classes.len()),
        ratio,
        seed,
    };

    for class in classes {
        let mut files = class.files.clone();
        let total = files.len();

        let mut rng = class_rng(seed, &class.label);
        files.shuffle(&mut rng);

        // The min() guards cover ratio sums sitting just above 1.0 inside
        // the validation tolerance.
        let n_train = ((ratio.train * total as f64).floor() as usize).min(total);
        let n_val = (ratio.val * total as f64).floor() as usize;

        let mut rest = files.split_off(n_train);
        let test = rest.split_off(n_val.min(rest.len()));

        debug!(
            "Class {:?}: {} files -> train={} val={} test={}",
            class.label,
            total,
            files.len(),
            rest.len(),
            test.len()
        );

        plan.classes.push(ClassAssignment {
            label: class.label.clone(),
            train: files,
            val: rest,
            test,
        });
    }

    info!(
        "Planned split of {} files across {} classes (seed {})",
        plan.total_files(),
        plan.classes.len(),
        seed
    );

    Ok(plan)
}
