use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::{atomic::AtomicBool, Arc};
use std::thread;

use anyhow::Context as _;
use clap::Parser;
use tracing::{error, info, warn};

use split_image_dataset::config::SplitConfig;
use split_image_dataset::core::dataset::SplitNames;
use split_image_dataset::core::splitter::{
    run_split, SplitProgressMessage, SplitRatio, DEFAULT_SEED,
};
use split_image_dataset::infrastructure::logging::setup_logging;

#[derive(Debug, Parser)]
#[command(
    name = "split-image-dataset",
    about = "Split a class-labeled image dataset into train/val/test folders"
)]
struct Args {
    /// Source dataset root (one subdirectory per class).
    #[arg(short, long, required_unless_present = "config")]
    input: Option<PathBuf>,

    /// Output root for the split tree.
    #[arg(short, long, required_unless_present = "config")]
    output: Option<PathBuf>,

    /// Train/val/test proportions; must sum to 1.0.
    #[arg(long, num_args = 3, value_names = ["TRAIN", "VAL", "TEST"],
          default_values_t = [0.7, 0.1, 0.2])]
    ratio: Vec<f64>,

    /// Shuffle seed for reproducible splits.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Allow writing into an existing, non-empty output directory.
    #[arg(long)]
    overwrite: bool,

    /// Override the three output directory names.
    #[arg(long, num_args = 3, value_names = ["TRAIN", "VAL", "TEST"])]
    names: Option<Vec<String>>,

    /// Load the run configuration from a JSON file instead of flags.
    #[arg(long, conflicts_with_all = ["input", "output"])]
    config: Option<PathBuf>,
}

fn build_config(args: &Args) -> anyhow::Result<SplitConfig> {
    if let Some(path) = &args.config {
        return SplitConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    // clap guarantees both paths are present when --config is absent
    let input = args.input.clone().context("--input is required")?;
    let output = args.output.clone().context("--output is required")?;

    let mut config = SplitConfig::new(input, output);
    config.ratio = SplitRatio {
        train: args.ratio[0],
        val: args.ratio[1],
        test: args.ratio[2],
    };
    config.seed = args.seed;
    config.overwrite = args.overwrite;
    if let Some(names) = &args.names {
        config.names = SplitNames {
            train: names[0].clone(),
            val: names[1].clone(),
            test: names[2].clone(),
        };
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let args = Args::parse();
    let config = build_config(&args)?;

    info!(
        "Splitting {:?} into {:?} with ratio {}/{}/{} (seed {})",
        config.source_root,
        config.output_root,
        config.ratio.train,
        config.ratio.val,
        config.ratio.test,
        config.seed
    );

    let (tx, rx) = channel::<SplitProgressMessage>();
    let cancel_flag = Arc::new(AtomicBool::new(false));

    let worker_config = config.clone();
    let worker_cancel = cancel_flag.clone();
    let worker = thread::spawn(move || run_split(&worker_config, Some(tx), Some(worker_cancel)));

    // The channel closes when the worker drops its sender.
    for message in rx {
        match message {
            SplitProgressMessage::Progress {
                current,
                total,
                last_copied,
            } => info!("Copied {}/{} files (last: {})", current, total, last_copied),
            SplitProgressMessage::Complete {
                success_count,
                failed_count,
            } => info!(
                "Copy phase finished: {} succeeded, {} failed",
                success_count, failed_count
            ),
            SplitProgressMessage::Cancelled { completed_count } => {
                warn!("Split cancelled after {} files", completed_count)
            }
            SplitProgressMessage::Error(msg) => error!("{}", msg),
        }
    }

    let summary = worker
        .join()
        .map_err(|_| anyhow::anyhow!("split worker panicked"))?
        .with_context(|| format!("failed to split {}", config.source_root.display()))?;

    for class in &summary.classes {
        info!(
            "Class {:?}: train={} val={} test={}",
            class.label,
            class.train.len(),
            class.val.len(),
            class.test.len()
        );
    }

    if !summary.failures.is_empty() {
        for failure in &summary.failures {
            error!("Failed to copy {:?}: {}", failure.source, failure.error);
        }
        anyhow::bail!(
            "{} of {} files failed to copy",
            summary.failures.len(),
            summary.total_attempted()
        );
    }

    info!(
        "Done: {} files copied to {:?}",
        summary.copied_count, config.output_root
    );
    Ok(())
}
