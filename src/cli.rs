//! Command-line orchestration for extidy.
//!
//! This module wires the pipeline together:
//! - Root path validation
//! - The move phase (walk, classify, relocate, narrate)
//! - The cleanup confirmation and the cleanup phase
//! - Summary rendering
//!
//! The cleanup decision is injected as a closure so the whole pipeline runs
//! unchanged under tests, without a terminal attached.

use crate::cleanup::{CleanupManager, CleanupReport};
use crate::file_organizer::{DestinationSet, FileOrganizer, MoveOutcome};
use crate::file_walker::FileWalker;
use crate::output::OutputFormatter;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The user's answer to the empty-directory cleanup prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupChoice {
    /// Remove empty directories.
    Remove,
    /// Leave the tree as it is.
    Keep,
}

impl CleanupChoice {
    /// Interprets raw prompt input.
    ///
    /// The affirmative tokens are `s`, `si` and `yes`, case-insensitive and
    /// whitespace-trimmed. Anything else keeps the empty directories, which
    /// is never an error.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "s" | "si" | "yes" => CleanupChoice::Remove,
            _ => CleanupChoice::Keep,
        }
    }
}

/// Fatal errors that prevent a run from starting.
///
/// Everything past root validation is reported per-item and never aborts
/// the run; these are the only errors that do.
#[derive(Debug)]
pub enum RunError {
    /// The given root path does not exist.
    RootNotFound(PathBuf),
    /// The given root path exists but is not a directory.
    RootNotADirectory(PathBuf),
    /// The root path could not be resolved to an absolute path.
    RootResolveFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound(path) => {
                write!(f, "The path '{}' does not exist", path.display())
            }
            Self::RootNotADirectory(path) => {
                write!(f, "The path '{}' is not a directory", path.display())
            }
            Self::RootResolveFailed { path, source } => {
                write!(f, "Could not resolve path '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RunError {}

/// Tallies accumulated over one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files actually relocated. Already-in-place skips do not count.
    pub moved_files: usize,
    /// Files found already at their resolved destination.
    pub skipped_files: usize,
    /// Per-file failures: traversal errors, folder creation, failed moves.
    pub move_failures: usize,
    /// Moved-file counts keyed by category folder name.
    pub category_counts: HashMap<String, usize>,
    /// Present when the cleanup phase ran.
    pub cleanup: Option<CleanupReport>,
}

/// Runs the whole organize pipeline over `dir_path`.
///
/// Validates the root, moves every file in the tree into its extension
/// folder, then asks `confirm_cleanup` whether to remove empty directories.
/// Per-item failures are reported and counted but never abort the run; the
/// only error this function returns is a root that cannot be validated.
///
/// # Arguments
///
/// * `dir_path` - The directory to organize; relative paths resolve against
///   the current working directory
/// * `confirm_cleanup` - Called once, after the move phase, to decide
///   whether empty directories are removed
///
/// # Examples
///
/// ```no_run
/// use extidy::cli::{run_cli, CleanupChoice};
/// use std::path::Path;
///
/// let result = run_cli(Path::new("/data/inbox"), || CleanupChoice::Keep);
/// match result {
///     Ok(summary) => println!("Moved {} files", summary.moved_files),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(
    dir_path: &Path,
    confirm_cleanup: impl FnOnce() -> CleanupChoice,
) -> Result<RunSummary, RunError> {
    let root = validate_root(dir_path)?;

    OutputFormatter::info(&format!("Organizing contents of: {}", root.display()));
    let (mut summary, destinations) = organize_tree(&root);

    OutputFormatter::success(&format!(
        "Move phase complete. {} file(s) moved.",
        summary.moved_files
    ));
    if summary.move_failures > 0 {
        OutputFormatter::warning(&format!(
            "{} file(s) could not be processed. Please review errors above.",
            summary.move_failures
        ));
    }
    if !summary.category_counts.is_empty() {
        OutputFormatter::summary_table(&summary.category_counts, summary.moved_files);
    }

    match confirm_cleanup() {
        CleanupChoice::Remove => {
            OutputFormatter::header("Removing empty directories...");
            let report = CleanupManager::remove_empty_dirs(&root, &destinations);

            for dir in &report.removed_dirs {
                OutputFormatter::success(&format!("Removed empty directory: {}", dir.display()));
            }
            OutputFormatter::plain(&format!(
                "Empty directories removed: {}",
                report.removed_dirs.len()
            ));
            if !report.is_complete_success() {
                for (path, reason) in &report.failed_removals {
                    OutputFormatter::error(&format!(
                        "Could not remove {}: {}",
                        path.display(),
                        reason
                    ));
                }
                OutputFormatter::warning(&format!(
                    "Directories that could not be removed: {}",
                    report.failed_removals.len()
                ));
            }

            summary.cleanup = Some(report);
        }
        CleanupChoice::Keep => {
            OutputFormatter::plain("Empty directories were left untouched.");
        }
    }

    Ok(summary)
}

/// Checks that the root exists and is a directory, then resolves it to an
/// absolute path so every later comparison works on one canonical form.
fn validate_root(path: &Path) -> Result<PathBuf, RunError> {
    if !path.exists() {
        return Err(RunError::RootNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(RunError::RootNotADirectory(path.to_path_buf()));
    }
    fs::canonicalize(path).map_err(|e| RunError::RootResolveFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// The move phase: pulls files from the walker one at a time and hands each
/// to the organizer, narrating as it goes.
///
/// Destination folders registered while moving are excluded from the rest of
/// the walk, so files are never organized twice in one pass.
fn organize_tree(root: &Path) -> (RunSummary, DestinationSet) {
    let mut summary = RunSummary::default();
    let mut destinations = DestinationSet::new();
    let mut walker = FileWalker::new(root);

    let spinner = OutputFormatter::create_spinner("Scanning for files to organize...");

    while let Some(item) = walker.next_file(&destinations) {
        let (path, category) = match item {
            Ok(found) => found,
            Err(e) => {
                spinner.suspend(|| {
                    OutputFormatter::error(&format!("Skipping unreadable entry: {}", e));
                });
                summary.move_failures += 1;
                continue;
            }
        };

        spinner.set_message(format!("Examining {}", path.display()));

        match FileOrganizer::move_to_category(root, &mut destinations, &path, &category) {
            Ok(MoveOutcome::Moved { destination }) => {
                spinner.println(format!("{} → {}", path.display(), destination.display()));
                summary.moved_files += 1;
                *summary
                    .category_counts
                    .entry(category.dir_name().to_string())
                    .or_insert(0) += 1;
            }
            Ok(MoveOutcome::AlreadyInPlace) => {
                spinner.println(format!(
                    "Skipping {}: already at its destination.",
                    path.display()
                ));
                summary.skipped_files += 1;
            }
            Err(e) => {
                spinner.suspend(|| OutputFormatter::error(&e.to_string()));
                summary.move_failures += 1;
            }
        }
    }

    spinner.finish_and_clear();
    (summary, destinations)
}
