/// Empty-directory removal after the move phase.
///
/// This module sweeps the tree bottom-up and removes directories that ended
/// up empty, reporting what was removed and what could not be. The root
/// itself and every registered destination folder are never removed, no
/// matter how empty they are.
use crate::file_organizer::DestinationSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The result of one cleanup sweep.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Directories that were removed, in removal order.
    pub removed_dirs: Vec<PathBuf>,
    /// Directories that could not be removed, with the reason.
    pub failed_removals: Vec<(PathBuf, String)>,
}

impl CleanupReport {
    fn new() -> Self {
        Self::default()
    }

    /// Returns true if every attempted removal succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.failed_removals.is_empty()
    }
}

/// Removes empty directories left behind by the move phase.
pub struct CleanupManager;

impl CleanupManager {
    /// Sweeps `root` bottom-up and removes every empty directory except the
    /// root itself and the members of `protected`.
    ///
    /// Children are fully processed — including their own removal — before
    /// their parent is considered, so chains of nested empty directories
    /// collapse in one sweep. Emptiness is probed live at check time; a
    /// directory that gains an entry between the check and the removal shows
    /// up as a failed removal, not a crash.
    ///
    /// # Arguments
    ///
    /// * `root` - The directory that was organized; never removed
    /// * `protected` - The run's destination folders; never removed
    ///
    /// # Returns
    ///
    /// A [`CleanupReport`] listing removed directories and per-directory
    /// failures. Failures never abort the remaining sweep.
    pub fn remove_empty_dirs(root: &Path, protected: &DestinationSet) -> CleanupReport {
        let mut report = CleanupReport::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .contents_first(true)
            .min_depth(1);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    report.failed_removals.push((path, e.to_string()));
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            if protected.contains(path) {
                continue;
            }

            match Self::remove_if_empty(path) {
                Ok(true) => report.removed_dirs.push(path.to_path_buf()),
                Ok(false) => {}
                Err(reason) => report.failed_removals.push((path.to_path_buf(), reason)),
            }
        }

        report
    }

    /// Removes `path` if it currently has no entries.
    ///
    /// Returns `Ok(true)` when the directory was removed, `Ok(false)` when it
    /// was not empty, and `Err(reason)` when probing or removal failed.
    fn remove_if_empty(path: &Path) -> Result<bool, String> {
        let mut entries =
            fs::read_dir(path).map_err(|e| format!("could not inspect directory: {}", e))?;

        if entries.next().is_some() {
            return Ok(false);
        }

        fs::remove_dir(path).map_err(|e| format!("could not remove directory: {}", e))?;
        Ok(true)
    }
}
