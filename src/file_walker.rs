//! Top-down file discovery for the move phase.
//!
//! Walks the tree depth-first, parent before children, classifying each
//! regular file by extension. Directories that are registered destination
//! folders are pruned together with their contents, which keeps files that
//! were just organized from being picked up again in the same pass.

use crate::file_category::Category;
use crate::file_organizer::DestinationSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A lazy sequence of `(file, category)` pairs under a root directory.
///
/// The walker is pulled one file at a time so the caller can grow the
/// destination-folder set between pulls; the exclusion check always sees the
/// current state of the set.
pub struct FileWalker {
    it: walkdir::IntoIter,
}

impl FileWalker {
    /// Starts a walk rooted at `root`.
    ///
    /// Entries are visited in file-name order within each directory, so runs
    /// over the same tree are deterministic. Symlinks are not followed.
    pub fn new(root: &Path) -> Self {
        FileWalker {
            it: WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter(),
        }
    }

    /// Pulls the next file outside any excluded directory.
    ///
    /// Returns `Some(Ok(...))` with the file's path and category,
    /// `Some(Err(...))` for a traversal error the caller should report and
    /// skip past (the walk itself continues with sibling entries), or `None`
    /// once the tree is exhausted.
    pub fn next_file(
        &mut self,
        excluded: &DestinationSet,
    ) -> Option<Result<(PathBuf, Category), walkdir::Error>> {
        loop {
            let entry = match self.it.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };

            if entry.file_type().is_dir() && excluded.contains(entry.path()) {
                self.it.skip_current_dir();
                continue;
            }

            if entry.file_type().is_file() {
                let path = entry.into_path();
                let category = Category::for_path(&path);
                return Some(Ok((path, category)));
            }
        }
    }
}
