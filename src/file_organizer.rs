/// File relocation into extension-named destination folders.
///
/// This module owns the mechanics of the move phase: making sure the
/// destination folder for a category exists directly under the root,
/// resolving name collisions by numeric suffixing, and relocating the file.
/// The set of destination folders created or reused during a run is tracked
/// in a [`DestinationSet`] so that traversal and cleanup can exclude them.
use crate::file_category::Category;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// The destination folders registered during one run.
///
/// Holds the absolute paths of category folders directly under the root.
/// The set only ever grows, and never contains the root itself. It is owned
/// by the orchestrator and threaded by reference through the move and
/// cleanup phases.
#[derive(Debug, Default)]
pub struct DestinationSet {
    dirs: HashSet<PathBuf>,
}

impl DestinationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a destination folder.
    pub fn register(&mut self, dir: PathBuf) {
        self.dirs.insert(dir);
    }

    /// Returns true if `path` is a registered destination folder.
    pub fn contains(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    /// Number of registered destination folders.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Returns true if no destination folder has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// What happened to a single file handed to the organizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The file was relocated to `destination`.
    Moved {
        /// The resolved, collision-free destination path.
        destination: PathBuf,
    },
    /// The file already sits at its resolved destination; nothing was done.
    AlreadyInPlace,
}

/// Errors that can occur while organizing a single file.
///
/// These are per-file errors: the orchestrator reports them and continues
/// with the next file.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to create a category folder under the root.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to relocate a file to its destination.
    FileMoveFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves files into category folders under a root directory.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves `file_path` into the folder for `category` under `root`.
    ///
    /// The category folder is created on first use and registered in
    /// `destinations` whether it was freshly created or already existed.
    /// The destination name is resolved by linear probing: first the file's
    /// own name, then `stem_1.ext`, `stem_2.ext`, … until a candidate is
    /// unoccupied. A candidate occupied by the source file itself terminates
    /// the probe: the file is already organized and is left untouched.
    ///
    /// # Arguments
    ///
    /// * `root` - The directory being organized; category folders live directly under it
    /// * `destinations` - The run's destination-folder set, updated on success
    /// * `file_path` - Absolute path of the file to relocate
    /// * `category` - The category derived from the file's name
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extidy::file_category::Category;
    /// use extidy::file_organizer::{DestinationSet, FileOrganizer};
    /// use std::path::Path;
    ///
    /// let root = Path::new("/data/inbox");
    /// let file = root.join("sub/report.txt");
    /// let mut destinations = DestinationSet::new();
    ///
    /// let outcome = FileOrganizer::move_to_category(
    ///     root,
    ///     &mut destinations,
    ///     &file,
    ///     &Category::for_path(&file),
    /// );
    /// match outcome {
    ///     Ok(o) => println!("{:?}", o),
    ///     Err(e) => eprintln!("Error: {}", e),
    /// }
    /// ```
    pub fn move_to_category(
        root: &Path,
        destinations: &mut DestinationSet,
        file_path: &Path,
        category: &Category,
    ) -> OrganizeResult<MoveOutcome> {
        let category_path = root.join(category.dir_name());

        if !category_path.exists() {
            fs::create_dir(&category_path).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: category_path.clone(),
                source: e,
            })?;
        }
        // Pre-existing folders are registered too, so cleanup protects them
        // and traversal stops descending into them.
        destinations.register(category_path.clone());

        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailed {
                source: file_path.to_path_buf(),
                destination: category_path.clone(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let mut destination = category_path.join(file_name);
        let mut counter = 1;
        while destination.exists() && destination != file_path {
            destination = category_path.join(numbered_name(Path::new(file_name), counter));
            counter += 1;
        }

        if destination == file_path {
            return Ok(MoveOutcome::AlreadyInPlace);
        }

        fs::rename(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailed {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(MoveOutcome::Moved { destination })
    }
}

/// Builds the `counter`-th disambiguated variant of a file name.
///
/// The numeric suffix goes between the stem and the extension, and the
/// extension keeps its original spelling: `Report.TXT` → `Report_1.TXT`,
/// `notes` → `notes_1`.
fn numbered_name(file_name: &Path, counter: u32) -> String {
    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.extension() {
        Some(ext) => format!("{}_{}.{}", stem, counter, ext.to_string_lossy()),
        None => format!("{}_{}", stem, counter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn category_for(path: &Path) -> Category {
        Category::for_path(path)
    }

    #[test]
    fn test_move_creates_and_registers_category_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        let file_path = root.join("test.txt");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        let mut destinations = DestinationSet::new();
        let outcome = FileOrganizer::move_to_category(
            root,
            &mut destinations,
            &file_path,
            &category_for(&file_path),
        )
        .expect("Failed to move file");

        let category_dir = root.join("txt");
        assert!(category_dir.is_dir());
        assert!(destinations.contains(&category_dir));
        assert!(!file_path.exists());
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                destination: category_dir.join("test.txt")
            }
        );
    }

    #[test]
    fn test_move_registers_pre_existing_category_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        let category_dir = root.join("png");
        fs::create_dir(&category_dir).expect("Failed to create category directory");

        let file_path = root.join("photo.png");
        fs::write(&file_path, "image data").expect("Failed to write test file");

        let mut destinations = DestinationSet::new();
        FileOrganizer::move_to_category(
            root,
            &mut destinations,
            &file_path,
            &category_for(&file_path),
        )
        .expect("Failed to move file");

        assert!(destinations.contains(&category_dir));
        assert!(category_dir.join("photo.png").exists());
    }

    #[test]
    fn test_collision_appends_numeric_suffix() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        fs::create_dir(root.join("sub")).expect("Failed to create subdirectory");
        fs::write(root.join("report.txt"), "first").expect("Failed to write file");
        fs::write(root.join("sub/report.txt"), "second").expect("Failed to write file");

        let mut destinations = DestinationSet::new();
        let first = root.join("report.txt");
        FileOrganizer::move_to_category(root, &mut destinations, &first, &category_for(&first))
            .expect("Failed to move first file");

        let second = root.join("sub/report.txt");
        let outcome =
            FileOrganizer::move_to_category(root, &mut destinations, &second, &category_for(&second))
                .expect("Failed to move second file");

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                destination: root.join("txt/report_1.txt")
            }
        );
        assert_eq!(
            fs::read_to_string(root.join("txt/report.txt")).unwrap(),
            "first"
        );
        assert_eq!(
            fs::read_to_string(root.join("txt/report_1.txt")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_probe_finds_smallest_free_counter() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        fs::create_dir(root.join("txt")).expect("Failed to create category directory");
        fs::write(root.join("txt/report.txt"), "a").expect("Failed to write file");
        fs::write(root.join("txt/report_1.txt"), "b").expect("Failed to write file");

        let file_path = root.join("report.txt");
        fs::write(&file_path, "c").expect("Failed to write file");

        let mut destinations = DestinationSet::new();
        let outcome = FileOrganizer::move_to_category(
            root,
            &mut destinations,
            &file_path,
            &category_for(&file_path),
        )
        .expect("Failed to move file");

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                destination: root.join("txt/report_2.txt")
            }
        );
    }

    #[test]
    fn test_file_already_at_resolved_destination_is_skipped() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        fs::create_dir(root.join("txt")).expect("Failed to create category directory");
        let organized = root.join("txt/report.txt");
        fs::write(&organized, "content").expect("Failed to write file");

        let mut destinations = DestinationSet::new();
        let outcome = FileOrganizer::move_to_category(
            root,
            &mut destinations,
            &organized,
            &category_for(&organized),
        )
        .expect("Move should not fail");

        assert_eq!(outcome, MoveOutcome::AlreadyInPlace);
        assert!(organized.exists());
        assert_eq!(fs::read_to_string(&organized).unwrap(), "content");
    }

    #[test]
    fn test_extensionless_collision_suffix() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        fs::create_dir(root.join("sub")).expect("Failed to create subdirectory");
        fs::write(root.join("notes"), "first").expect("Failed to write file");
        fs::write(root.join("sub/notes"), "second").expect("Failed to write file");

        let mut destinations = DestinationSet::new();
        let first = root.join("notes");
        FileOrganizer::move_to_category(root, &mut destinations, &first, &category_for(&first))
            .expect("Failed to move first file");
        let second = root.join("sub/notes");
        FileOrganizer::move_to_category(root, &mut destinations, &second, &category_for(&second))
            .expect("Failed to move second file");

        assert!(root.join("no-extension/notes").exists());
        assert!(root.join("no-extension/notes_1").exists());
    }

    #[test]
    fn test_numbered_name_preserves_extension_case() {
        assert_eq!(numbered_name(Path::new("Report.TXT"), 1), "Report_1.TXT");
        assert_eq!(numbered_name(Path::new("notes"), 3), "notes_3");
        assert_eq!(numbered_name(Path::new(".bashrc"), 1), ".bashrc_1");
        assert_eq!(numbered_name(Path::new("a.tar.gz"), 2), "a.tar_2.gz");
    }
}
