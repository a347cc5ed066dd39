/// File categorization by extension.
///
/// A file's category is the lowercased last extension of its name, without
/// the leading dot. Files with no extension fall into the `no-extension`
/// category. Multi-dot names are classified by the last component only
/// (`archive.tar.gz` → `gz`).
///
/// # Examples
///
/// ```
/// use extidy::file_category::Category;
/// use std::path::Path;
///
/// assert_eq!(Category::for_path(Path::new("photo.JPG")).dir_name(), "jpg");
/// assert_eq!(Category::for_path(Path::new("archive.tar.gz")).dir_name(), "gz");
/// assert_eq!(Category::for_path(Path::new("Makefile")).dir_name(), "no-extension");
/// ```
use std::path::Path;

/// Directory name used for files without an extension.
pub const NO_EXTENSION: &str = "no-extension";

/// The target category of a single file, derived from its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    name: String,
}

impl Category {
    /// Derives the category for a file path from its final extension.
    ///
    /// Leading-dot names with no further dot (`.bashrc`) and trailing-dot
    /// names (`file.`, whose extension is empty) both map to the
    /// `no-extension` category.
    pub fn for_path(path: &Path) -> Self {
        let name = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| NO_EXTENSION.to_string());

        Category { name }
    }

    /// Returns the name of the destination folder for this category.
    pub fn dir_name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_extension_is_lowercased() {
        assert_eq!(Category::for_path(Path::new("report.TXT")).dir_name(), "txt");
        assert_eq!(Category::for_path(Path::new("photo.jpeg")).dir_name(), "jpeg");
    }

    #[test]
    fn test_multi_dot_name_uses_last_suffix() {
        assert_eq!(
            Category::for_path(Path::new("backup.tar.gz")).dir_name(),
            "gz"
        );
        assert_eq!(Category::for_path(Path::new("v1.2.3.log")).dir_name(), "log");
    }

    #[test]
    fn test_no_extension_sentinel() {
        assert_eq!(
            Category::for_path(Path::new("Makefile")).dir_name(),
            NO_EXTENSION
        );
    }

    #[test]
    fn test_leading_dot_name_has_no_extension() {
        assert_eq!(
            Category::for_path(Path::new(".bashrc")).dir_name(),
            NO_EXTENSION
        );
        // A dot-file with a real extension still classifies normally.
        assert_eq!(
            Category::for_path(Path::new(".config.toml")).dir_name(),
            "toml"
        );
    }

    #[test]
    fn test_trailing_dot_name_has_no_extension() {
        assert_eq!(
            Category::for_path(Path::new("file.")).dir_name(),
            NO_EXTENSION
        );
    }

    #[test]
    fn test_full_path_classifies_by_file_name_only() {
        assert_eq!(
            Category::for_path(Path::new("/some/dir.with.dots/notes.md")).dir_name(),
            "md"
        );
    }
}
