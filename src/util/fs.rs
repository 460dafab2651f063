//! Filesystem utilities.
//!
//! The core performs no file I/O of its own; these helpers cover path
//! arithmetic and the one recursive source match plugin synthesis needs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Find files matching a glob pattern relative to a base directory.
///
/// Results are sorted and deduplicated so callers never observe
/// enumeration order.
pub fn glob_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let mut results = Vec::new();
    for entry in
        glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
    {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Get the relative path from `base` to `path`.
///
/// Falls back to `path` unchanged when no relative form exists (different
/// roots).
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// The file name of `path`'s containing directory, if any.
pub fn containing_directory_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files_sorted() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("b.swift"), "").unwrap();
        fs::write(src.join("a.swift"), "").unwrap();
        fs::write(src.join("nested").join("c.swift"), "").unwrap();
        fs::write(src.join("notes.txt"), "").unwrap();

        let files = glob_files(tmp.path(), "**/*.swift").unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/a/b"), Path::new("/a/b/c/d")),
            PathBuf::from("c/d")
        );
        assert_eq!(
            relative_path(Path::new("/a/b/c"), Path::new("/a/x")),
            PathBuf::from("../../x")
        );
    }

    #[test]
    fn test_containing_directory_name() {
        assert_eq!(
            containing_directory_name(Path::new("/src/App/Project.swift")),
            Some("App".to_string())
        );
        assert_eq!(containing_directory_name(Path::new("/")), None);
    }
}
