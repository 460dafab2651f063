//! Configuration root discovery.
//!
//! Walks upward from a query path until it finds a directory carrying a
//! recognized marker: the well-known configuration subdirectory or a
//! version-control directory. Results are memoized for the query path and
//! every ancestor visited on the way, so repeated lookups anchored
//! anywhere along a resolved chain are cache hits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Name of the well-known configuration subdirectory marking a root.
pub const CONFIG_DIRECTORY_NAME: &str = "Slipway";

/// Version-control marker directory, accepted as a root marker too.
pub const VCS_DIRECTORY_NAME: &str = ".git";

/// Filesystem probing capability consumed by [`RootLocator`].
///
/// Injected so tests can count probes and production code stays off the
/// real filesystem until it has missed the cache.
pub trait FileProbe: Send + Sync {
    /// Check whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether `path` is a directory.
    fn is_directory(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Default)]
pub struct NativeFileProbe;

impl FileProbe for NativeFileProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Upward root discovery with a memoizing cache.
///
/// The cache maps every visited path to its discovered root, lives as
/// long as the locator, and is never evicted: the directory structure is
/// assumed stable for the process lifetime. A single mutex guards the
/// whole map; writes are rare relative to reads.
pub struct RootLocator<P: FileProbe> {
    probe: P,
    cache: Mutex<HashMap<PathBuf, PathBuf>>,
}

impl Default for RootLocator<NativeFileProbe> {
    fn default() -> Self {
        RootLocator::new(NativeFileProbe)
    }
}

impl<P: FileProbe> RootLocator<P> {
    /// Create a locator over the given probe.
    pub fn new(probe: P) -> Self {
        RootLocator {
            probe,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Locate the configuration root for `path`.
    ///
    /// Returns `None` when no marker is found all the way up to the
    /// filesystem root. Absence is not an error; the caller decides
    /// fallback policy.
    pub fn locate(&self, path: &Path) -> Option<PathBuf> {
        let mut visited: Vec<PathBuf> = Vec::new();
        let mut current = path.to_path_buf();

        loop {
            if let Some(root) = self.cached(&current) {
                tracing::debug!(path = %current.display(), root = %root.display(), "root cache hit");
                self.record(&visited, &root);
                return Some(root);
            }

            visited.push(current.clone());

            if self.is_root(&current) {
                self.record(&visited, &current);
                return Some(current);
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    tracing::debug!(path = %path.display(), "no configuration root found");
                    return None;
                }
            }
        }
    }

    fn cached(&self, path: &Path) -> Option<PathBuf> {
        self.cache.lock().unwrap().get(path).cloned()
    }

    /// Record `root` for every path visited during a walk, in one
    /// exclusive section.
    fn record(&self, visited: &[PathBuf], root: &Path) {
        let mut cache = self.cache.lock().unwrap();
        for path in visited {
            cache.insert(path.clone(), root.to_path_buf());
        }
    }

    fn is_root(&self, directory: &Path) -> bool {
        self.probe
            .is_directory(&directory.join(CONFIG_DIRECTORY_NAME))
            || self.probe.is_directory(&directory.join(VCS_DIRECTORY_NAME))
    }
}
