//! Dependency specification.
//!
//! A Dependency describes what a target requires: another target (in the
//! same project or, by path, in another project of the graph), a package
//! product, or a precompiled binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A dependency of a target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Dependency {
    /// Another target, referenced by name. `project` selects a different
    /// project in the graph; `None` means the owning project.
    Target {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        project: Option<PathBuf>,
    },

    /// A product of a package dependency.
    Package { product: String },

    /// A precompiled binary (framework or library) on disk.
    Binary { path: PathBuf },
}

impl Dependency {
    /// Create a same-project target dependency.
    pub fn target(name: impl Into<String>) -> Self {
        Dependency::Target {
            name: name.into(),
            project: None,
        }
    }

    /// Create a cross-project target dependency.
    pub fn project_target(name: impl Into<String>, project: impl Into<PathBuf>) -> Self {
        Dependency::Target {
            name: name.into(),
            project: Some(project.into()),
        }
    }

    /// Create a package product dependency.
    pub fn package(product: impl Into<String>) -> Self {
        Dependency::Package {
            product: product.into(),
        }
    }

    /// Create a precompiled binary dependency.
    pub fn binary(path: impl Into<PathBuf>) -> Self {
        Dependency::Binary { path: path.into() }
    }

    /// Check if this is a target reference.
    pub fn is_target(&self) -> bool {
        matches!(self, Dependency::Target { .. })
    }

    /// The referenced target name, if this is a target reference.
    pub fn target_name(&self) -> Option<&str> {
        match self {
            Dependency::Target { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The referenced project path, if this is a cross-project reference.
    pub fn project_path(&self) -> Option<&Path> {
        match self {
            Dependency::Target { project, .. } => project.as_deref(),
            _ => None,
        }
    }
}
