//! Workspace - a named collection of member projects.
//!
//! Also home to the structural element tree: the externally enumerated
//! file/group/project hierarchy describing on-disk layout, independent of
//! the dependency graph.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extension of generated project bundles.
pub const PROJECT_BUNDLE_EXTENSION: &str = "xcodeproj";

/// Extension of generated workspace bundles.
pub const WORKSPACE_BUNDLE_EXTENSION: &str = "xcworkspace";

/// A workspace presenting member projects as one navigable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace name
    name: String,

    /// On-disk path of the workspace bundle
    path: PathBuf,

    /// Member project paths. Order is significant for generated layout
    /// only, not semantics; duplicates are rejected on insert.
    projects: Vec<PathBuf>,
}

impl Workspace {
    /// Create a new workspace with no members.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Workspace {
            name: name.into(),
            path: path.into(),
            projects: Vec::new(),
        }
    }

    /// Create a workspace with the given members, dropping duplicates
    /// while preserving first-occurrence order.
    pub fn with_projects(mut self, projects: Vec<PathBuf>) -> Self {
        self.projects.clear();
        for project in projects {
            self.add_project(project);
        }
        self
    }

    /// Add a member project. Duplicate paths are ignored.
    pub fn add_project(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.projects.contains(&path) {
            self.projects.push(path);
        }
    }

    /// Get the workspace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the workspace bundle path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the member project paths.
    pub fn projects(&self) -> &[PathBuf] {
        &self.projects
    }
}

/// One element of the structural tree handed to the assembler.
///
/// This is a tree, not a graph: children are owned vectors, there are no
/// shared sub-trees and no cycles, so plain ownership suffices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkspaceElement {
    /// A plain file reference
    File { path: PathBuf },

    /// A reference to a folder kept as a single entry
    FolderReference { path: PathBuf },

    /// A named container of further elements
    Group {
        name: String,
        path: PathBuf,
        children: Vec<WorkspaceElement>,
    },

    /// A reference to a member project, resolved against the descriptor
    /// map during assembly
    Project { path: PathBuf },
}

impl WorkspaceElement {
    /// Create a file element.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        WorkspaceElement::File { path: path.into() }
    }

    /// Create a folder-reference element.
    pub fn folder_reference(path: impl Into<PathBuf>) -> Self {
        WorkspaceElement::FolderReference { path: path.into() }
    }

    /// Create a group element.
    pub fn group(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        children: Vec<WorkspaceElement>,
    ) -> Self {
        WorkspaceElement::Group {
            name: name.into(),
            path: path.into(),
            children,
        }
    }

    /// Create a project element.
    pub fn project(path: impl Into<PathBuf>) -> Self {
        WorkspaceElement::Project { path: path.into() }
    }
}
