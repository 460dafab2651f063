//! Descriptors - the fully resolved, generation-ready representations.
//!
//! A descriptor is what the serializer consumes, as opposed to the source
//! model in [`crate::core`]. Per-project descriptor generation and scheme
//! building live outside this crate; the traits here mark that seam.

pub mod assembler;
pub mod tree;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::graph::Graph;
use crate::core::project::Project;
use crate::core::workspace::{Workspace, WorkspaceElement};

pub use assembler::{ExecutionContext, WorkspaceDescriptorAssembler};
pub use tree::TreeElement;

/// Per-project descriptors keyed by project path.
///
/// Always a `BTreeMap` so downstream iteration is deterministic
/// regardless of the completion order that produced the entries.
pub type DescriptorMap = BTreeMap<PathBuf, ProjectDescriptor>;

/// The generation-ready form of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Project name
    name: String,

    /// Source root the project was generated from
    source_path: PathBuf,

    /// Path of the generated project bundle
    bundle_path: PathBuf,

    /// Generated identifier for each target, keyed by target name.
    /// Scheme descriptors reference these identifiers, which is why
    /// scheme generation waits until every project has one.
    target_identifiers: BTreeMap<String, String>,

    /// Finalized schemes, attached in the assembler's last pass
    schemes: Vec<SchemeDescriptor>,
}

impl ProjectDescriptor {
    /// Create a descriptor with no schemes attached yet.
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<PathBuf>,
        bundle_path: impl Into<PathBuf>,
    ) -> Self {
        ProjectDescriptor {
            name: name.into(),
            source_path: source_path.into(),
            bundle_path: bundle_path.into(),
            target_identifiers: BTreeMap::new(),
            schemes: Vec::new(),
        }
    }

    /// Set the generated target identifiers.
    pub fn with_target_identifiers(mut self, identifiers: BTreeMap<String, String>) -> Self {
        self.target_identifiers = identifiers;
        self
    }

    /// Derive a copy of this descriptor carrying the given schemes.
    ///
    /// Pure transform: the assembler builds a second descriptor map from
    /// the first instead of patching entries in place.
    pub fn with_schemes(mut self, schemes: Vec<SchemeDescriptor>) -> Self {
        self.schemes = schemes;
        self
    }

    /// Get the project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the source root.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Get the generated bundle path.
    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Get the generated target identifiers.
    pub fn target_identifiers(&self) -> &BTreeMap<String, String> {
        &self.target_identifiers
    }

    /// Get the finalized schemes.
    pub fn schemes(&self) -> &[SchemeDescriptor] {
        &self.schemes
    }
}

/// The generation-ready form of one scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDescriptor {
    /// Scheme name
    pub name: String,

    /// Whether the scheme is shared
    pub shared: bool,

    /// Generated identifiers of the targets the build action covers
    pub build_targets: Vec<String>,

    /// Executable launched by the run action, if any
    pub run_executable: Option<PathBuf>,

    /// Launch arguments for the run action
    pub run_arguments: Vec<String>,
}

/// The final artifact handed to the serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDescriptor {
    /// Resolved workspace bundle path
    path: PathBuf,

    /// Workspace-native tree data, deterministically ordered
    tree: Vec<TreeElement>,

    /// Per-project descriptors carrying their finalized schemes,
    /// in project-path order
    projects: Vec<ProjectDescriptor>,

    /// Workspace-level scheme descriptors
    schemes: Vec<SchemeDescriptor>,
}

impl WorkspaceDescriptor {
    pub(crate) fn new(
        path: PathBuf,
        tree: Vec<TreeElement>,
        projects: Vec<ProjectDescriptor>,
        schemes: Vec<SchemeDescriptor>,
    ) -> Self {
        WorkspaceDescriptor {
            path,
            tree,
            projects,
            schemes,
        }
    }

    /// Get the workspace bundle path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the native tree data.
    pub fn tree(&self) -> &[TreeElement] {
        &self.tree
    }

    /// Get the per-project descriptors.
    pub fn projects(&self) -> &[ProjectDescriptor] {
        &self.projects
    }

    /// Get the workspace-level schemes.
    pub fn schemes(&self) -> &[SchemeDescriptor] {
        &self.schemes
    }
}

/// Per-project descriptor generation, implemented outside this crate.
///
/// `Sync` because the assembler may invoke it concurrently across
/// distinct projects.
pub trait ProjectDescriptorGenerator: Sync {
    /// Generate the descriptor for one project of the graph.
    fn generate(&self, project: &Project, graph: &Graph) -> Result<ProjectDescriptor>;
}

/// Scheme descriptor generation, implemented outside this crate.
pub trait SchemeDescriptorGenerator: Sync {
    /// Generate workspace-level schemes. Runs once, after every project
    /// has a descriptor.
    fn workspace_schemes(
        &self,
        workspace: &Workspace,
        descriptors: &DescriptorMap,
        graph: &Graph,
    ) -> Result<Vec<SchemeDescriptor>>;

    /// Generate the schemes of one project. Receives the complete
    /// descriptor map so a scheme may reference targets in any project.
    fn project_schemes(
        &self,
        project: &Project,
        descriptors: &DescriptorMap,
        graph: &Graph,
    ) -> Result<Vec<SchemeDescriptor>>;
}

/// Structural-tree enumeration, implemented outside this crate.
///
/// Invoked once, synchronously, before the assembler maps the tree.
pub trait StructureEnumerator: Sync {
    /// Enumerate the file/group/project hierarchy under `root`.
    fn enumerate(&self, root: &Path, workspace: &Workspace) -> Result<Vec<WorkspaceElement>>;
}
