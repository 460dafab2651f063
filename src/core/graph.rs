//! The project graph - every project, target, and dependency edge.
//!
//! The graph exclusively owns all model values reachable from it. All
//! maps are ordered so iteration order (and therefore everything derived
//! from it) is deterministic. Cycle detection is a caller concern; the
//! graph only stores adjacency.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::dependency::Dependency;
use crate::core::project::Project;
use crate::core::target::Target;
use crate::util::diagnostic::{
    DanglingSchemeTargetError, DuplicateTargetError, EmptyTargetNameError,
    UnresolvedDependencyError,
};

/// Identity of one node in the dependency adjacency map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DependencyId {
    /// A target within a project
    Target { project: PathBuf, name: String },

    /// A package product
    Package { product: String },

    /// A precompiled binary on disk
    Binary { path: PathBuf },
}

impl DependencyId {
    /// Identity of a target node.
    pub fn target(project: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        DependencyId::Target {
            project: project.into(),
            name: name.into(),
        }
    }

    /// Resolve a `Dependency` declared by a target of `owner` into an
    /// identity in the graph.
    pub fn from_dependency(owner: &Path, dependency: &Dependency) -> Self {
        match dependency {
            Dependency::Target { name, project } => DependencyId::Target {
                project: project.clone().unwrap_or_else(|| owner.to_path_buf()),
                name: name.clone(),
            },
            Dependency::Package { product } => DependencyId::Package {
                product: product.clone(),
            },
            Dependency::Binary { path } => DependencyId::Binary { path: path.clone() },
        }
    }
}

/// The fully assembled project graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name (usually the workspace name)
    name: String,

    /// Path the graph was assembled from
    entry_path: PathBuf,

    /// Projects keyed by their root path
    projects: BTreeMap<PathBuf, Project>,

    /// Targets keyed by their owning project path
    targets: BTreeMap<PathBuf, Vec<Target>>,

    /// Dependency adjacency: node -> nodes it depends on
    dependencies: BTreeMap<DependencyId, BTreeSet<DependencyId>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new(name: impl Into<String>, entry_path: impl Into<PathBuf>) -> Self {
        Graph {
            name: name.into(),
            entry_path: entry_path.into(),
            projects: BTreeMap::new(),
            targets: BTreeMap::new(),
            dependencies: BTreeMap::new(),
        }
    }

    /// Insert a project, recording its targets and declared dependency
    /// edges. A project inserted twice replaces its previous entry.
    pub fn add_project(&mut self, project: Project) {
        let path = project.path().to_path_buf();
        self.targets.insert(path.clone(), project.targets().to_vec());

        for target in project.targets() {
            let from = DependencyId::target(&path, target.name());
            let entry = self.dependencies.entry(from).or_default();
            for dependency in target.dependencies() {
                entry.insert(DependencyId::from_dependency(&path, dependency));
            }
        }

        self.projects.insert(path, project);
    }

    /// Get the graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the entry path.
    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    /// Projects keyed by root path, in path order.
    pub fn projects(&self) -> &BTreeMap<PathBuf, Project> {
        &self.projects
    }

    /// Look up a project by its root path.
    pub fn project(&self, path: &Path) -> Option<&Project> {
        self.projects.get(path)
    }

    /// Targets of the project at `path`.
    pub fn targets(&self, path: &Path) -> &[Target] {
        self.targets.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up one target.
    pub fn target(&self, path: &Path, name: &str) -> Option<&Target> {
        self.targets(path).iter().find(|t| t.name() == name)
    }

    /// The dependency adjacency map.
    pub fn dependencies(&self) -> &BTreeMap<DependencyId, BTreeSet<DependencyId>> {
        &self.dependencies
    }

    /// Nodes `id` depends on.
    pub fn dependencies_of(&self, id: &DependencyId) -> Option<&BTreeSet<DependencyId>> {
        self.dependencies.get(id)
    }

    /// Check graph invariants: non-empty unique target names, resolvable
    /// target references, resolvable scheme references.
    ///
    /// Unresolved references are a generation error, never silently
    /// dropped.
    pub fn validate(&self) -> Result<()> {
        for (path, project) in &self.projects {
            let mut seen = BTreeSet::new();
            for target in project.targets() {
                if target.name().is_empty() {
                    return Err(EmptyTargetNameError {
                        project: path.clone(),
                    }
                    .into());
                }
                if !seen.insert(target.name()) {
                    return Err(DuplicateTargetError {
                        project: path.clone(),
                        name: target.name().to_string(),
                    }
                    .into());
                }
            }

            for target in project.targets() {
                for (name, referenced) in target.target_dependencies() {
                    let referenced = referenced.unwrap_or(path);
                    if self.target(referenced, name).is_none() {
                        return Err(UnresolvedDependencyError {
                            project: path.clone(),
                            from: target.name().to_string(),
                            to: name.to_string(),
                        }
                        .into());
                    }
                }
            }

            for scheme in project.schemes() {
                for reference in scheme.target_references() {
                    if self.target(&reference.project, &reference.name).is_none() {
                        return Err(DanglingSchemeTargetError {
                            project: path.clone(),
                            scheme: scheme.name().to_string(),
                            target: reference.name.to_string(),
                        }
                        .into());
                    }
                }
            }
        }
        Ok(())
    }
}
