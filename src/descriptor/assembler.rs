//! Workspace descriptor assembly.
//!
//! Turns a workspace, its graph, and the enumerated structural tree into
//! the final [`WorkspaceDescriptor`] in four passes:
//!
//! 1. Per-project descriptor generation, optionally concurrent.
//! 2. Structural tree mapping with deterministic sibling ordering.
//! 3. Workspace-level scheme generation.
//! 4. Project-level scheme generation over the *complete* pass-1 map,
//!    producing a new descriptor map rather than patching the old one.
//!
//! Pass 4 cannot be fused into pass 1: a scheme belonging to project X
//! may reference a target identifier in project Y, so it must observe
//! the full cross-project target universe.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::core::graph::Graph;
use crate::core::project::Project;
use crate::core::workspace::{Workspace, WorkspaceElement};
use crate::descriptor::tree::{sort_siblings, TreeElement};
use crate::descriptor::{
    DescriptorMap, ProjectDescriptor, ProjectDescriptorGenerator, SchemeDescriptorGenerator,
    StructureEnumerator, WorkspaceDescriptor,
};
use crate::util::diagnostic::ProjectNotFoundError;
use crate::util::fs::relative_path;

/// How pass 1 invokes the per-project generator.
///
/// Only pass 1 is ever concurrent, and only across independent projects.
/// Output ordering never depends on completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    /// Generate project descriptors on the rayon pool
    #[default]
    Concurrent,
    /// Generate project descriptors one at a time, in path order
    Serial,
}

/// The final assembly step of the generation pipeline.
///
/// Borrows its collaborators and never mutates its inputs; every pass
/// hands owned values to the next.
pub struct WorkspaceDescriptorAssembler<'a> {
    projects: &'a dyn ProjectDescriptorGenerator,
    schemes: &'a dyn SchemeDescriptorGenerator,
    structure: &'a dyn StructureEnumerator,
    execution: ExecutionContext,
}

impl<'a> WorkspaceDescriptorAssembler<'a> {
    /// Create an assembler over the given collaborators.
    pub fn new(
        projects: &'a dyn ProjectDescriptorGenerator,
        schemes: &'a dyn SchemeDescriptorGenerator,
        structure: &'a dyn StructureEnumerator,
    ) -> Self {
        WorkspaceDescriptorAssembler {
            projects,
            schemes,
            structure,
            execution: ExecutionContext::default(),
        }
    }

    /// Select the execution context for pass 1.
    pub fn with_execution(mut self, execution: ExecutionContext) -> Self {
        self.execution = execution;
        self
    }

    /// Assemble the workspace descriptor.
    ///
    /// Any generator failure or structural inconsistency aborts the whole
    /// assembly; no partial workspace is ever returned.
    pub fn assemble(
        &self,
        workspace: &Workspace,
        root: &Path,
        graph: &Graph,
    ) -> Result<WorkspaceDescriptor> {
        graph.validate()?;

        let descriptors = self.generate_descriptors(graph)?;
        tracing::info!(projects = descriptors.len(), "generated project descriptors");

        let elements = self.structure.enumerate(root, workspace)?;
        let mut tree = elements
            .iter()
            .map(|element| self.map_element(element, root, &descriptors))
            .collect::<Result<Vec<_>>>()?;
        sort_siblings(&mut tree);

        let workspace_schemes = self.schemes.workspace_schemes(workspace, &descriptors, graph)?;
        tracing::debug!(schemes = workspace_schemes.len(), "generated workspace schemes");

        let finalized = self.attach_project_schemes(&descriptors, graph)?;

        Ok(WorkspaceDescriptor::new(
            workspace.path().to_path_buf(),
            tree,
            finalized.into_values().collect(),
            workspace_schemes,
        ))
    }

    /// Pass 1: generate a descriptor for every project in the graph.
    ///
    /// Completion order is irrelevant; results are re-keyed into a
    /// path-indexed map. The first failure aborts the pass.
    fn generate_descriptors(&self, graph: &Graph) -> Result<DescriptorMap> {
        let entries: Vec<(&PathBuf, &Project)> = graph.projects().iter().collect();

        let generated: Result<Vec<(PathBuf, ProjectDescriptor)>> = match self.execution {
            ExecutionContext::Concurrent => entries
                .par_iter()
                .map(|(path, project)| {
                    self.projects
                        .generate(project, graph)
                        .map(|descriptor| ((*path).clone(), descriptor))
                })
                .collect(),
            ExecutionContext::Serial => entries
                .iter()
                .map(|(path, project)| {
                    self.projects
                        .generate(project, graph)
                        .map(|descriptor| ((*path).clone(), descriptor))
                })
                .collect(),
        };

        Ok(generated?.into_iter().collect())
    }

    /// Pass 2: map one structural element into native tree data.
    ///
    /// Locations are resolved relative to `base`; groups re-root their
    /// children at their own path.
    fn map_element(
        &self,
        element: &WorkspaceElement,
        base: &Path,
        descriptors: &DescriptorMap,
    ) -> Result<TreeElement> {
        match element {
            WorkspaceElement::File { path } | WorkspaceElement::FolderReference { path } => {
                Ok(TreeElement::file_ref(relative_path(base, path)))
            }
            WorkspaceElement::Group {
                name,
                path,
                children,
            } => {
                let mut mapped = children
                    .iter()
                    .map(|child| self.map_element(child, path, descriptors))
                    .collect::<Result<Vec<_>>>()?;
                sort_siblings(&mut mapped);
                Ok(TreeElement::group(name, relative_path(base, path), mapped))
            }
            WorkspaceElement::Project { path } => {
                let descriptor = descriptors.get(path).ok_or_else(|| ProjectNotFoundError {
                    path: path.clone(),
                })?;
                Ok(TreeElement::file_ref(relative_path(
                    base,
                    descriptor.bundle_path(),
                )))
            }
        }
    }

    /// Pass 4: derive a new descriptor map with project schemes attached.
    fn attach_project_schemes(
        &self,
        descriptors: &DescriptorMap,
        graph: &Graph,
    ) -> Result<DescriptorMap> {
        let mut finalized = DescriptorMap::new();
        for (path, descriptor) in descriptors {
            let project = graph.project(path).ok_or_else(|| ProjectNotFoundError {
                path: path.clone(),
            })?;
            let schemes = self.schemes.project_schemes(project, descriptors, graph)?;
            finalized.insert(path.clone(), descriptor.clone().with_schemes(schemes));
        }
        Ok(finalized)
    }
}
