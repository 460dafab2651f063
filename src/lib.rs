//! Slipway - graph assembly and descriptor generation for IDE workspaces.
//!
//! This crate takes an in-memory model of projects, targets, and their
//! dependencies and produces a fully resolved, deterministically ordered
//! workspace descriptor ready for serialization into an IDE project
//! bundle. It can also synthesize an ephemeral graph from loose
//! configuration-manifest files so the manifests themselves become
//! editable, buildable targets.

pub mod core;
pub mod descriptor;
pub mod synthesis;
pub mod util;

pub use crate::core::{
    dependency::Dependency, graph::Graph, project::Project, scheme::Scheme, target::Target,
    workspace::{Workspace, WorkspaceElement},
};

pub use descriptor::{
    DescriptorMap, ExecutionContext, ProjectDescriptor, ProjectDescriptorGenerator,
    SchemeDescriptor, SchemeDescriptorGenerator, StructureEnumerator, TreeElement,
    WorkspaceDescriptor, WorkspaceDescriptorAssembler,
};

pub use synthesis::{ManifestGraphSynthesizer, PluginLoader, SynthesisRequest};
pub use util::root::{FileProbe, NativeFileProbe, RootLocator};
