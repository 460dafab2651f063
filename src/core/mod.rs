//! Core data structures for Slipway.
//!
//! This module contains the foundational types used throughout Slipway:
//! - Projects, targets, and dependencies
//! - Schemes and their actions
//! - Workspaces and the structural element tree
//! - The assembled project graph

pub mod dependency;
pub mod graph;
pub mod project;
pub mod scheme;
pub mod target;
pub mod workspace;

pub use dependency::Dependency;
pub use graph::{DependencyId, Graph};
pub use project::{BuildSettings, Project};
pub use scheme::{BuildAction, RunAction, Scheme, TargetReference};
pub use target::{Platform, Product, Target};
pub use workspace::{
    Workspace, WorkspaceElement, PROJECT_BUNDLE_EXTENSION, WORKSPACE_BUNDLE_EXTENSION,
};
