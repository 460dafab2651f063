//! Typed diagnostics for fatal generation conditions.
//!
//! Every fatal error names the offending path or target so the caller can
//! render an actionable message. Non-fatal conditions (plugin load
//! failures, root discovery misses) never reach these types.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// The workspace structure references a project with no generated
/// descriptor. Indicates an inconsistent graph/structure pairing.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("project `{}` is referenced by the workspace structure but has no descriptor", .path.display())]
#[diagnostic(
    code(slipway::assemble::project_not_found),
    help("Ensure the project is part of the graph handed to the assembler")
)]
pub struct ProjectNotFoundError {
    pub path: PathBuf,
}

/// A target-reference dependency names a target that does not exist in
/// the final graph.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("target `{from}` in project `{}` depends on unknown target `{to}`", .project.display())]
#[diagnostic(
    code(slipway::graph::unresolved_dependency),
    help("Check the dependency's target name and project path")
)]
pub struct UnresolvedDependencyError {
    pub project: PathBuf,
    pub from: String,
    pub to: String,
}

/// Two targets in the same project share a name.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("duplicate target `{name}` in project `{}`", .project.display())]
#[diagnostic(code(slipway::graph::duplicate_target))]
pub struct DuplicateTargetError {
    pub project: PathBuf,
    pub name: String,
}

/// A scheme references a target absent from the graph.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("scheme `{scheme}` references unknown target `{target}` in project `{}`", .project.display())]
#[diagnostic(
    code(slipway::graph::dangling_scheme_target),
    help("Scheme target references must resolve before schemes are finalized")
)]
pub struct DanglingSchemeTargetError {
    pub project: PathBuf,
    pub scheme: String,
    pub target: String,
}

/// A target has an empty name.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("project `{}` contains a target with an empty name", .project.display())]
#[diagnostic(code(slipway::graph::empty_target_name))]
pub struct EmptyTargetNameError {
    pub project: PathBuf,
}
