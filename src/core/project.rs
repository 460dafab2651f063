//! Project model - a named collection of targets, settings, and schemes.
//!
//! A Project is the unit handed to the per-project descriptor generator.
//! It owns its targets and schemes by value; the graph is the sole owner
//! of every project reachable from it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::scheme::Scheme;
use crate::core::target::Target;

/// Build settings as an ordered key/value map.
///
/// Ordered so that settings iteration (and anything derived from it) is
/// deterministic across runs.
pub type BuildSettings = BTreeMap<String, String>;

/// A project rooted at one source directory, producing one bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name
    name: String,

    /// Source root directory
    path: PathBuf,

    /// Where the generated project bundle is written
    bundle_path: PathBuf,

    /// Organization shown in generated file headers
    organization: Option<String>,

    /// Project-level build settings
    settings: BuildSettings,

    /// Buildable targets, in declaration order
    targets: Vec<Target>,

    /// Schemes, in declaration order
    schemes: Vec<Scheme>,

    /// Name of the root file group in the generated bundle
    file_group: String,
}

impl Project {
    /// Create a new project rooted at `path`, emitting its bundle at
    /// `bundle_path`.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        bundle_path: impl Into<PathBuf>,
    ) -> Self {
        let name = name.into();
        Project {
            file_group: name.clone(),
            name,
            path: path.into(),
            bundle_path: bundle_path.into(),
            organization: None,
            settings: BuildSettings::new(),
            targets: Vec::new(),
            schemes: Vec::new(),
        }
    }

    /// Set the organization name.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Set the project-level build settings.
    pub fn with_settings(mut self, settings: BuildSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the target list.
    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    /// Replace the scheme list.
    pub fn with_schemes(mut self, schemes: Vec<Scheme>) -> Self {
        self.schemes = schemes;
        self
    }

    /// Set the root file group name.
    pub fn with_file_group(mut self, group: impl Into<String>) -> Self {
        self.file_group = group.into();
        self
    }

    /// Append a target.
    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Append a scheme.
    pub fn add_scheme(&mut self, scheme: Scheme) {
        self.schemes.push(scheme);
    }

    /// Get the project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the source root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the generated bundle path.
    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Get the organization name, if any.
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Get the project-level build settings.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Get the targets in declaration order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Get the schemes in declaration order.
    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    /// Get the root file group name.
    pub fn file_group(&self) -> &str {
        &self.file_group
    }

    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }
}
