//! Schemes - named build/run configurations.
//!
//! A Scheme references targets by name; those references are only
//! resolvable once the whole graph is known, which is why scheme
//! finalization happens in a second pass over generated descriptors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A reference to a target from a scheme action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReference {
    /// Path of the project owning the target
    pub project: PathBuf,

    /// Target name within that project
    pub name: String,
}

impl TargetReference {
    /// Create a new target reference.
    pub fn new(project: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        TargetReference {
            project: project.into(),
            name: name.into(),
        }
    }
}

/// The build action of a scheme: which targets to build, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAction {
    /// Targets to build, in declaration order
    pub targets: Vec<TargetReference>,
}

impl BuildAction {
    /// Create a build action over the given targets.
    pub fn new(targets: Vec<TargetReference>) -> Self {
        BuildAction { targets }
    }
}

/// The run action of a scheme: what to launch and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAction {
    /// Executable to launch
    pub executable: PathBuf,

    /// Launch arguments, in order
    pub arguments: Vec<String>,

    /// Build configuration to run under
    pub configuration: String,
}

impl RunAction {
    /// Create a run action launching `executable` under the given
    /// configuration.
    pub fn new(executable: impl Into<PathBuf>, configuration: impl Into<String>) -> Self {
        RunAction {
            executable: executable.into(),
            arguments: Vec::new(),
            configuration: configuration.into(),
        }
    }

    /// Set the launch arguments.
    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }
}

/// A named build/run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    /// Scheme name
    name: String,

    /// Shared schemes are checked into the bundle; private ones are
    /// per-user
    shared: bool,

    /// Optional build action
    build_action: Option<BuildAction>,

    /// Optional run action
    run_action: Option<RunAction>,
}

impl Scheme {
    /// Create a new private scheme.
    pub fn new(name: impl Into<String>) -> Self {
        Scheme {
            name: name.into(),
            shared: false,
            build_action: None,
            run_action: None,
        }
    }

    /// Mark the scheme as shared.
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    /// Set the build action.
    pub fn with_build_action(mut self, action: BuildAction) -> Self {
        self.build_action = Some(action);
        self
    }

    /// Set the run action.
    pub fn with_run_action(mut self, action: RunAction) -> Self {
        self.run_action = Some(action);
        self
    }

    /// Get the scheme name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the scheme is shared.
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Get the build action, if any.
    pub fn build_action(&self) -> Option<&BuildAction> {
        self.build_action.as_ref()
    }

    /// Get the run action, if any.
    pub fn run_action(&self) -> Option<&RunAction> {
        self.run_action.as_ref()
    }

    /// Iterate over every target reference in the scheme.
    pub fn target_references(&self) -> impl Iterator<Item = &TargetReference> {
        self.build_action.iter().flat_map(|a| a.targets.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_builder() {
        let scheme = Scheme::new("Manifests")
            .shared()
            .with_build_action(BuildAction::new(vec![TargetReference::new(
                "/src", "AppManifests",
            )]))
            .with_run_action(
                RunAction::new("/usr/local/bin/slipway", "Debug")
                    .with_arguments(vec!["generate".into()]),
            );

        assert!(scheme.is_shared());
        assert_eq!(scheme.target_references().count(), 1);
        assert_eq!(scheme.run_action().unwrap().arguments, vec!["generate"]);
    }
}
