//! Target definitions - what gets built.
//!
//! A Target is a single buildable unit (app, library, test bundle) with
//! sources and dependencies, owned by exactly one project.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::dependency::Dependency;
use crate::core::project::BuildSettings;

/// The platform a target builds for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "macos")]
    MacOs,
    #[serde(rename = "ios")]
    Ios,
    #[serde(rename = "tvos")]
    TvOs,
    #[serde(rename = "watchos")]
    WatchOs,
}

impl Default for Platform {
    fn default() -> Self {
        Platform::MacOs
    }
}

/// The kind of product a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// Application bundle
    App,
    /// Dynamic framework
    Framework,
    /// Statically linked framework
    StaticFramework,
    /// Static library (.a)
    StaticLibrary,
    /// Dynamic library (.dylib)
    DynamicLibrary,
    /// Unit test bundle
    UnitTests,
}

impl Default for Product {
    fn default() -> Self {
        Product::StaticLibrary
    }
}

impl Product {
    /// Check if this product is linkable into another target.
    pub fn is_library(&self) -> bool {
        matches!(
            self,
            Product::Framework
                | Product::StaticFramework
                | Product::StaticLibrary
                | Product::DynamicLibrary
        )
    }

    /// Check if this product can be launched by a run action.
    pub fn is_runnable(&self) -> bool {
        matches!(self, Product::App)
    }
}

/// A buildable target with its sources and dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Target name, unique within the owning project
    name: String,

    /// Platform to build for
    platform: Platform,

    /// Product kind
    product: Product,

    /// Bundle identifier for the produced artifact
    bundle_id: String,

    /// Target-level build settings
    settings: BuildSettings,

    /// Source files, in declaration order
    sources: Vec<PathBuf>,

    /// Dependencies, in declaration order
    dependencies: Vec<Dependency>,

    /// Name of the file group the target's sources live under
    file_group: String,
}

impl Target {
    /// Create a new target.
    pub fn new(name: impl Into<String>, platform: Platform, product: Product) -> Self {
        let name = name.into();
        Target {
            bundle_id: format!("io.slipway.{}", name),
            file_group: name.clone(),
            name,
            platform,
            product,
            settings: BuildSettings::new(),
            sources: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Set the bundle identifier.
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = bundle_id.into();
        self
    }

    /// Set the target-level build settings.
    pub fn with_settings(mut self, settings: BuildSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the source file list.
    pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = sources;
        self
    }

    /// Set the dependency list.
    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Set the owning file group name.
    pub fn with_file_group(mut self, group: impl Into<String>) -> Self {
        self.file_group = group.into();
        self
    }

    /// Get the target name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Get the product kind.
    pub fn product(&self) -> Product {
        self.product
    }

    /// Get the bundle identifier.
    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    /// Get the target-level build settings.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Get the source files.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Get the dependencies.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Get the owning file group name.
    pub fn file_group(&self) -> &str {
        &self.file_group
    }

    /// Iterate over the target-reference dependencies only.
    pub fn target_dependencies(&self) -> impl Iterator<Item = (&str, Option<&Path>)> {
        self.dependencies.iter().filter_map(|dep| match dep {
            Dependency::Target { name, project } => Some((name.as_str(), project.as_deref())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_classification() {
        assert!(Product::StaticFramework.is_library());
        assert!(Product::DynamicLibrary.is_library());
        assert!(!Product::App.is_library());
        assert!(Product::App.is_runnable());
        assert!(!Product::UnitTests.is_runnable());
    }

    #[test]
    fn test_target_builder() {
        let target = Target::new("Core", Platform::MacOs, Product::StaticFramework)
            .with_sources(vec![PathBuf::from("/src/lib.swift")])
            .with_dependencies(vec![Dependency::target("Helpers")]);

        assert_eq!(target.name(), "Core");
        assert_eq!(target.bundle_id(), "io.slipway.Core");
        assert_eq!(target.sources().len(), 1);
        assert_eq!(
            target.target_dependencies().collect::<Vec<_>>(),
            vec![("Helpers", None)]
        );
    }
}
