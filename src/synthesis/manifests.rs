//! Manifest-to-graph synthesis.
//!
//! Given loose lists of manifest, plugin, helper, and template source
//! files, produce a synthetic workspace of at most two projects: a
//! configuration project wrapping the project manifests and a plugins
//! project wrapping the plugin manifests. Output is byte-for-byte
//! deterministic for identical ordered inputs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::dependency::Dependency;
use crate::core::graph::Graph;
use crate::core::project::{BuildSettings, Project};
use crate::core::scheme::{BuildAction, RunAction, Scheme, TargetReference};
use crate::core::target::{Platform, Product, Target};
use crate::core::workspace::{Workspace, PROJECT_BUNDLE_EXTENSION, WORKSPACE_BUNDLE_EXTENSION};
use crate::synthesis::naming::unique_target_name;
use crate::synthesis::PluginLoader;
use crate::util::fs::{containing_directory_name, glob_files};

/// Name of the synthetic project wrapping project manifests.
pub const CONFIG_PROJECT_NAME: &str = "Manifests";

/// Name of the synthetic project wrapping plugin manifests.
pub const PLUGINS_PROJECT_NAME: &str = "Plugins";

/// Suffix appended to per-manifest target names.
const MANIFEST_TARGET_SUFFIX: &str = "Manifests";

/// Suffix appended to per-plugin target names.
const PLUGIN_TARGET_SUFFIX: &str = "Plugin";

/// Names of the optional single-file-list targets.
const HELPERS_TARGET_NAME: &str = "Helpers";
const TEMPLATES_TARGET_NAME: &str = "Templates";
const SETUP_TARGET_NAME: &str = "Setup";
const CONFIG_TARGET_NAME: &str = "Config";
const DEPENDENCIES_TARGET_NAME: &str = "Dependencies";

/// Recursive match for plugin source files.
const PLUGIN_SOURCE_PATTERN: &str = "**/*.swift";

/// Inputs to one synthesis run. All file lists are ordered; the order
/// flows into target naming and scheme contents.
#[derive(Debug, Clone)]
pub struct SynthesisRequest<'a> {
    /// Workspace (and graph) name
    pub name: &'a str,

    /// Root the manifests were collected under
    pub source_root: &'a Path,

    /// Destination directory for generated bundles
    pub output_dir: &'a Path,

    /// Executable wired into the run action
    pub executable: &'a Path,

    /// Project-manifest files, one target each
    pub manifests: &'a [PathBuf],

    /// Plugin-manifest files, one target each
    pub plugin_manifests: &'a [PathBuf],

    /// Shared helper sources
    pub helpers: &'a [PathBuf],

    /// Template sources
    pub templates: &'a [PathBuf],

    /// Setup manifest sources
    pub setup: &'a [PathBuf],

    /// Configuration file sources
    pub config: &'a [PathBuf],

    /// Dependencies manifest sources
    pub dependencies: &'a [PathBuf],

    /// Search path for the manifest-description library
    pub manifest_lib_dir: &'a Path,

    /// Toolchain version string embedded in the build settings
    pub toolchain_version: &'a str,
}

/// The synthesized workspace/graph pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedWorkspace {
    pub workspace: Workspace,
    pub graph: Graph,
}

/// Builds an ephemeral graph from manifest source files.
pub struct ManifestGraphSynthesizer<'a> {
    plugins: &'a dyn PluginLoader,
}

impl<'a> ManifestGraphSynthesizer<'a> {
    /// Create a synthesizer over the given plugin loader.
    pub fn new(plugins: &'a dyn PluginLoader) -> Self {
        ManifestGraphSynthesizer { plugins }
    }

    /// Synthesize the workspace and graph.
    ///
    /// Both manifest lists empty is a valid state: the result carries an
    /// empty graph and a memberless workspace.
    pub fn synthesize(&self, request: &SynthesisRequest<'_>) -> Result<SynthesizedWorkspace> {
        let mut graph = Graph::new(request.name, request.source_root);
        let mut workspace = Workspace::new(
            request.name,
            request.output_dir.join(format!(
                "{}.{}",
                request.name, WORKSPACE_BUNDLE_EXTENSION
            )),
        );

        if !request.manifests.is_empty() {
            let project = self.configuration_project(request);
            workspace.add_project(project.path());
            graph.add_project(project);
        }

        if !request.plugin_manifests.is_empty() {
            if let Some(project) = self.plugins_project(request)? {
                workspace.add_project(project.path());
                graph.add_project(project);
            }
        }

        tracing::info!(
            projects = graph.projects().len(),
            "synthesized manifest graph"
        );
        Ok(SynthesizedWorkspace { workspace, graph })
    }

    /// Build the configuration project wrapping the project manifests.
    fn configuration_project(&self, request: &SynthesisRequest<'_>) -> Project {
        let settings = shared_settings(request);
        let has_helpers = !request.helpers.is_empty();

        let mut used = BTreeSet::new();
        let mut targets = Vec::new();
        let mut manifest_targets = Vec::new();

        for manifest in request.manifests {
            let directory =
                containing_directory_name(manifest).unwrap_or_else(|| "Root".to_string());
            let name = unique_target_name(format!("{directory}{MANIFEST_TARGET_SUFFIX}"), &used);
            used.insert(name.clone());

            let dependencies = if has_helpers {
                vec![Dependency::target(HELPERS_TARGET_NAME)]
            } else {
                Vec::new()
            };

            manifest_targets.push(name.clone());
            targets.push(
                synthetic_target(&name, &settings)
                    .with_sources(vec![manifest.clone()])
                    .with_dependencies(dependencies),
            );
        }

        // Optional targets carry their file list verbatim and never
        // depend on each other.
        for (name, sources) in [
            (HELPERS_TARGET_NAME, request.helpers),
            (TEMPLATES_TARGET_NAME, request.templates),
            (SETUP_TARGET_NAME, request.setup),
            (CONFIG_TARGET_NAME, request.config),
            (DEPENDENCIES_TARGET_NAME, request.dependencies),
        ] {
            if !sources.is_empty() {
                targets.push(synthetic_target(name, &settings).with_sources(sources.to_vec()));
            }
        }

        let path = request.source_root.to_path_buf();
        let scheme = Scheme::new(CONFIG_PROJECT_NAME)
            .shared()
            .with_build_action(BuildAction::new(
                manifest_targets
                    .iter()
                    .map(|name| TargetReference::new(&path, name))
                    .collect(),
            ))
            .with_run_action(RunAction::new(request.executable, "Debug").with_arguments(vec![
                "generate".to_string(),
                "--path".to_string(),
                request.source_root.to_string_lossy().into_owned(),
            ]));

        Project::new(
            CONFIG_PROJECT_NAME,
            path,
            bundle_path(request.output_dir, CONFIG_PROJECT_NAME),
        )
        .with_settings(settings)
        .with_targets(targets)
        .with_schemes(vec![scheme])
    }

    /// Build the plugins project, one target per loadable plugin.
    ///
    /// A plugin whose manifest fails to load is skipped, not fatal.
    /// Returns `None` when every candidate failed to load.
    fn plugins_project(&self, request: &SynthesisRequest<'_>) -> Result<Option<Project>> {
        let settings = shared_settings(request);
        let path = request.source_root.join(PLUGINS_PROJECT_NAME);

        let mut used = BTreeSet::new();
        let mut targets = Vec::new();

        for manifest in request.plugin_manifests {
            let directory = match manifest.parent() {
                Some(parent) => parent,
                None => continue,
            };
            if let Err(error) = self.plugins.load_plugin(directory) {
                tracing::warn!(
                    plugin = %directory.display(),
                    %error,
                    "skipping unloadable plugin manifest"
                );
                continue;
            }

            let directory_name =
                containing_directory_name(manifest).unwrap_or_else(|| "Root".to_string());
            let name = unique_target_name(format!("{directory_name}{PLUGIN_TARGET_SUFFIX}"), &used);
            used.insert(name.clone());

            let sources = glob_files(directory, PLUGIN_SOURCE_PATTERN)?;
            targets.push(synthetic_target(&name, &settings).with_sources(sources));
        }

        if targets.is_empty() {
            return Ok(None);
        }

        let scheme = Scheme::new(PLUGINS_PROJECT_NAME)
            .shared()
            .with_build_action(BuildAction::new(
                targets
                    .iter()
                    .map(|target| TargetReference::new(&path, target.name()))
                    .collect(),
            ));

        Ok(Some(
            Project::new(
                PLUGINS_PROJECT_NAME,
                path,
                bundle_path(request.output_dir, PLUGINS_PROJECT_NAME),
            )
            .with_settings(settings)
            .with_targets(targets)
            .with_schemes(vec![scheme]),
        ))
    }
}

/// Build settings shared by every synthetic target, derived once per
/// synthesis run.
fn shared_settings(request: &SynthesisRequest<'_>) -> BuildSettings {
    let mut settings = BuildSettings::new();
    settings.insert(
        "LIBRARY_SEARCH_PATHS".to_string(),
        request.manifest_lib_dir.to_string_lossy().into_owned(),
    );
    settings.insert(
        "TOOLCHAIN_VERSION".to_string(),
        request.toolchain_version.to_string(),
    );
    settings
}

fn synthetic_target(name: &str, settings: &BuildSettings) -> Target {
    Target::new(name, Platform::MacOs, Product::StaticFramework).with_settings(settings.clone())
}

fn bundle_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{name}.{PROJECT_BUNDLE_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::fs;
    use tempfile::TempDir;

    use crate::synthesis::PluginMetadata;

    struct OkLoader;

    impl PluginLoader for OkLoader {
        fn load_plugin(&self, directory: &Path) -> Result<PluginMetadata> {
            Ok(PluginMetadata {
                name: directory
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            })
        }
    }

    struct FailingLoader {
        fail_for: PathBuf,
    }

    impl PluginLoader for FailingLoader {
        fn load_plugin(&self, directory: &Path) -> Result<PluginMetadata> {
            if directory == self.fail_for {
                bail!("unreadable plugin manifest");
            }
            OkLoader.load_plugin(directory)
        }
    }

    fn request<'a>(
        manifests: &'a [PathBuf],
        plugin_manifests: &'a [PathBuf],
        helpers: &'a [PathBuf],
    ) -> SynthesisRequest<'a> {
        SynthesisRequest {
            name: "Edit",
            source_root: Path::new("/src"),
            output_dir: Path::new("/out"),
            executable: Path::new("/usr/local/bin/slipway"),
            manifests,
            plugin_manifests,
            helpers,
            templates: &[],
            setup: &[],
            config: &[],
            dependencies: &[],
            manifest_lib_dir: Path::new("/lib/description"),
            toolchain_version: "5.9",
        }
    }

    #[test]
    fn test_empty_inputs_yield_empty_workspace() {
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer.synthesize(&request(&[], &[], &[])).unwrap();

        assert!(result.graph.projects().is_empty());
        assert!(result.workspace.projects().is_empty());
    }

    #[test]
    fn test_colliding_directories_get_underscore_prefixes() {
        let manifests = vec![
            PathBuf::from("/src/one/App/Project.swift"),
            PathBuf::from("/src/two/App/Project.swift"),
            PathBuf::from("/src/three/App/Project.swift"),
        ];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer.synthesize(&request(&manifests, &[], &[])).unwrap();

        let project = result.graph.project(Path::new("/src")).unwrap();
        let names: Vec<_> = project.targets().iter().map(Target::name).collect();
        assert_eq!(names, vec!["AppManifests", "_AppManifests", "__AppManifests"]);
    }

    #[test]
    fn test_manifest_targets_depend_on_helpers() {
        let manifests = vec![PathBuf::from("/src/App/Project.swift")];
        let helpers = vec![PathBuf::from("/src/Helpers/Extensions.swift")];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer
            .synthesize(&request(&manifests, &[], &helpers))
            .unwrap();

        let project = result.graph.project(Path::new("/src")).unwrap();
        let manifest_target = project.target("AppManifests").unwrap();
        assert_eq!(
            manifest_target.dependencies(),
            &[Dependency::target("Helpers")]
        );

        let helpers_target = project.target("Helpers").unwrap();
        assert!(helpers_target.dependencies().is_empty());
        assert_eq!(helpers_target.sources(), helpers.as_slice());

        // Wiring must resolve in the final graph.
        result.graph.validate().unwrap();
    }

    #[test]
    fn test_no_helpers_means_no_dependencies() {
        let manifests = vec![PathBuf::from("/src/App/Project.swift")];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer.synthesize(&request(&manifests, &[], &[])).unwrap();

        let project = result.graph.project(Path::new("/src")).unwrap();
        assert!(project.target("AppManifests").unwrap().dependencies().is_empty());
        assert!(project.target("Helpers").is_none());
    }

    #[test]
    fn test_scheme_builds_manifest_targets_and_runs_generate() {
        let manifests = vec![
            PathBuf::from("/src/App/Project.swift"),
            PathBuf::from("/src/Lib/Project.swift"),
        ];
        let helpers = vec![PathBuf::from("/src/Helpers/Extensions.swift")];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer
            .synthesize(&request(&manifests, &[], &helpers))
            .unwrap();

        let project = result.graph.project(Path::new("/src")).unwrap();
        let scheme = &project.schemes()[0];
        assert!(scheme.is_shared());

        // Build action covers per-manifest targets only, not Helpers.
        let built: Vec<_> = scheme
            .target_references()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(built, vec!["AppManifests", "LibManifests"]);

        let run = scheme.run_action().unwrap();
        assert_eq!(run.executable, Path::new("/usr/local/bin/slipway"));
        assert_eq!(run.arguments, vec!["generate", "--path", "/src"]);
    }

    #[test]
    fn test_shared_settings_applied_to_every_target() {
        let manifests = vec![PathBuf::from("/src/App/Project.swift")];
        let helpers = vec![PathBuf::from("/src/Helpers/Extensions.swift")];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer
            .synthesize(&request(&manifests, &[], &helpers))
            .unwrap();

        let project = result.graph.project(Path::new("/src")).unwrap();
        for target in project.targets() {
            assert_eq!(
                target.settings().get("LIBRARY_SEARCH_PATHS").unwrap(),
                "/lib/description"
            );
            assert_eq!(target.settings().get("TOOLCHAIN_VERSION").unwrap(), "5.9");
        }
    }

    #[test]
    fn test_bundle_named_after_project() {
        let manifests = vec![PathBuf::from("/src/App/Project.swift")];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer.synthesize(&request(&manifests, &[], &[])).unwrap();

        let project = result.graph.project(Path::new("/src")).unwrap();
        assert_eq!(
            project.bundle_path(),
            Path::new("/out/Manifests.xcodeproj")
        );
        assert_eq!(
            result.workspace.path(),
            Path::new("/out/Edit.xcworkspace")
        );
    }

    #[test]
    fn test_plugin_targets_gather_sources_recursively() {
        let tmp = TempDir::new().unwrap();
        let plugin_dir = tmp.path().join("MyPlugin");
        fs::create_dir_all(plugin_dir.join("Sources")).unwrap();
        fs::write(plugin_dir.join("Plugin.swift"), "").unwrap();
        fs::write(plugin_dir.join("Sources/Helper.swift"), "").unwrap();
        fs::write(plugin_dir.join("README.md"), "").unwrap();

        let plugin_manifests = vec![plugin_dir.join("Plugin.swift")];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer
            .synthesize(&request(&[], &plugin_manifests, &[]))
            .unwrap();

        let path = PathBuf::from("/src/Plugins");
        let project = result.graph.project(&path).unwrap();
        let target = project.target("MyPluginPlugin").unwrap();
        assert_eq!(target.sources().len(), 2);
        assert!(target.dependencies().is_empty());

        let scheme = &project.schemes()[0];
        assert!(scheme.run_action().is_none());
        assert_eq!(scheme.target_references().count(), 1);
    }

    #[test]
    fn test_unloadable_plugin_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("Good");
        let bad = tmp.path().join("Bad");
        fs::create_dir_all(&good).unwrap();
        fs::create_dir_all(&bad).unwrap();
        fs::write(good.join("Plugin.swift"), "").unwrap();
        fs::write(bad.join("Plugin.swift"), "").unwrap();

        let plugin_manifests = vec![bad.join("Plugin.swift"), good.join("Plugin.swift")];
        let loader = FailingLoader {
            fail_for: bad.clone(),
        };
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer
            .synthesize(&request(&[], &plugin_manifests, &[]))
            .unwrap();

        let path = PathBuf::from("/src/Plugins");
        let project = result.graph.project(&path).unwrap();
        let names: Vec<_> = project.targets().iter().map(Target::name).collect();
        assert_eq!(names, vec!["GoodPlugin"]);
    }

    #[test]
    fn test_workspace_members_in_project_order() {
        let tmp = TempDir::new().unwrap();
        let plugin_dir = tmp.path().join("MyPlugin");
        fs::create_dir_all(&plugin_dir).unwrap();
        fs::write(plugin_dir.join("Plugin.swift"), "").unwrap();

        let manifests = vec![PathBuf::from("/src/App/Project.swift")];
        let plugin_manifests = vec![plugin_dir.join("Plugin.swift")];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);
        let result = synthesizer
            .synthesize(&request(&manifests, &plugin_manifests, &[]))
            .unwrap();

        assert_eq!(
            result.workspace.projects(),
            &[PathBuf::from("/src"), PathBuf::from("/src/Plugins")]
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let manifests = vec![
            PathBuf::from("/src/App/Project.swift"),
            PathBuf::from("/src/Lib/Project.swift"),
        ];
        let helpers = vec![PathBuf::from("/src/Helpers/Extensions.swift")];
        let loader = OkLoader;
        let synthesizer = ManifestGraphSynthesizer::new(&loader);

        let first = synthesizer
            .synthesize(&request(&manifests, &[], &helpers))
            .unwrap();
        let second = synthesizer
            .synthesize(&request(&manifests, &[], &helpers))
            .unwrap();
        assert_eq!(first, second);
    }
}
