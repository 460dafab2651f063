//! Ephemeral graph synthesis for manifest editing.
//!
//! Configuration manifests are not normally buildable on their own. The
//! synthesizer wraps them in a throwaway workspace/graph pair so they can
//! be edited, built, and run as first-class targets.

pub mod manifests;
pub mod naming;

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use manifests::{ManifestGraphSynthesizer, SynthesisRequest, SynthesizedWorkspace};

/// Metadata of a loaded plugin manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Plugin name as declared by its manifest
    pub name: String,
}

/// Plugin manifest loading, implemented outside this crate.
///
/// The synthesizer uses it only to validate a candidate plugin
/// directory; a load failure excludes the plugin from synthesis rather
/// than aborting it.
pub trait PluginLoader: Sync {
    /// Load the plugin manifest in `directory`.
    fn load_plugin(&self, directory: &Path) -> Result<PluginMetadata>;
}
