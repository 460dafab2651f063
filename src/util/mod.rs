//! Shared utilities

pub mod diagnostic;
pub mod fs;
pub mod root;

pub use root::{FileProbe, NativeFileProbe, RootLocator};
