//! Workspace-native tree data and deterministic sibling ordering.
//!
//! The ordering below is a strict total order, so generated output is
//! byte-stable across runs no matter what order the filesystem (or any
//! upstream enumerator) produced the elements in.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::workspace::PROJECT_BUNDLE_EXTENSION;

/// One node of the workspace-native tree.
///
/// Locations are relative to the parent element's base path; nested
/// groups re-root their children at their own location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeElement {
    /// A leaf reference to a file, folder, or generated project bundle
    FileRef { location: PathBuf },

    /// A named container of further elements
    Group {
        name: String,
        location: PathBuf,
        children: Vec<TreeElement>,
    },
}

impl TreeElement {
    /// Create a leaf reference.
    pub fn file_ref(location: impl Into<PathBuf>) -> Self {
        TreeElement::FileRef {
            location: location.into(),
        }
    }

    /// Create a group.
    pub fn group(
        name: impl Into<String>,
        location: impl Into<PathBuf>,
        children: Vec<TreeElement>,
    ) -> Self {
        TreeElement::Group {
            name: name.into(),
            location: location.into(),
            children,
        }
    }

    /// Check if this element is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, TreeElement::Group { .. })
    }
}

fn is_project_bundle(location: &Path) -> bool {
    location
        .extension()
        .is_some_and(|ext| ext == PROJECT_BUNDLE_EXTENSION)
}

/// Total order over sibling elements:
/// 1. File-like elements before groups, unconditionally.
/// 2. Groups ordered lexicographically by location string.
/// 3. Files: project-bundle references after all other references;
///    within each class, lexicographically by location string.
pub fn sibling_order(a: &TreeElement, b: &TreeElement) -> Ordering {
    match (a, b) {
        (TreeElement::FileRef { .. }, TreeElement::Group { .. }) => Ordering::Less,
        (TreeElement::Group { .. }, TreeElement::FileRef { .. }) => Ordering::Greater,
        (TreeElement::Group { location: la, .. }, TreeElement::Group { location: lb, .. }) => {
            la.as_os_str().cmp(lb.as_os_str())
        }
        (TreeElement::FileRef { location: la }, TreeElement::FileRef { location: lb }) => {
            is_project_bundle(la)
                .cmp(&is_project_bundle(lb))
                .then_with(|| la.as_os_str().cmp(lb.as_os_str()))
        }
    }
}

/// Sort a group's immediate children by [`sibling_order`].
pub fn sort_siblings(children: &mut [TreeElement]) {
    children.sort_by(sibling_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(location: &str) -> TreeElement {
        TreeElement::file_ref(location)
    }

    fn group(location: &str) -> TreeElement {
        TreeElement::group(location, location, Vec::new())
    }

    #[test]
    fn test_files_sort_before_groups() {
        let mut siblings = vec![group("AGroup"), file("zfile.md")];
        sort_siblings(&mut siblings);
        assert!(!siblings[0].is_group());
        assert!(siblings[1].is_group());
    }

    #[test]
    fn test_project_bundles_sort_after_plain_files() {
        let mut siblings = vec![
            file("A.xcodeproj"),
            file("z.md"),
            file("B.xcodeproj"),
            file("a.md"),
        ];
        sort_siblings(&mut siblings);
        let locations: Vec<_> = siblings
            .iter()
            .map(|e| match e {
                TreeElement::FileRef { location } => location.to_string_lossy().into_owned(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(locations, vec!["a.md", "z.md", "A.xcodeproj", "B.xcodeproj"]);
    }

    #[test]
    fn test_groups_sort_by_location() {
        let mut siblings = vec![group("b"), group("a"), group("c")];
        sort_siblings(&mut siblings);
        match (&siblings[0], &siblings[2]) {
            (
                TreeElement::Group { location: first, .. },
                TreeElement::Group { location: last, .. },
            ) => {
                assert_eq!(first, Path::new("a"));
                assert_eq!(last, Path::new("c"));
            }
            _ => panic!("expected groups"),
        }
    }

    #[test]
    fn test_order_is_total() {
        // Antisymmetry and transitivity over a mixed sample, pairwise.
        let elements = vec![
            file("a.md"),
            file("b.md"),
            file("A.xcodeproj"),
            group("a"),
            group("b"),
        ];
        for x in &elements {
            assert_eq!(sibling_order(x, x), Ordering::Equal);
            for y in &elements {
                assert_eq!(sibling_order(x, y), sibling_order(y, x).reverse());
                for z in &elements {
                    if sibling_order(x, y) == Ordering::Less
                        && sibling_order(y, z) == Ordering::Less
                    {
                        assert_eq!(sibling_order(x, z), Ordering::Less);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_is_independent_of_input_order() {
        let mut a = vec![file("b.md"), group("g"), file("A.xcodeproj"), file("a.md")];
        let mut b = a.clone();
        b.reverse();
        sort_siblings(&mut a);
        sort_siblings(&mut b);
        assert_eq!(a, b);
    }
}
