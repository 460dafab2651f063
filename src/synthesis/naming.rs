//! Deterministic target naming for synthesized projects.

use std::collections::BTreeSet;

/// Derive a unique target name from a candidate.
///
/// On collision, prepend an underscore until the name is unused. Given a
/// fixed input order this is fully deterministic: the first occurrence
/// keeps the bare candidate, later ones gain one underscore per prior
/// collision.
pub fn unique_target_name(candidate: impl Into<String>, used: &BTreeSet<String>) -> String {
    let mut name = candidate.into();
    while used.contains(&name) {
        name.insert(0, '_');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_unprefixed() {
        let mut used = BTreeSet::new();
        for expected in ["AppManifests", "_AppManifests", "__AppManifests"] {
            let name = unique_target_name("AppManifests", &used);
            assert_eq!(name, expected);
            used.insert(name);
        }
    }

    #[test]
    fn test_distinct_candidates_untouched() {
        let mut used = BTreeSet::new();
        used.insert("AppManifests".to_string());
        assert_eq!(unique_target_name("LibManifests", &used), "LibManifests");
    }
}
