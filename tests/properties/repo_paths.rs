//! Property tests for repository path normalization.

use proptest::prelude::*;

use xvmem::denv::normalize_repo_path;

fn windows_path() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap();
    proptest::collection::vec(segment, 1..=5)
}

proptest! {
    /// PROPERTY: backslash separators become forward slashes, segments intact.
    #[test]
    fn property_backslashes_become_slashes(segments in windows_path()) {
        let normalized = normalize_repo_path(&segments.join("\\"));
        prop_assert!(!normalized.contains('\\'));
        prop_assert_eq!(normalized, segments.join("/"));
    }
}
