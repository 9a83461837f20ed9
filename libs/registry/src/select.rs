//! Choosing which image to pull.

use crate::types::{Repository, TagList};

/// Format a pull reference: `namespace/name:tag`.
pub fn image_reference(namespace: &str, name: &str, tag: &str) -> String {
    format!("{}/{}:{}", namespace, name, tag)
}

/// Pick the pull target for `repo` from its tag listing.
///
/// Tags are scanned in the order the API returned them (newest first) and the
/// first one with at least one platform image wins. `None` means there is
/// nothing to pull.
pub fn select_pull_target(tags: &TagList, repo: &Repository) -> Option<String> {
    tags.results
        .iter()
        .find(|tag| tag.has_images())
        .map(|tag| image_reference(&repo.namespace, &repo.name, &tag.name))
}
