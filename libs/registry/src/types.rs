//! Records decoded from Docker Hub API responses.
//!
//! Fields the API may send as `null`, omit, or leave loosely typed are
//! `Option`s so that decoding tolerates schema drift. The fields that identify
//! a record (`name`, `namespace`) are required.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
///
/// `next` and `previous` are the API's cursor URLs. They are decoded but
/// never followed: listings always stop at page 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub previous: Option<String>,

    /// Items on this page, in API order.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Whether the registry reported more items than this page holds.
    pub fn is_truncated(&self) -> bool {
        self.next.is_some() || self.count > self.results.len() as u64
    }
}

/// Repositories owned by a user, most recently updated first.
pub type RepositoryList = Page<Repository>;

/// Tags of a repository, most recently updated first.
pub type TagList = Page<Tag>;

/// A repository on the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub namespace: String,

    #[serde(default)]
    pub repository_type: Option<String>,

    #[serde(default)]
    pub status: i64,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub star_count: u64,

    #[serde(default)]
    pub pull_count: u64,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub date_registered: Option<DateTime<Utc>>,

    #[serde(default)]
    pub affiliation: Option<String>,

    #[serde(default)]
    pub media_types: Vec<String>,
}

impl Repository {
    /// A repository known only by namespace and name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            repository_type: None,
            status: 0,
            description: None,
            is_private: false,
            star_count: 0,
            pull_count: 0,
            last_updated: None,
            date_registered: None,
            affiliation: None,
            media_types: Vec::new(),
        }
    }

    /// `namespace/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// A tag within a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: u64,

    pub name: String,

    /// Platform images, one per architecture/OS.
    #[serde(default)]
    pub images: Vec<PlatformImage>,

    #[serde(default)]
    pub full_size: Option<u64>,

    #[serde(default)]
    pub digest: Option<String>,

    #[serde(default)]
    pub tag_status: Option<String>,

    #[serde(default)]
    pub tag_last_pushed: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tag_last_pulled: Option<DateTime<Utc>>,

    #[serde(default)]
    pub media_type: Option<String>,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_updater_username: Option<String>,

    #[serde(default)]
    pub creator: Option<u64>,

    #[serde(default)]
    pub repository: Option<u64>,

    #[serde(default)]
    pub v2: Option<bool>,
}

impl Tag {
    /// Whether the tag has at least one platform image and can be pulled.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// A single architecture/OS image behind a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformImage {
    #[serde(default)]
    pub architecture: String,

    #[serde(default)]
    pub variant: Option<String>,

    #[serde(default)]
    pub features: Option<String>,

    #[serde(default)]
    pub digest: Option<String>,

    #[serde(default)]
    pub os: Option<String>,

    #[serde(default)]
    pub os_features: Option<String>,

    #[serde(default)]
    pub os_version: Option<String>,

    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub last_pulled: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_pushed: Option<DateTime<Utc>>,
}

impl PlatformImage {
    /// `os/architecture[/variant]`, e.g. `linux/arm64/v8`.
    pub fn platform(&self) -> String {
        let os = self.os.as_deref().unwrap_or("unknown");
        match self.variant.as_deref().filter(|v| !v.is_empty()) {
            Some(variant) => format!("{}/{}/{}", os, self.architecture, variant),
            None => format!("{}/{}", os, self.architecture),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPOSITORIES: &str = r#"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "name": "widget",
                "namespace": "acme",
                "repository_type": "image",
                "status": 1,
                "status_description": "active",
                "description": "",
                "is_private": false,
                "star_count": 3,
                "pull_count": 1204,
                "last_updated": "2024-03-01T10:20:30.123456Z",
                "date_registered": "2022-11-05T08:00:00Z",
                "affiliation": "",
                "media_types": ["application/vnd.docker.container.image.v1+json"],
                "content_types": ["image"]
            },
            {
                "name": "gadget",
                "namespace": "acme",
                "repository_type": null,
                "status": 1,
                "is_private": true,
                "star_count": 0,
                "pull_count": 0,
                "last_updated": null,
                "date_registered": "2023-01-01T00:00:00Z",
                "affiliation": null,
                "media_types": []
            }
        ]
    }"#;

    const TAGS: &str = r#"{
        "count": 1,
        "next": "https://hub.docker.com/v2/repositories/acme/widget/tags/?page=2",
        "previous": null,
        "results": [
            {
                "creator": 7,
                "id": 42,
                "images": [
                    {
                        "architecture": "arm64",
                        "features": "",
                        "variant": "v8",
                        "digest": "sha256:aaa",
                        "os": "linux",
                        "os_features": "",
                        "os_version": null,
                        "size": 2811478,
                        "status": "active",
                        "last_pulled": null,
                        "last_pushed": "2024-03-01T10:20:30.000000Z"
                    }
                ],
                "last_updated": "2024-03-01T10:20:31.000000Z",
                "last_updater": 7,
                "last_updater_username": "acme",
                "name": "v1.2",
                "repository": 99,
                "full_size": 2811478,
                "v2": true,
                "tag_status": "active",
                "tag_last_pulled": null,
                "tag_last_pushed": "2024-03-01T10:20:31.000000Z",
                "media_type": "application/vnd.oci.image.index.v1+json",
                "content_type": "image",
                "digest": "sha256:bbb"
            }
        ]
    }"#;

    #[test]
    fn test_decode_repository_list() {
        let list: RepositoryList = serde_json::from_str(REPOSITORIES).unwrap();
        assert_eq!(list.count, 2);
        assert_eq!(list.results.len(), 2);
        assert!(!list.is_truncated());

        let widget = &list.results[0];
        assert_eq!(widget.full_name(), "acme/widget");
        assert_eq!(widget.repository_type.as_deref(), Some("image"));
        assert_eq!(widget.pull_count, 1204);
        assert!(widget.last_updated.is_some());

        let gadget = &list.results[1];
        assert!(gadget.is_private);
        assert_eq!(gadget.repository_type, None);
        assert_eq!(gadget.last_updated, None);
        assert!(gadget.media_types.is_empty());
    }

    #[test]
    fn test_decode_tag_list() {
        let list: TagList = serde_json::from_str(TAGS).unwrap();
        assert!(list.is_truncated());

        let tag = &list.results[0];
        assert_eq!(tag.id, 42);
        assert_eq!(tag.name, "v1.2");
        assert!(tag.has_images());
        assert_eq!(tag.tag_last_pulled, None);
        assert_eq!(tag.digest.as_deref(), Some("sha256:bbb"));

        let image = &tag.images[0];
        assert_eq!(image.platform(), "linux/arm64/v8");
        assert_eq!(image.os_version, None);
        assert_eq!(image.size, 2811478);
    }

    #[test]
    fn test_tag_without_images_field() {
        let tag: Tag = serde_json::from_str(r#"{"name": "empty"}"#).unwrap();
        assert!(!tag.has_images());
    }

    #[test]
    fn test_missing_results_is_rejected() {
        let result: Result<TagList, _> = serde_json::from_str(r#"{"count": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_repository_new() {
        let repo = Repository::new("acme", "widget");
        assert_eq!(repo.full_name(), "acme/widget");
        assert!(repo.media_types.is_empty());
    }

    #[test]
    fn test_repository_requires_namespace() {
        let result: Result<Repository, _> = serde_json::from_str(r#"{"name": "widget"}"#);
        assert!(result.is_err());
    }
}
