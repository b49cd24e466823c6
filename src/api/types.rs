// Comments API response types.
// Every field of the endpoint is nullable, so every field is an Option.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Opaque reference to a locally chosen image (a URI or a filesystem path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short label for the avatar slot: the last path segment of the reference.
    pub fn display_name(&self) -> &str {
        let trimmed = self.0.trim_end_matches('/');
        let without_scheme = trimmed
            .split_once("://")
            .map_or(trimmed, |(_, rest)| rest);
        Path::new(without_scheme)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(without_scheme)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A comment on a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub post_id: Option<i64>,
    /// Identity of the comment within a fetch.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Local-only avatar override. Never sent to the server or written to the cache.
    #[serde(skip)]
    pub image_ref: Option<ImageRef>,
}

impl Comment {
    pub fn new(
        post_id: i64,
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            post_id: Some(post_id),
            id: Some(id),
            name: Some(name.into()),
            email: Some(email.into()),
            body: Some(body.into()),
            image_ref: None,
        }
    }
}
