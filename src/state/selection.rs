// Avatar image selections.
// Maps a comment id to the image the user picked for its avatar slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::ImageRef;

/// Comment id → chosen image. Entries are only ever added or overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSelection {
    images: BTreeMap<i64, Option<ImageRef>>,
}

impl ImageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image chosen for `comment_id`, if any.
    pub fn get(&self, comment_id: i64) -> Option<&ImageRef> {
        self.images.get(&comment_id).and_then(Option::as_ref)
    }

    /// Insert or overwrite the entry for `comment_id`.
    pub fn insert(&mut self, comment_id: i64, image: Option<ImageRef>) {
        self.images.insert(comment_id, image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Number of entries that actually carry an image.
    pub fn chosen_count(&self) -> usize {
        self.images.values().filter(|image| image.is_some()).count()
    }
}
