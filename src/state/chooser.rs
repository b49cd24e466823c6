// Image chooser prompt state.
// Collects an image path or URI for one comment's avatar.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::api::{Comment, ImageRef};

/// An open "pick an image" prompt for one comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageChooser {
    /// Comment the image is for.
    pub comment_id: i64,
    /// Label shown in the prompt title.
    pub label: String,
    /// What the user has typed so far.
    pub input: String,
}

impl ImageChooser {
    /// Open a prompt for `comment`, prefilled with its current image.
    /// Comments without an id cannot hold a selection.
    pub fn for_comment(comment: &Comment, current: Option<&ImageRef>) -> Option<Self> {
        let comment_id = comment.id?;
        let label = comment
            .name
            .clone()
            .unwrap_or_else(|| format!("comment #{}", comment_id));
        Some(Self {
            comment_id,
            label,
            input: current.map(|image| image.to_string()).unwrap_or_default(),
        })
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// The chosen image, or None when nothing was entered.
    pub fn finish(&self) -> Option<ImageRef> {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        let cwd = std::env::current_dir().ok();
        resolve_image_input(&self.input, home.as_deref(), cwd.as_deref())
    }
}

/// Turn prompt input into an image reference.
///
/// URIs are kept verbatim. `~/` expands to `home`; relative paths are
/// anchored at `cwd` so the reference still works from another directory.
pub fn resolve_image_input(
    input: &str,
    home: Option<&Path>,
    cwd: Option<&Path>,
) -> Option<ImageRef> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.contains("://") {
        return Some(ImageRef::new(input));
    }

    let path = if let Some(rest) = input.strip_prefix("~/") {
        match home {
            Some(home) => home.join(rest),
            None => PathBuf::from(input),
        }
    } else {
        let path = PathBuf::from(input);
        match cwd {
            Some(cwd) if path.is_relative() => cwd.join(path),
            _ => path,
        }
    };

    Some(ImageRef::new(path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_without_id_has_no_chooser() {
        let comment = Comment {
            name: Some("anon".to_string()),
            ..Comment::default()
        };
        assert!(ImageChooser::for_comment(&comment, None).is_none());
    }

    #[test]
    fn test_prefills_current_image() {
        let comment = Comment::new(1, 4, "Dana", "dana@example.com", "body");
        let current = ImageRef::new("/pics/dana.png");
        let chooser = ImageChooser::for_comment(&comment, Some(&current)).unwrap();
        assert_eq!(chooser.comment_id, 4);
        assert_eq!(chooser.label, "Dana");
        assert_eq!(chooser.input, "/pics/dana.png");
    }

    #[test]
    fn test_editing_input() {
        let comment = Comment::new(1, 4, "Dana", "dana@example.com", "body");
        let mut chooser = ImageChooser::for_comment(&comment, None).unwrap();
        for c in "a.pngx".chars() {
            chooser.push(c);
        }
        chooser.pop();
        assert_eq!(chooser.input, "a.png");
        chooser.clear();
        assert_eq!(chooser.finish(), None);
    }

    #[test]
    fn test_resolve_image_input() {
        let home = Path::new("/home/me");
        let cwd = Path::new("/work");

        assert_eq!(resolve_image_input("   ", Some(home), Some(cwd)), None);
        assert_eq!(
            resolve_image_input("https://example.com/a.png", Some(home), Some(cwd)),
            Some(ImageRef::new("https://example.com/a.png"))
        );
        assert_eq!(
            resolve_image_input("~/pics/a.png", Some(home), Some(cwd)),
            Some(ImageRef::new("/home/me/pics/a.png"))
        );
        assert_eq!(
            resolve_image_input("pics/a.png", Some(home), Some(cwd)),
            Some(ImageRef::new("/work/pics/a.png"))
        );
        assert_eq!(
            resolve_image_input("/abs/a.png", Some(home), Some(cwd)),
            Some(ImageRef::new("/abs/a.png"))
        );
    }
}
