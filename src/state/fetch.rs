// Fetch state for the comment list.
// Exactly one of loading, loaded, or failed at any time.

use crate::api::Comment;

/// Tri-state result of fetching comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Loading,
    Success(Vec<Comment>),
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchState::Success(_))
    }

    pub fn comments(&self) -> Option<&[Comment]> {
        match self {
            FetchState::Success(comments) => Some(comments),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Number of rows the list would show.
    pub fn len(&self) -> usize {
        self.comments().map_or(0, <[Comment]>::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        let state = FetchState::default();
        assert!(state.is_loading());
        assert_eq!(state.comments(), None);
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn test_accessors() {
        let state = FetchState::Success(vec![Comment::new(1, 1, "a", "b", "c")]);
        assert!(state.is_success());
        assert_eq!(state.len(), 1);
        assert_eq!(state.error(), None);

        let state = FetchState::Error("Server error: 500".to_string());
        assert_eq!(state.error(), Some("Server error: 500"));
        assert_eq!(state.len(), 0);
    }
}
