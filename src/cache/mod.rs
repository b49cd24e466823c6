// Cache module for local filesystem persistence.
// Keeps the last fetched comment list and the chosen avatar images.

pub mod paths;
pub mod store;

pub use store::CommentStore;
