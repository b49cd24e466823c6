// Comments API module.
// HTTP client and typed access to the comments endpoint.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use endpoints::RemoteSource;
pub use types::{Comment, ImageRef};
