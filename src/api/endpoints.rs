// Comments API endpoint functions.
// The remote source seam the fetch coordinator depends on.

use async_trait::async_trait;

use crate::error::Result;

use super::client::ApiClient;
use super::types::Comment;

/// Path of the comments collection relative to the base URL.
pub const COMMENTS_ENDPOINT: &str = "comments";

/// Source of the remote comment list.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch every comment, once. Implementations must not retry.
    async fn fetch_comments(&self) -> Result<Vec<Comment>>;
}

#[async_trait]
impl RemoteSource for ApiClient {
    async fn fetch_comments(&self) -> Result<Vec<Comment>> {
        let response = self.get(COMMENTS_ENDPOINT).await?;
        let text = response.text().await?;
        let comments: Vec<Comment> = serde_json::from_str(&text)?;
        tracing::debug!(count = comments.len(), "decoded comments");
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LplError;
    use axum::{Router, http::StatusCode, routing::get};
    use reqwest::Client;
    use tokio::net::TcpListener;

    async fn spawn_server(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/posts/1/")
    }

    fn local_client(base_url: &str) -> ApiClient {
        let client = Client::builder().no_proxy().build().expect("client");
        ApiClient::with_client(client, base_url).expect("api client")
    }

    #[tokio::test]
    async fn test_fetch_comments_decodes_array() {
        let app = Router::new().route(
            "/posts/1/comments",
            get(|| async {
                r#"[{"postId":1,"id":1,"name":"Alice","email":"alice@example.com","body":"hi"},
                    {"postId":1,"id":2,"name":"Bob","email":null,"body":"yo"}]"#
            }),
        );
        let base = spawn_server(app).await;

        let comments = local_client(&base).fetch_comments().await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(
            comments[0],
            Comment::new(1, 1, "Alice", "alice@example.com", "hi")
        );
        assert_eq!(comments[1].email, None);
    }

    #[tokio::test]
    async fn test_non_success_status_is_server_error() {
        let app = Router::new().route(
            "/posts/1/comments",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_server(app).await;

        let err = local_client(&base).fetch_comments().await.unwrap_err();
        assert!(matches!(err, LplError::Server { status } if status.as_u16() == 500));
        assert_eq!(err.user_message(), "Server error: 500");
    }

    #[tokio::test]
    async fn test_missing_route_is_404() {
        let base = spawn_server(Router::new()).await;

        let err = local_client(&base).fetch_comments().await.unwrap_err();
        assert_eq!(err.user_message(), "Server error: 404");
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let app = Router::new().route("/posts/1/comments", get(|| async { "not json" }));
        let base = spawn_server(app).await;

        let err = local_client(&base).fetch_comments().await.unwrap_err();
        assert!(matches!(err, LplError::Json(_)));
        assert!(err.user_message().starts_with("Failed to fetch comments:"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let err = local_client(&format!("http://{addr}/"))
            .fetch_comments()
            .await
            .unwrap_err();
        assert!(matches!(err, LplError::Transport(_)));
        assert_eq!(
            err.user_message(),
            "Network error, please check your connection."
        );
    }
}
