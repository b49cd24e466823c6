// Test doubles for the remote comment source.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Notify;

use crate::api::{Comment, RemoteSource};
use crate::error::{LplError, Result};

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Transport,
    Status(u16),
}

enum Reply {
    Comments(Vec<Comment>),
    Fail(Failure),
}

/// Remote source with a canned reply, a call counter, and an optional gate
/// that holds the call open until notified.
pub struct FakeRemote {
    reply: Reply,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FakeRemote {
    pub fn ok(comments: Vec<Comment>) -> Self {
        Self {
            reply: Reply::Comments(comments),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            reply: Reply::Fail(failure),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn fetch_comments(&self) -> Result<Vec<Comment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Reply::Comments(comments) => Ok(comments.clone()),
            Reply::Fail(Failure::Transport) => {
                // reqwest has no public constructor; a builder error is a real one.
                let err = reqwest::Client::new()
                    .get("not a url")
                    .build()
                    .expect_err("invalid url");
                Err(LplError::Transport(err))
            }
            Reply::Fail(Failure::Status(code)) => Err(LplError::Server {
                status: StatusCode::from_u16(*code).expect("valid status"),
            }),
        }
    }
}

pub fn alice() -> Comment {
    Comment::new(1, 1, "Alice", "alice@example.com", "hi")
}

pub fn sample_comments() -> Vec<Comment> {
    vec![
        Comment::new(1, 1, "Alice", "alice@example.com", "First comment"),
        Comment::new(1, 2, "Bob", "bob@example.com", "Second comment"),
        Comment::new(2, 3, "Charlie", "charlie@example.com", "Another thread"),
    ]
}
