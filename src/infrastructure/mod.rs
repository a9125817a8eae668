//! Outbound collaborators: the Chatwork room API and the GitHub contents API.
//!
//! Both are hidden behind traits so handlers and jobs can be exercised with
//! in-memory fakes.

mod chatwork;
mod github;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::{RolePartition, RoomMember};

pub use chatwork::ChatworkClient;
pub use github::GithubClient;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode payload: {0}")]
    Encode(String),
}

/// A file read from the data repository together with its revision marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub content: String,
    pub sha: String,
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// List members of a room with their roles
    async fn list_members(&self, room_id: &str) -> Result<Vec<RoomMember>, ClientError>;

    /// Post a message to a room
    async fn send_message(&self, room_id: &str, body: &str) -> Result<(), ClientError>;

    /// Replace the role assignment of every member of a room
    async fn update_roles(&self, room_id: &str, roles: &RolePartition) -> Result<(), ClientError>;
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Read a file; `Ok(None)` when it does not exist yet
    async fn read_file(&self, path: &str) -> Result<Option<StoredFile>, ClientError>;

    /// Create (`sha == None`) or update a file with a commit
    async fn write_file(
        &self,
        path: &str,
        content: &str,
        commit_message: &str,
        sha: Option<&str>,
    ) -> Result<(), ClientError>;
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
