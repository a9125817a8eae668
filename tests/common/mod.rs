#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use reqwest::StatusCode;
use tokio::sync::Notify;
use roomkeeper::{
    AppState,
    config::Config,
    create_router,
    infrastructure::{ChatApi, ClientError, FileStore, StoredFile},
    models::{Role, RolePartition, RoomMember},
};

pub const ROOM_ID: &str = "404646956";
pub const MEMBER_FILE: &str = "data/members.json";
pub const LOG_FILE: &str = "data/logs.json";

pub fn test_config() -> Config {
    Config {
        chatwork_api_token: "chatwork-token".into(),
        chatwork_room_id: ROOM_ID.into(),
        chatwork_api_base: "http://chatwork.invalid".into(),
        github_token: "github-token".into(),
        github_repo_owner: "owner".into(),
        github_repo_name: "bot-data".into(),
        github_branch: "main".into(),
        github_api_base: "http://github.invalid".into(),
        member_file_path: MEMBER_FILE.into(),
        log_file_path: LOG_FILE.into(),
        server_host: "127.0.0.1".into(),
        server_port: 0,
        announcer_enabled: false,
    }
}

pub fn member(account_id: i64, name: &str, role: Role) -> RoomMember {
    RoomMember {
        account_id,
        name: name.into(),
        role,
    }
}

fn unavailable() -> ClientError {
    ClientError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "unavailable".into(),
    }
}

/// In-memory chat room recording every outbound call.
#[derive(Default)]
pub struct FakeChat {
    pub roster: Mutex<Vec<RoomMember>>,
    pub fail_list: Mutex<bool>,
    pub fail_update: Mutex<bool>,
    pub fail_send: Mutex<bool>,
    pub sent: Mutex<Vec<String>>,
    pub role_updates: Mutex<Vec<RolePartition>>,
}

impl FakeChat {
    pub fn with_roster(roster: Vec<RoomMember>) -> Arc<Self> {
        let chat = Self::default();
        *chat.roster.lock().unwrap() = roster;
        Arc::new(chat)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn role_updates(&self) -> Vec<RolePartition> {
        self.role_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatApi for FakeChat {
    async fn list_members(&self, room_id: &str) -> Result<Vec<RoomMember>, ClientError> {
        assert_eq!(room_id, ROOM_ID);
        if *self.fail_list.lock().unwrap() {
            return Err(unavailable());
        }
        Ok(self.roster.lock().unwrap().clone())
    }

    async fn send_message(&self, room_id: &str, body: &str) -> Result<(), ClientError> {
        assert_eq!(room_id, ROOM_ID);
        if *self.fail_send.lock().unwrap() {
            return Err(unavailable());
        }
        self.sent.lock().unwrap().push(body.to_string());
        Ok(())
    }

    async fn update_roles(&self, room_id: &str, roles: &RolePartition) -> Result<(), ClientError> {
        assert_eq!(room_id, ROOM_ID);
        if *self.fail_update.lock().unwrap() {
            return Err(unavailable());
        }
        self.role_updates.lock().unwrap().push(roles.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Commit {
    pub path: String,
    pub content: String,
    pub message: String,
    pub sha: Option<String>,
}

/// In-memory file repository; every write bumps the file revision.
#[derive(Default)]
pub struct FakeStore {
    pub files: Mutex<HashMap<String, StoredFile>>,
    pub fail_read: Mutex<bool>,
    /// When set, the next `read_file` waits for a notification first.
    pub read_gate: Mutex<Option<Arc<Notify>>>,
    pub fail_write: Mutex<bool>,
    pub commits: Mutex<Vec<Commit>>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put(&self, path: &str, content: &str) {
        self.files.lock().unwrap().insert(
            path.into(),
            StoredFile {
                content: content.into(),
                sha: "sha-0".into(),
            },
        );
    }

    pub fn pause_next_read(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.read_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).map(|f| f.content.clone())
    }

    pub fn commits(&self) -> Vec<Commit> {
        self.commits.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for FakeStore {
    async fn read_file(&self, path: &str) -> Result<Option<StoredFile>, ClientError> {
        let gate = self.read_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if *self.fail_read.lock().unwrap() {
            return Err(unavailable());
        }
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    async fn write_file(
        &self,
        path: &str,
        content: &str,
        commit_message: &str,
        sha: Option<&str>,
    ) -> Result<(), ClientError> {
        if *self.fail_write.lock().unwrap() {
            return Err(unavailable());
        }
        let mut commits = self.commits.lock().unwrap();
        commits.push(Commit {
            path: path.into(),
            content: content.into(),
            message: commit_message.into(),
            sha: sha.map(str::to_string),
        });
        self.files.lock().unwrap().insert(
            path.into(),
            StoredFile {
                content: content.into(),
                sha: format!("sha-{}", commits.len()),
            },
        );
        Ok(())
    }
}

pub fn create_test_server(chat: Arc<FakeChat>, store: Arc<FakeStore>) -> TestServer {
    let state = AppState::new(test_config(), chat, store);
    TestServer::new(create_router(state)).expect("Failed to create test server")
}
