use async_trait::async_trait;
use reqwest::Client;

use super::{ChatApi, ClientError, ensure_success};
use crate::models::{RolePartition, RoomMember};

const TOKEN_HEADER: &str = "X-ChatWorkToken";

pub struct ChatworkClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ChatworkClient {
    pub fn new(http: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn members_url(&self, room_id: &str) -> String {
        format!("{}/rooms/{}/members", self.base_url, room_id)
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
}

#[async_trait]
impl ChatApi for ChatworkClient {
    async fn list_members(&self, room_id: &str) -> Result<Vec<RoomMember>, ClientError> {
        let response = self
            .http
            .get(self.members_url(room_id))
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;
        let members = ensure_success(response)
            .await?
            .json::<Vec<RoomMember>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        tracing::debug!("Fetched {} members of room {}", members.len(), room_id);
        Ok(members)
    }

    async fn send_message(&self, room_id: &str, body: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/rooms/{}/messages", self.base_url, room_id))
            .header(TOKEN_HEADER, &self.token)
            .form(&[("body", body)])
            .send()
            .await?;
        ensure_success(response).await?;
        tracing::info!("Sent message to room {}", room_id);
        Ok(())
    }

    async fn update_roles(&self, room_id: &str, roles: &RolePartition) -> Result<(), ClientError> {
        let form = [
            ("members_admin_ids", join_ids(&roles.admin_ids)),
            ("members_member_ids", join_ids(&roles.member_ids)),
            ("members_readonly_ids", join_ids(&roles.readonly_ids)),
        ];
        let response = self
            .http
            .put(self.members_url(room_id))
            .header(TOKEN_HEADER, &self.token)
            .form(&form)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
