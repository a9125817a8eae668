use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{ClientError, FileStore, StoredFile, ensure_success};

const USER_AGENT: &str = concat!("roomkeeper/", env!("CARGO_PKG_VERSION"));

/// Contents API client bound to one repository branch.
pub struct GithubClient {
    http: Client,
    base_url: String,
    token: String,
    owner: String,
    repo: String,
    branch: String,
}

#[derive(Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

impl GithubClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url,
            self.owner,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.contents_url(path))
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
    }
}

// content arrives as newline-wrapped base64
fn decode_content(encoded: &str) -> Result<String, ClientError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl FileStore for GithubClient {
    async fn read_file(&self, path: &str) -> Result<Option<StoredFile>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, path)
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!("File '{}' does not exist on branch {}", path, self.branch);
            return Ok(None);
        }
        let contents = ensure_success(response)
            .await?
            .json::<ContentsResponse>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        tracing::info!("Fetched '{}' from {}/{}", path, self.owner, self.repo);
        Ok(Some(StoredFile {
            content: decode_content(&contents.content)?,
            sha: contents.sha,
        }))
    }

    async fn write_file(
        &self,
        path: &str,
        content: &str,
        commit_message: &str,
        sha: Option<&str>,
    ) -> Result<(), ClientError> {
        let body = PutContentsRequest {
            message: commit_message,
            content: STANDARD.encode(content.as_bytes()),
            branch: &self.branch,
            sha,
        };
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(&body)
            .send()
            .await?;
        ensure_success(response).await?;
        if sha.is_some() {
            tracing::info!("Updated '{}' in {}/{}", path, self.owner, self.repo);
        } else {
            tracing::info!("Created '{}' in {}/{}", path, self.owner, self.repo);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_base64_content_is_decoded() {
        let encoded = STANDARD.encode("[\n  {\"name\": \"山田\"}\n]");
        let (head, tail) = encoded.split_at(10);
        let wrapped = format!("{head}\n{tail}\n");
        assert_eq!(decode_content(&wrapped).unwrap(), "[\n  {\"name\": \"山田\"}\n]");
    }

    #[test]
    fn invalid_content_is_a_decode_error() {
        assert!(matches!(decode_content("@@@"), Err(ClientError::Decode(_))));
    }

    #[test]
    fn contents_url_includes_repository_and_path() {
        let client = GithubClient::new(Client::new(), "https://api.github.com", "t", "me", "data", "main");
        assert_eq!(
            client.contents_url("/data/members.json"),
            "https://api.github.com/repos/me/data/contents/data/members.json"
        );
    }
}
