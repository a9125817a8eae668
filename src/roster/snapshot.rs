use crate::infrastructure::{ClientError, FileStore};
use crate::models::Member;

pub const MEMBER_COMMIT_MESSAGE: &str = "Update member list via bot";

/// The stored roster and the revision it was read at.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub sha: Option<String>,
}

/// Loads the stored roster. A missing file is an empty snapshot; an
/// unparsable one is logged and also treated as empty.
pub async fn load_snapshot(store: &dyn FileStore, path: &str) -> Result<Snapshot, ClientError> {
    let Some(file) = store.read_file(path).await? else {
        return Ok(Snapshot::default());
    };
    let members = match serde_json::from_str::<Vec<Member>>(&file.content) {
        Ok(members) => {
            tracing::info!("Loaded {} stored members from '{}'", members.len(), path);
            members
        }
        Err(e) => {
            tracing::error!("Failed to parse member file '{}': {}", path, e);
            Vec::new()
        }
    };
    Ok(Snapshot {
        members,
        sha: Some(file.sha),
    })
}

pub async fn save_snapshot(
    store: &dyn FileStore,
    path: &str,
    members: &[Member],
    sha: Option<&str>,
) -> Result<(), ClientError> {
    let content =
        serde_json::to_string_pretty(members).map_err(|e| ClientError::Encode(e.to_string()))?;
    store
        .write_file(path, &content, MEMBER_COMMIT_MESSAGE, sha)
        .await
}
