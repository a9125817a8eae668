use crate::infrastructure::{ChatApi, ClientError, FileStore};
use crate::models::Member;
use crate::utils;

use super::{RosterError, fetch_live_roster, find_new_members, load_snapshot, merge_snapshot, save_snapshot};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to read member snapshot: {0}")]
    Snapshot(#[source] ClientError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("failed to save member snapshot: {0}")]
    Save(#[source] ClientError),
}

#[derive(Debug)]
pub struct SyncReport {
    pub total_members: usize,
    pub new_members: Vec<Member>,
    pub welcomes_sent: usize,
}

pub fn welcome_message(account_id: i64, total_members: usize) -> String {
    format!(
        "[To:{account_id}][pname:{account_id}]さん！こんにちは！\nこれでこのグループの人数は{total_members}人になりました！\nよろしくお願いします！"
    )
}

/// Refreshes the stored roster and welcomes every account that joined since
/// the last run. The snapshot is rewritten even when nobody joined.
pub async fn sync_members(
    chat: &dyn ChatApi,
    store: &dyn FileStore,
    room_id: &str,
    snapshot_path: &str,
) -> Result<SyncReport, SyncError> {
    let previous = load_snapshot(store, snapshot_path)
        .await
        .map_err(SyncError::Snapshot)?;
    let current = fetch_live_roster(chat, room_id).await?;

    let now = utils::now();
    let new_members = find_new_members(&current, &previous.members, now);
    let total_members = current.len();

    let mut welcomes_sent = 0;
    if new_members.is_empty() {
        tracing::info!("No new members in room {}", room_id);
    }
    for member in &new_members {
        tracing::info!("New member detected: {} ({})", member.name, member.account_id);
        match chat
            .send_message(room_id, &welcome_message(member.account_id, total_members))
            .await
        {
            Ok(()) => welcomes_sent += 1,
            Err(e) => tracing::error!(
                "Failed to welcome {} ({}): {}",
                member.name,
                member.account_id,
                e
            ),
        }
    }

    let snapshot = merge_snapshot(&current, &previous.members, now);
    save_snapshot(store, snapshot_path, &snapshot, previous.sha.as_deref())
        .await
        .map_err(SyncError::Save)?;

    Ok(SyncReport {
        total_members,
        new_members,
        welcomes_sent,
    })
}
