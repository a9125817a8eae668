//! Member roster: live fetch, snapshot persistence, and the sync job that
//! welcomes newly joined members.

mod diff;
mod snapshot;
mod sync;

pub use diff::{find_new_members, merge_snapshot};
pub use snapshot::{MEMBER_COMMIT_MESSAGE, Snapshot, load_snapshot, save_snapshot};
pub use sync::{SyncError, SyncReport, sync_members, welcome_message};

use crate::infrastructure::{ChatApi, ClientError};
use crate::models::RoomMember;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to fetch room members: {0}")]
    Unavailable(#[from] ClientError),
    #[error("room returned no members")]
    Empty,
}

/// Fetches the live roster. An empty roster is treated as a failed fetch:
/// a monitored room always contains at least the bot account.
pub async fn fetch_live_roster(
    chat: &dyn ChatApi,
    room_id: &str,
) -> Result<Vec<RoomMember>, RosterError> {
    let members = chat.list_members(room_id).await?;
    if members.is_empty() {
        return Err(RosterError::Empty);
    }
    Ok(members)
}
