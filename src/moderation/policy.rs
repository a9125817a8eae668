use crate::infrastructure::{ChatApi, ClientError};
use crate::models::{Role, RolePartition};
use crate::roster::{RosterError, fetch_live_roster};

use super::count_emojis;

pub const MASS_MENTION_TOKEN: &str = "[toall]";
pub const EMOJI_FLOOD_THRESHOLD: usize = 50;

/// A rule broken by a non-admin message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MassMention,
    EmojiFlood { count: usize },
}

impl Violation {
    pub fn reason(&self) -> String {
        match self {
            Violation::MassMention => format!("{MASS_MENTION_TOKEN} を使用したため"),
            Violation::EmojiFlood { count } => format!("Chatwork絵文字を{count}個送信したため"),
        }
    }
}

pub fn check_mass_mention(body: &str, is_admin: bool) -> Option<Violation> {
    (!is_admin && body.contains(MASS_MENTION_TOKEN)).then_some(Violation::MassMention)
}

pub fn check_emoji_flood(body: &str, is_admin: bool) -> Option<Violation> {
    if is_admin {
        return None;
    }
    let count = count_emojis(body);
    (count >= EMOJI_FLOOD_THRESHOLD).then_some(Violation::EmojiFlood { count })
}

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("failed to change role: {0}")]
    RoleChange(#[source] ClientError),
}

pub fn demotion_notice(account_id: i64, reason: Option<&str>) -> String {
    let mut message = format!(
        "[info][title]権限変更のお知らせ[/title][To:{account_id}][pname:{account_id}]さんの権限を「閲覧のみ」に変更しました。"
    );
    if let Some(reason) = reason.filter(|r| !r.is_empty()) {
        message.push_str(&format!("\n理由: {reason}"));
    }
    message.push_str("\nルームルールに基づき、ご協力をお願いいたします。[/info]");
    message
}

pub fn demotion_failure_notice(account_id: i64) -> String {
    format!(
        "[error][title]権限変更エラー[/title][To:{account_id}][pname:{account_id}]さんの権限変更に失敗しました。管理者にご連絡ください。[/error]"
    )
}

/// Moves `account_id` to read-only and announces it in the room.
///
/// The role partition is rebuilt from a fresh roster fetch. A failed role
/// update is reported to the room; a failed roster fetch is only logged by
/// the caller.
pub async fn demote_to_readonly(
    chat: &dyn ChatApi,
    room_id: &str,
    account_id: i64,
    user_name: &str,
    reason: Option<&str>,
) -> Result<(), ModerationError> {
    let roster = fetch_live_roster(chat, room_id).await?;
    let partition = RolePartition::from_roster(&roster).assign(account_id, Role::Readonly);

    if let Err(e) = chat.update_roles(room_id, &partition).await {
        tracing::error!("Failed to change role of {} ({}): {}", user_name, account_id, e);
        if let Err(send_err) = chat
            .send_message(room_id, &demotion_failure_notice(account_id))
            .await
        {
            tracing::error!("Failed to report role change error: {}", send_err);
        }
        return Err(ModerationError::RoleChange(e));
    }

    tracing::info!(
        "Changed role of {} ({}) to {}",
        user_name,
        account_id,
        Role::Readonly.as_str()
    );
    if let Err(e) = chat
        .send_message(room_id, &demotion_notice(account_id, reason))
        .await
    {
        tracing::error!("Failed to send role change notice: {}", e);
    }
    Ok(())
}
