use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};

use super::model::{MESSAGE_CREATED, MessageCreatedEvent, WebhookEnvelope};
use crate::AppState;
use crate::chat_log::append_log_entry;
use crate::error::AppError;
use crate::models::{LogEntry, is_admin};
use crate::moderation::{Violation, check_emoji_flood, check_mass_mention, demote_to_readonly, omikuji};
use crate::roster::fetch_live_roster;
use crate::utils::{self, ignored_response, success_response};

#[axum::debug_handler]
pub async fn receive_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let envelope: WebhookEnvelope = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Rejected webhook payload: {}", e);
        AppError::InvalidEvent("Invalid webhook event".to_string())
    })?;

    let Some(event_type) = envelope.webhook_event_type else {
        tracing::warn!("Rejected webhook event without 'webhook_event_type'");
        return Err(AppError::InvalidEvent("Invalid webhook event".to_string()));
    };

    if event_type != MESSAGE_CREATED {
        tracing::info!("Webhook event type '{}' is not handled", event_type);
        return Ok((StatusCode::OK, ignored_response("Event type not handled")));
    }

    let event: MessageCreatedEvent = envelope
        .webhook_event
        .ok_or_else(|| "missing 'webhook_event'".to_string())
        .and_then(|raw| serde_json::from_value(raw).map_err(|e| e.to_string()))
        .map_err(|e| {
            tracing::warn!("Rejected malformed {} event: {}", MESSAGE_CREATED, e);
            AppError::InvalidEvent("Invalid message event".to_string())
        })?;

    process_message(&state, &event).await?;
    Ok((StatusCode::OK, success_response("Message processed")))
}

/// Runs every per-message step. Only a failed roster fetch stops processing;
/// the log append and each rule report their own failures and move on.
pub async fn process_message(state: &AppState, event: &MessageCreatedEvent) -> Result<(), AppError> {
    let room_id = state.config.chatwork_room_id.as_str();
    let message = &event.message;
    let sender = &event.account;
    tracing::info!(
        "Processing message {} from {} ({})",
        message.message_id,
        sender.name,
        sender.account_id
    );

    let entry = LogEntry {
        timestamp: utils::now(),
        user_name: sender.name.clone(),
        user_id: sender.account_id,
        message_body: message.body.clone(),
        message_id: message.message_id.clone(),
    };
    if let Err(e) = append_log_entry(&*state.store, &state.config.log_file_path, &entry).await {
        tracing::error!("Failed to append message {} to log: {}", message.message_id, e);
    }

    let roster = fetch_live_roster(&*state.chat, room_id).await.map_err(|e| {
        tracing::error!("Skipping moderation for message {}: {}", message.message_id, e);
        AppError::from(e)
    })?;
    let sender_is_admin = is_admin(sender.account_id, &roster);

    if let Some(violation) = check_mass_mention(&message.body, sender_is_admin) {
        enforce(state, sender.account_id, &sender.name, &violation).await;
    }

    if message.body.trim() == omikuji::OMIKUJI_KEYWORD {
        tracing::info!("Omikuji requested by {} ({})", sender.name, sender.account_id);
        let result = omikuji::draw(sender_is_admin);
        let reply = omikuji::reply_message(
            sender.account_id,
            room_id,
            &message.message_id,
            &sender.name,
            result,
        );
        if let Err(e) = state.chat.send_message(room_id, &reply).await {
            tracing::error!("Failed to send omikuji result: {}", e);
        }
    }

    if let Some(violation) = check_emoji_flood(&message.body, sender_is_admin) {
        enforce(state, sender.account_id, &sender.name, &violation).await;
    }

    Ok(())
}

async fn enforce(state: &AppState, account_id: i64, user_name: &str, violation: &Violation) {
    tracing::info!("Violation by {} ({}): {:?}", user_name, account_id, violation);
    let reason = violation.reason();
    if let Err(e) = demote_to_readonly(
        &*state.chat,
        &state.config.chatwork_room_id,
        account_id,
        user_name,
        Some(&reason),
    )
    .await
    {
        tracing::error!("Failed to demote {} ({}): {}", user_name, account_id, e);
    }
}
