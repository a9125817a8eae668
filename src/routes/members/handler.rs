use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::AppState;
use crate::error::AppError;
use crate::roster::sync_members;
use crate::utils::success_response;

#[axum::debug_handler]
pub async fn update_members(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    // 同一进程内串行执行，避免快照读写竞争
    let _guard = state.sync_lock.lock().await;

    let report = sync_members(
        &*state.chat,
        &*state.store,
        &state.config.chatwork_room_id,
        &state.config.member_file_path,
    )
    .await
    .map_err(|e| {
        tracing::error!("Member sync failed: {}", e);
        AppError::from(e)
    })?;

    tracing::info!(
        "Member sync finished: {} members, {} new, {} welcomed",
        report.total_members,
        report.new_members.len(),
        report.welcomes_sent
    );
    Ok((
        StatusCode::OK,
        success_response("メンバーリストが更新され、新規メンバーが処理されました。"),
    ))
}
