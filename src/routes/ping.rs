use axum::{http::StatusCode, response::IntoResponse};

use crate::utils::success_response;

/// 健康检查接口
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, success_response("pong"))
}
