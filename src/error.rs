use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::roster::{RosterError, SyncError};
use crate::utils::error_response;

#[derive(Debug)]
pub enum AppError {
    InvalidEvent(String),
    RosterUnavailable,
    FailedToLoadMembers,
    FailedToStoreMembers,
}

impl From<RosterError> for AppError {
    fn from(_: RosterError) -> Self {
        AppError::RosterUnavailable
    }
}

impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Snapshot(_) => AppError::FailedToLoadMembers,
            SyncError::Roster(e) => e.into(),
            SyncError::Save(_) => AppError::FailedToStoreMembers,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidEvent(detail) => (StatusCode::BAD_REQUEST, detail),
            AppError::RosterUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Chatwork members retrieval failed".to_string(),
            ),
            AppError::FailedToLoadMembers => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load the stored member list".to_string(),
            ),
            AppError::FailedToStoreMembers => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save the member list".to_string(),
            ),
        };

        (status, error_response(message)).into_response()
    }
}
