use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the message log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(with = "crate::utils::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub user_name: String,
    pub user_id: i64,
    pub message_body: String,
    pub message_id: String,
}
