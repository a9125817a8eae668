//! Append-only message log stored as JSON Lines in the data repository.

use crate::infrastructure::{ClientError, FileStore};
use crate::models::LogEntry;

pub fn commit_message(entry: &LogEntry) -> String {
    format!(
        "Add log for message_id: {} from {}",
        entry.message_id, entry.user_name
    )
}

/// Returns `existing` with `entry` appended as one line. Existing content is
/// kept byte for byte and never parsed.
pub fn append_line(existing: &str, entry: &LogEntry) -> Result<String, serde_json::Error> {
    let mut content = String::with_capacity(existing.len() + 256);
    content.push_str(existing);
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&serde_json::to_string(entry)?);
    content.push('\n');
    Ok(content)
}

pub async fn append_log_entry(
    store: &dyn FileStore,
    path: &str,
    entry: &LogEntry,
) -> Result<(), ClientError> {
    let existing = store.read_file(path).await?;
    let (content, sha) = match &existing {
        Some(file) => (file.content.as_str(), Some(file.sha.as_str())),
        None => ("", None),
    };
    let updated = append_line(content, entry).map_err(|e| ClientError::Encode(e.to_string()))?;
    store
        .write_file(path, &updated, &commit_message(entry), sha)
        .await
}
