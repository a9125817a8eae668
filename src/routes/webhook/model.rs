use serde::{Deserialize, Deserializer};

pub const MESSAGE_CREATED: &str = "message_created";

/// Outer shape of every Chatwork webhook delivery.
#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
    pub webhook_event_type: Option<String>,
    #[serde(default)]
    pub webhook_event: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreatedEvent {
    pub message: MessagePayload,
    pub account: AccountPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    #[serde(deserialize_with = "string_or_number")]
    pub message_id: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountPayload {
    pub account_id: i64,
    pub name: String,
}

// message_id arrives as a string or a number depending on payload version
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
