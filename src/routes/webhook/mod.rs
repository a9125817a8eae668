mod handler;
mod model;

pub use handler::{process_message, receive_event};
pub use model::{AccountPayload, MESSAGE_CREATED, MessageCreatedEvent, MessagePayload, WebhookEnvelope};
