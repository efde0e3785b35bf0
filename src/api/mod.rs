use serde::{Deserialize, Serialize};

use crate::core::message::Turn;

/// Value of the `prompt` field on every chat request.
pub const START_CHAT_PROMPT: &str = "start chat";

/// Body POSTed to the chat endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub memory: String,
    pub prompt: String,
    pub bot_name: String,
    pub user_name: String,
    pub chat_history: Vec<Turn>,
}

/// The only part of the endpoint's reply that is used. Anything else in the
/// object is ignored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    #[serde(default)]
    pub model_output: Option<String>,
}
