use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MessageType {
    Player,
    Game,
    System,
}

// One committed entry in the turn log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub message_type: MessageType,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(message_type: MessageType, content: String) -> Self {
        Message {
            content,
            message_type,
            timestamp: Local::now(),
        }
    }
}
