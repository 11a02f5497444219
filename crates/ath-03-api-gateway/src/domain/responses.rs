//! Response bodies.

use ath_02_progress::ChestRewards;
use serde::Serialize;

/// `{message}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{message, rewards}` returned by `POST /chests/open`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenChestResponse {
    pub message: String,
    pub rewards: ChestRewards,
}
