//! Conversation references read from the inbox list.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of the `data-testid` attribute on inbox list entries
pub const INBOX_ID_PREFIX: &str = "inbox_list_";

/// Identifies a conversation thread and its position in the inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub message_id: i64,
    pub message_index: i64,
}

impl MessageRef {
    /// Build a reference from the raw `data-testid` and `data-item-index` values
    pub fn from_attributes(test_id: &str, item_index: &str) -> Result<Self> {
        let message_id = test_id
            .replace(INBOX_ID_PREFIX, "")
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidAttribute {
                name: "data-testid".to_string(),
                value: test_id.to_string(),
            })?;

        let message_index = item_index
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidAttribute {
                name: "data-item-index".to_string(),
                value: item_index.to_string(),
            })?;

        Ok(Self {
            message_id,
            message_index,
        })
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} (thread {})", self.message_index, self.message_id)
    }
}
