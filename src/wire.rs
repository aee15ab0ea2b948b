//! JSON envelopes spoken over the WebSocket endpoint.
//!
//! Both directions use the same adjacently tagged shape,
//! `{"type": ..., "content": ...}`. Anything that does not parse as a
//! [`ClientMessage`] is dropped by the server without a reply.

use crate::types::BoardSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ClientMessage {
    Command(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ServerMessage {
    ExchangeData(BoardSnapshot),
    Error(String),
}
