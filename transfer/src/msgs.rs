//! Transfer message.

use meridian_types::{ChannelId, Coin, PortId, TimeoutHeight};
use serde::{Deserialize, Serialize};

/// A user request to send `token` to `receiver` on the chain at the other
/// end of `source_port/source_channel`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTransfer {
    pub source_port: PortId,
    pub source_channel: ChannelId,
    pub token: Coin,
    /// Local account, validated when the message is handled.
    pub sender: String,
    /// Remote-chain address, opaque to this chain.
    pub receiver: String,
    pub timeout_height: TimeoutHeight,
    /// Remote block time in nanoseconds; zero disables it.
    pub timeout_timestamp: u64,
}

impl MsgTransfer {
    pub fn new(
        source_port: PortId,
        source_channel: ChannelId,
        token: Coin,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        timeout_height: TimeoutHeight,
        timeout_timestamp: u64,
    ) -> Self {
        Self {
            source_port,
            source_channel,
            token,
            sender: sender.into(),
            receiver: receiver.into(),
            timeout_height,
            timeout_timestamp,
        }
    }

    /// The same transfer with a different token.
    pub fn with_token(&self, token: Coin) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTransferResponse {
    /// Sequence number of the packet that carries the transfer.
    pub sequence: u64,
}
