//! Packets and acknowledgements as seen by the transfer module.

use meridian_types::{Amount, ChannelId, PortId, TimeoutHeight};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::TransferError;

/// Fungible token packet payload, JSON encoded on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketData {
    /// Full trace path of the token as seen by the sending chain.
    pub denom: String,
    pub amount: Amount,
    pub sender: String,
    pub receiver: String,
}

impl PacketData {
    /// Canonical encoding: keys sorted, amount as a decimal string.
    pub fn to_bytes(&self) -> Vec<u8> {
        json!({
            "amount": self.amount.to_string(),
            "denom": self.denom,
            "receiver": self.receiver,
            "sender": self.sender,
        })
        .to_string()
        .into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransferError> {
        serde_json::from_slice(bytes).map_err(|e| TransferError::InvalidPacketData(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub sequence: u64,
    pub source_port: PortId,
    pub source_channel: ChannelId,
    pub destination_port: PortId,
    pub destination_channel: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height: TimeoutHeight,
    pub timeout_timestamp: u64,
}

impl Packet {
    pub fn decode_data(&self) -> Result<PacketData, TransferError> {
        PacketData::from_bytes(&self.data)
    }
}

/// Result written by the receiving chain.
///
/// Serialises to `{"result":"AQ=="}` on success and `{"error":"..."}` otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    Result(String),
    Error(String),
}

impl Acknowledgement {
    /// `base64(0x01)`.
    pub const SUCCESS_RESULT: &'static str = "AQ==";

    pub fn success() -> Self {
        Self::Result(Self::SUCCESS_RESULT.to_string())
    }

    pub fn from_error(err: &TransferError) -> Self {
        Self::Error(err.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let value = match self {
            Self::Result(result) => json!({ "result": result }),
            Self::Error(error) => json!({ "error": error }),
        };
        value.to_string().into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransferError> {
        serde_json::from_slice(bytes).map_err(|e| TransferError::InvalidPacketData(e.to_string()))
    }
}
