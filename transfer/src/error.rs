use meridian_bank::BankError;
use meridian_registry::{Permission, RegistryError};
use meridian_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("validation error: {0}")]
    Validation(#[from] TypesError),

    #[error("bank error: {0}")]
    Bank(#[from] BankError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("denom {denom} names counterparty {counterparty}, which is not registered")]
    MissingCounterpartEntry { denom: String, counterparty: String },

    #[error("{amount}{denom} is below the smallest unit representable after removing {po} decimals")]
    AmountBelowGranularity { amount: String, denom: String, po: u32 },

    #[error("denom {denom} lacks the {permission:?} permission")]
    Unauthorized { denom: String, permission: Permission },

    #[error("fungible token transfers from this chain are disabled")]
    SendDisabled,

    #[error("fungible token transfers to this chain are disabled")]
    ReceiveDisabled,

    #[error("port {0} is not bound to the transfer module")]
    UnknownPort(String),

    #[error("channel {0} not found")]
    ChannelNotFound(String),

    #[error("no commitment for packet {sequence} on {channel}")]
    PacketCommitmentNotFound { channel: String, sequence: u64 },

    #[error("denomination trace not found for {0}")]
    TraceNotFound(String),

    #[error("transfer amount must be positive")]
    ZeroAmount,

    #[error("receiver address must not be empty")]
    EmptyReceiver,

    #[error("invalid packet data: {0}")]
    InvalidPacketData(String),

    #[error("config error: {0}")]
    Config(String),
}
