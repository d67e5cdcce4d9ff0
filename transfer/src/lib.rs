//! Cross-chain fungible token transfer with precision conversion.
//!
//! Tokens on this chain may carry more decimals than the transport side can
//! represent. Before such a token leaves the chain it is converted into its
//! lower-precision counterpart: the original is locked in the module account,
//! the counterpart is minted and sent in its place. When the transport reports
//! that the packet failed (timeout or error acknowledgement) the conversion is
//! reversed so the sender gets back exactly what was deducted.
//!
//! - [`precision`]: pure power-of-ten scaling in the `Dec` domain.
//! - [`conversion`]: the outbound coordinator.
//! - [`reversal`]: recognises failed converted packets and undoes the conversion.
//! - [`incoming`]: converts counterpart tokens received from other chains.
//! - [`ics20`]: the transport keeper (escrow, vouchers, refunds) the coordinators drive.
//! - [`module`]: wires the above into the transport callbacks.

pub mod config;
pub mod conversion;
pub mod error;
pub mod events;
pub mod ics20;
pub mod incoming;
pub mod module;
pub mod msgs;
pub mod packet;
pub mod precision;
pub mod reversal;

pub use config::{LoggingConfig, MeridianConfig, TransferParams};
pub use conversion::ConversionCoordinator;
pub use error::TransferError;
pub use events::{Event, EventManager};
pub use ics20::{ChannelEnd, Ics20Keeper, TransferKeeper};
pub use incoming::ConversionPlan;
pub use module::TransferModule;
pub use msgs::{MsgTransfer, MsgTransferResponse};
pub use packet::{Acknowledgement, Packet, PacketData};
pub use precision::{convert_for_transfer, increase_precision, reduce_precision, restore_precision, ConvertedAmount};
pub use reversal::{RefundShape, ReversalCoordinator, ReversalOutcome};

/// Name of the transfer module; also names its custodial account.
pub const MODULE_NAME: &str = "transfer";
