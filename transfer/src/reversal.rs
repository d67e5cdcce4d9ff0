//! Reversal of converted transfers whose packets failed.
//!
//! By the time the coordinator runs, the transport keeper has already refunded
//! the literal packet amount to the sender in the transport denomination. If
//! that denomination is the counterpart of a converted token, the coordinator
//! swaps it back into the original denomination from the custodial account.

use meridian_bank::BankKeeper;
use meridian_registry::RegistryLookup;
use meridian_types::{sender_chain_is_source, Address, Coin, DenomTrace};
use tracing::{debug, error, info};

use crate::events::*;
use crate::incoming::ConversionPlan;
use crate::{EventManager, Packet, PacketData, TransferError, MODULE_NAME};

/// Which side of the channel minted the token carried by a failed packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefundShape {
    /// This chain is the token's source; the packet carried a local denomination.
    Source,
    /// The token is returning to its source; the packet carried a trace path.
    Sink,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReversalOutcome {
    /// The packet was not a converted transfer; the literal refund stands.
    NotConverted,
    Reversed { burned: Coin, refunded: Coin },
}

#[derive(Clone, Debug)]
pub struct ReversalCoordinator<R> {
    registry: R,
}

impl<R: RegistryLookup> ReversalCoordinator<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Decide whether `data` describes a converted transfer and how to undo it.
    pub fn recognize(&self, packet: &Packet, data: &PacketData) -> Option<(RefundShape, ConversionPlan)> {
        let trace = DenomTrace::parse(&data.denom);
        let local_denom = trace.ibc_denom().ok()?;

        let shape = if sender_chain_is_source(&packet.source_port, &packet.source_channel, &data.denom) {
            RefundShape::Source
        } else {
            let entry = self.registry.get_denom(local_denom.as_str());
            if entry.is_empty() || entry.base_denom != trace.base_denom {
                return None;
            }
            RefundShape::Sink
        };

        let plan = ConversionPlan::resolve(&self.registry, &local_denom)?;
        Some((shape, plan))
    }

    /// Undo the conversion behind a failed packet, if there was one.
    ///
    /// Ledger failures are logged at error level and returned; the caller must
    /// abort its unit of work rather than drop the refund.
    pub fn reverse<B: BankKeeper>(
        &self,
        bank: &mut B,
        events: &mut EventManager,
        packet: &Packet,
        data: &PacketData,
    ) -> Result<ReversalOutcome, TransferError> {
        let Some((shape, plan)) = self.recognize(packet, data) else {
            debug!(denom = %data.denom, sequence = packet.sequence, "failed packet was not converted");
            return Ok(ReversalOutcome::NotConverted);
        };
        let sender = Address::parse(&data.sender)?;

        let mut branch = bank.branch();
        let (burned, refunded) = plan.execute(&mut branch, &sender, &data.amount).map_err(|err| {
            error!(
                %sender,
                denom = %data.denom,
                amount = %data.amount,
                sequence = packet.sequence,
                error = %err,
                "failed to reverse converted transfer"
            );
            err
        })?;
        branch.commit();

        info!(?shape, %sender, %burned, %refunded, po = plan.po, "reversed converted transfer");
        events.emit(
            Event::new(EVENT_TYPE_CONVERT_REFUND)
                .with_attribute(ATTRIBUTE_KEY_MODULE, MODULE_NAME)
                .with_attribute(ATTRIBUTE_KEY_REFUND_RECEIVER, &sender)
                .with_attribute(ATTRIBUTE_KEY_REFUND_DENOM, &refunded.denom)
                .with_attribute(ATTRIBUTE_KEY_REFUND_AMOUNT, &refunded.amount)
                .with_attribute(ATTRIBUTE_KEY_CONVERT_DENOM, &burned.denom)
                .with_attribute(ATTRIBUTE_KEY_CONVERT_AMOUNT, &burned.amount),
        );
        Ok(ReversalOutcome::Reversed { burned, refunded })
    }
}
