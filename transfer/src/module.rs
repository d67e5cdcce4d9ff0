//! Transfer module: message handling and packet callbacks.

use meridian_bank::BankKeeper;
use meridian_registry::{Permission, RegistryLookup};
use meridian_types::{Address, Coin};
use tracing::{error, info, warn};

use crate::events::*;
use crate::incoming::ConversionPlan;
use crate::{
    Acknowledgement, ConversionCoordinator, EventManager, MsgTransfer, MsgTransferResponse, Packet, ReversalCoordinator,
    ReversalOutcome, TransferError, TransferKeeper, TransferParams, MODULE_NAME,
};

/// Routes user messages and transport callbacks through the coordinators.
///
/// The module owns the registry view, the transport keeper and its params;
/// the bank is passed in per call so callers control the unit of work.
pub struct TransferModule<R, K> {
    registry: R,
    keeper: K,
    params: TransferParams,
}

impl<R: RegistryLookup, K: TransferKeeper> TransferModule<R, K> {
    pub fn new(registry: R, keeper: K, params: TransferParams) -> Self {
        Self {
            registry,
            keeper,
            params,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn keeper(&self) -> &K {
        &self.keeper
    }

    pub fn keeper_mut(&mut self) -> &mut K {
        &mut self.keeper
    }

    pub fn params(&self) -> &TransferParams {
        &self.params
    }

    /// Handle a user transfer, converting the token first when required.
    pub fn transfer<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        msg: &MsgTransfer,
    ) -> Result<MsgTransferResponse, TransferError> {
        if !self.params.send_enabled {
            return Err(TransferError::SendDisabled);
        }
        if msg.source_port != self.params.port_id {
            return Err(TransferError::UnknownPort(msg.source_port.to_string()));
        }
        ConversionCoordinator::new(&self.registry)
            .with_export_permission(self.params.require_export_permission)
            .transfer(&mut self.keeper, bank, events, msg)
    }

    /// Credit an incoming packet and return the acknowledgement to write.
    ///
    /// Any failure yields an error acknowledgement and leaves no state behind.
    pub fn on_recv_packet<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        packet: &Packet,
    ) -> Acknowledgement {
        match self.receive(bank, events, packet) {
            Ok(coin) => {
                info!(%coin, sequence = packet.sequence, channel = %packet.destination_channel, "packet received");
                Acknowledgement::success()
            }
            Err(err) => {
                warn!(sequence = packet.sequence, error = %err, "rejecting incoming packet");
                events.emit(
                    Event::new(EVENT_TYPE_PACKET)
                        .with_attribute(ATTRIBUTE_KEY_MODULE, MODULE_NAME)
                        .with_attribute(ATTRIBUTE_KEY_ACK_SUCCESS, false)
                        .with_attribute(ATTRIBUTE_KEY_ACK_ERROR, &err),
                );
                Acknowledgement::from_error(&err)
            }
        }
    }

    fn receive<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        packet: &Packet,
    ) -> Result<Coin, TransferError> {
        if !self.params.receive_enabled {
            return Err(TransferError::ReceiveDisabled);
        }
        let data = packet.decode_data()?;

        let mut scoped = EventManager::new();
        let mut branch = bank.branch();
        let received = self.keeper.on_recv_packet(&mut branch, &mut scoped, packet, &data)?;

        if self.params.require_import_permission {
            let entry = self.registry.get_denom(received.denom.as_str());
            if !self
                .registry
                .check_denom_permissions(&entry, &[Permission::IbcImport])
            {
                return Err(TransferError::Unauthorized {
                    denom: received.denom.to_string(),
                    permission: Permission::IbcImport,
                });
            }
        }

        let credited = match ConversionPlan::resolve(&self.registry, &received.denom) {
            Some(plan) => {
                let receiver = Address::parse(&data.receiver)?;
                let (burned, released) = plan.execute(&mut branch, &receiver, &received.amount)?;
                scoped.emit(
                    Event::new(EVENT_TYPE_CONVERT_RECEIVED)
                        .with_attribute(ATTRIBUTE_KEY_MODULE, MODULE_NAME)
                        .with_attribute(ATTRIBUTE_KEY_RECEIVER, &receiver)
                        .with_attribute(ATTRIBUTE_KEY_CONVERT_AMOUNT, &burned.amount)
                        .with_attribute(ATTRIBUTE_KEY_CONVERT_DENOM, &burned.denom)
                        .with_attribute(ATTRIBUTE_KEY_AMOUNT, &released.amount)
                        .with_attribute(ATTRIBUTE_KEY_DENOM, &released.denom),
                );
                released
            }
            None => received,
        };

        branch.commit();
        events.extend(scoped);
        Ok(credited)
    }

    /// Process the acknowledgement of a packet this chain sent.
    ///
    /// Success acknowledgements only clear the commitment. Error
    /// acknowledgements refund the sender and reverse any conversion; the
    /// outcome of that is returned.
    pub fn on_acknowledgement_packet<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        packet: &Packet,
        ack: &Acknowledgement,
    ) -> Result<Option<ReversalOutcome>, TransferError> {
        self.require_commitment(packet)?;
        let data = packet.decode_data()?;
        let mut event = Event::new(EVENT_TYPE_PACKET)
            .with_attribute(ATTRIBUTE_KEY_MODULE, MODULE_NAME)
            .with_attribute(ATTRIBUTE_KEY_RECEIVER, &data.receiver)
            .with_attribute(ATTRIBUTE_KEY_DENOM, &data.denom)
            .with_attribute(ATTRIBUTE_KEY_AMOUNT, &data.amount);

        let outcome = match ack {
            Acknowledgement::Result(_) => {
                self.keeper.clear_packet_commitment(packet);
                event = event.with_attribute(ATTRIBUTE_KEY_ACK_SUCCESS, true);
                None
            }
            Acknowledgement::Error(reason) => {
                let outcome = self.refund(bank, events, packet)?;
                event = event
                    .with_attribute(ATTRIBUTE_KEY_ACK_SUCCESS, false)
                    .with_attribute(ATTRIBUTE_KEY_ACK_ERROR, reason);
                Some(outcome)
            }
        };
        events.emit(event);
        Ok(outcome)
    }

    /// Refund the sender of a packet that timed out, reversing any conversion.
    pub fn on_timeout_packet<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        packet: &Packet,
    ) -> Result<ReversalOutcome, TransferError> {
        self.require_commitment(packet)?;
        let data = packet.decode_data()?;
        let outcome = self.refund(bank, events, packet)?;
        events.emit(
            Event::new(EVENT_TYPE_TIMEOUT)
                .with_attribute(ATTRIBUTE_KEY_MODULE, MODULE_NAME)
                .with_attribute(ATTRIBUTE_KEY_REFUND_RECEIVER, &data.sender)
                .with_attribute(ATTRIBUTE_KEY_REFUND_DENOM, &data.denom)
                .with_attribute(ATTRIBUTE_KEY_REFUND_AMOUNT, &data.amount),
        );
        Ok(outcome)
    }

    /// Callbacks only act on packets still committed as sent; a replayed or
    /// forged callback would otherwise refund the same tokens twice.
    fn require_commitment(&self, packet: &Packet) -> Result<(), TransferError> {
        if self.keeper.has_packet_commitment(packet) {
            return Ok(());
        }
        warn!(sequence = packet.sequence, channel = %packet.source_channel, "no commitment for packet callback");
        Err(TransferError::PacketCommitmentNotFound {
            channel: packet.source_channel.to_string(),
            sequence: packet.sequence,
        })
    }

    /// Literal refund followed by reversal, as one unit of work.
    fn refund<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        packet: &Packet,
    ) -> Result<ReversalOutcome, TransferError> {
        let data = packet.decode_data()?;
        let mut scoped = EventManager::new();
        let mut branch = bank.branch();

        self.keeper
            .refund_packet_token(&mut branch, packet, &data)
            .inspect_err(|err| error!(sequence = packet.sequence, error = %err, "failed to refund packet tokens"))?;
        let outcome = ReversalCoordinator::new(&self.registry).reverse(&mut branch, &mut scoped, packet, &data)?;

        branch.commit();
        self.keeper.clear_packet_commitment(packet);
        events.extend(scoped);
        Ok(outcome)
    }
}
