//! Fungible token transport keeper.
//!
//! The coordinators treat this as the transport collaborator: it escrows or
//! burns tokens on send, unescrows or mints vouchers on receive, and refunds
//! the literal packet amount when a packet fails. It knows nothing about
//! precision conversion.

use std::collections::{BTreeMap, HashMap};

use meridian_bank::BankKeeper;
use meridian_types::{
    receiver_chain_is_source, sender_chain_is_source, Address, ChannelId, Coin, Denom, DenomTrace, PortId,
    TracePrefix,
};
use tracing::{debug, info};

use crate::events::*;
use crate::{EventManager, MsgTransfer, MsgTransferResponse, Packet, PacketData, TransferError, MODULE_NAME};

/// Transport operations the transfer coordinators consume.
pub trait TransferKeeper {
    /// Move `msg.token` out of the sender's account and commit a packet for it.
    fn send_transfer<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        msg: &MsgTransfer,
    ) -> Result<MsgTransferResponse, TransferError>;

    /// Credit the receiver of an incoming packet. Returns the local coin credited.
    fn on_recv_packet<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        packet: &Packet,
        data: &PacketData,
    ) -> Result<Coin, TransferError>;

    /// Return the literal packet amount to its sender. Returns the local coin refunded.
    fn refund_packet_token<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        packet: &Packet,
        data: &PacketData,
    ) -> Result<Coin, TransferError>;

    /// Whether `packet` is still committed exactly as it was sent.
    fn has_packet_commitment(&self, packet: &Packet) -> bool;

    /// Forget the commitment for a packet whose lifecycle has ended.
    fn clear_packet_commitment(&mut self, packet: &Packet);
}

/// The remote end of a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEnd {
    pub counterparty_port: PortId,
    pub counterparty_channel: ChannelId,
}

/// In-memory transport keeper bound to a single port.
#[derive(Clone, Debug)]
pub struct Ics20Keeper {
    port_id: PortId,
    channels: HashMap<ChannelId, ChannelEnd>,
    next_sequence_send: HashMap<ChannelId, u64>,
    denom_traces: HashMap<Denom, DenomTrace>,
    packet_commitments: BTreeMap<(ChannelId, u64), Packet>,
    send_enabled: bool,
    receive_enabled: bool,
}

impl Ics20Keeper {
    pub fn new(port_id: PortId) -> Self {
        Self {
            port_id,
            channels: HashMap::new(),
            next_sequence_send: HashMap::new(),
            denom_traces: HashMap::new(),
            packet_commitments: BTreeMap::new(),
            send_enabled: true,
            receive_enabled: true,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    /// Register an open channel and its counterparty.
    pub fn open_channel(&mut self, channel: ChannelId, counterparty_port: PortId, counterparty_channel: ChannelId) {
        debug!(%channel, %counterparty_port, %counterparty_channel, "channel opened");
        self.next_sequence_send.entry(channel.clone()).or_insert(1);
        self.channels.insert(
            channel,
            ChannelEnd {
                counterparty_port,
                counterparty_channel,
            },
        );
    }

    pub fn channel_end(&self, channel: &ChannelId) -> Option<&ChannelEnd> {
        self.channels.get(channel)
    }

    pub fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    pub fn set_receive_enabled(&mut self, enabled: bool) {
        self.receive_enabled = enabled;
    }

    pub fn denom_trace(&self, denom: &Denom) -> Option<&DenomTrace> {
        self.denom_traces.get(denom)
    }

    pub fn set_denom_trace(&mut self, trace: DenomTrace) -> Result<Denom, TransferError> {
        let denom = trace.ibc_denom()?;
        self.denom_traces.insert(denom.clone(), trace);
        Ok(denom)
    }

    /// Packet committed on `channel` under `sequence` and not yet cleared.
    pub fn packet_commitment(&self, channel: &ChannelId, sequence: u64) -> Option<&Packet> {
        self.packet_commitments.get(&(channel.clone(), sequence))
    }

    /// Clear a commitment once the packet is acknowledged or timed out.
    pub fn delete_packet_commitment(&mut self, channel: &ChannelId, sequence: u64) -> Option<Packet> {
        self.packet_commitments.remove(&(channel.clone(), sequence))
    }

    /// Full trace path for a locally held denomination.
    fn full_denom_path(&self, denom: &Denom) -> Result<String, TransferError> {
        if denom.is_ibc_hashed() {
            self.denom_trace(denom)
                .map(DenomTrace::full_path)
                .ok_or_else(|| TransferError::TraceNotFound(denom.to_string()))
        } else {
            Ok(denom.to_string())
        }
    }
}

impl TransferKeeper for Ics20Keeper {
    fn send_transfer<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        msg: &MsgTransfer,
    ) -> Result<MsgTransferResponse, TransferError> {
        if !self.send_enabled {
            return Err(TransferError::SendDisabled);
        }
        if msg.source_port != self.port_id {
            return Err(TransferError::UnknownPort(msg.source_port.to_string()));
        }
        let channel_end = self
            .channels
            .get(&msg.source_channel)
            .cloned()
            .ok_or_else(|| TransferError::ChannelNotFound(msg.source_channel.to_string()))?;
        if msg.token.is_zero() {
            return Err(TransferError::ZeroAmount);
        }
        if msg.receiver.trim().is_empty() {
            return Err(TransferError::EmptyReceiver);
        }
        let sender = Address::parse(&msg.sender)?;
        let full_denom_path = self.full_denom_path(&msg.token.denom)?;

        if sender_chain_is_source(&msg.source_port, &msg.source_channel, &full_denom_path) {
            let escrow = Address::escrow(&msg.source_port, &msg.source_channel);
            bank.send_coins(&sender, &escrow, &msg.token)?;
        } else {
            bank.send_coins_from_account_to_module(&sender, MODULE_NAME, &msg.token)?;
            bank.burn_coins(MODULE_NAME, &msg.token)?;
        }

        let sequence = self
            .next_sequence_send
            .get(&msg.source_channel)
            .copied()
            .unwrap_or(1);
        let data = PacketData {
            denom: full_denom_path,
            amount: msg.token.amount.clone(),
            sender: msg.sender.clone(),
            receiver: msg.receiver.clone(),
        };
        let packet = Packet {
            sequence,
            source_port: msg.source_port.clone(),
            source_channel: msg.source_channel.clone(),
            destination_port: channel_end.counterparty_port,
            destination_channel: channel_end.counterparty_channel,
            data: data.to_bytes(),
            timeout_height: msg.timeout_height,
            timeout_timestamp: msg.timeout_timestamp,
        };
        self.packet_commitments
            .insert((msg.source_channel.clone(), sequence), packet);
        self.next_sequence_send
            .insert(msg.source_channel.clone(), sequence + 1);

        info!(
            sender = %msg.sender,
            receiver = %msg.receiver,
            token = %msg.token,
            channel = %msg.source_channel,
            sequence,
            "fungible token transfer sent"
        );
        events.emit(
            Event::new(EVENT_TYPE_TRANSFER)
                .with_attribute(ATTRIBUTE_KEY_SENDER, &msg.sender)
                .with_attribute(ATTRIBUTE_KEY_RECEIVER, &msg.receiver)
                .with_attribute(ATTRIBUTE_KEY_DENOM, &data.denom)
                .with_attribute(ATTRIBUTE_KEY_AMOUNT, &data.amount),
        );
        Ok(MsgTransferResponse { sequence })
    }

    fn on_recv_packet<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        events: &mut EventManager,
        packet: &Packet,
        data: &PacketData,
    ) -> Result<Coin, TransferError> {
        if !self.receive_enabled {
            return Err(TransferError::ReceiveDisabled);
        }
        if data.amount.is_zero() {
            return Err(TransferError::ZeroAmount);
        }
        let receiver = Address::parse(&data.receiver)?;
        let mut trace = DenomTrace::parse(&data.denom);

        let coin = if receiver_chain_is_source(&packet.source_port, &packet.source_channel, &data.denom) {
            // Token is returning home: release it from escrow.
            trace.remove_prefix(&TracePrefix::new(
                packet.source_port.clone(),
                packet.source_channel.clone(),
            ));
            let coin = Coin::new(trace.ibc_denom()?, data.amount.clone());
            let escrow = Address::escrow(&packet.destination_port, &packet.destination_channel);
            bank.send_coins(&escrow, &receiver, &coin)?;
            coin
        } else {
            // Token is foreign: mint a voucher carrying the extended trace.
            trace.add_prefix(TracePrefix::new(
                packet.destination_port.clone(),
                packet.destination_channel.clone(),
            ));
            let denom = trace.ibc_denom()?;
            if !self.denom_traces.contains_key(&denom) {
                events.emit(
                    Event::new(EVENT_TYPE_DENOM_TRACE)
                        .with_attribute(ATTRIBUTE_KEY_TRACE_HASH, &denom)
                        .with_attribute(ATTRIBUTE_KEY_DENOM, trace.full_path()),
                );
                self.denom_traces.insert(denom.clone(), trace);
            }
            let coin = Coin::new(denom, data.amount.clone());
            bank.mint_coins(MODULE_NAME, &coin)?;
            bank.send_coins_from_module_to_account(MODULE_NAME, &receiver, &coin)?;
            coin
        };

        debug!(receiver = %receiver, %coin, "fungible token packet received");
        events.emit(
            Event::new(EVENT_TYPE_PACKET)
                .with_attribute(ATTRIBUTE_KEY_MODULE, MODULE_NAME)
                .with_attribute(ATTRIBUTE_KEY_RECEIVER, &data.receiver)
                .with_attribute(ATTRIBUTE_KEY_DENOM, &data.denom)
                .with_attribute(ATTRIBUTE_KEY_AMOUNT, &data.amount)
                .with_attribute(ATTRIBUTE_KEY_ACK_SUCCESS, true),
        );
        Ok(coin)
    }

    fn refund_packet_token<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        packet: &Packet,
        data: &PacketData,
    ) -> Result<Coin, TransferError> {
        let sender = Address::parse(&data.sender)?;
        let coin = Coin::new(DenomTrace::parse(&data.denom).ibc_denom()?, data.amount.clone());

        if sender_chain_is_source(&packet.source_port, &packet.source_channel, &data.denom) {
            let escrow = Address::escrow(&packet.source_port, &packet.source_channel);
            bank.send_coins(&escrow, &sender, &coin)?;
        } else {
            bank.mint_coins(MODULE_NAME, &coin)?;
            bank.send_coins_from_module_to_account(MODULE_NAME, &sender, &coin)?;
        }

        debug!(sender = %sender, %coin, sequence = packet.sequence, "packet tokens refunded");
        Ok(coin)
    }

    fn has_packet_commitment(&self, packet: &Packet) -> bool {
        self.packet_commitment(&packet.source_channel, packet.sequence) == Some(packet)
    }

    fn clear_packet_commitment(&mut self, packet: &Packet) {
        self.delete_packet_commitment(&packet.source_channel, packet.sequence);
    }
}
