//! Nullable transport keeper that records what it was asked to send.

use std::collections::BTreeMap;

use meridian_bank::BankKeeper;
use meridian_transfer::{
    EventManager, MsgTransfer, MsgTransferResponse, Packet, PacketData, TransferError, TransferKeeper,
};
use meridian_types::{Address, Coin, DenomTrace};

/// Escrows every outgoing token and records the message.
///
/// Unlike the real keeper it has no channels or traces: denominations are
/// taken literally and every token is treated as native to this chain.
#[derive(Clone, Debug, Default)]
pub struct RecordingKeeper {
    sent: Vec<MsgTransfer>,
    commitments: BTreeMap<u64, Packet>,
    cleared: Vec<u64>,
    fail_next_send: Option<String>,
}

impl RecordingKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the next send with [`TransferError::InvalidPacketData`] after
    /// the tokens have been escrowed.
    pub fn fail_next_send(&mut self, reason: &str) {
        self.fail_next_send = Some(reason.to_string());
    }

    pub fn sent(&self) -> &[MsgTransfer] {
        &self.sent
    }

    /// Sequences whose commitments were cleared.
    pub fn cleared(&self) -> &[u64] {
        &self.cleared
    }

    /// A packet that would carry `msg` as the `sequence`th send.
    pub fn packet_for(msg: &MsgTransfer, sequence: u64) -> Packet {
        let data = PacketData {
            denom: msg.token.denom.to_string(),
            amount: msg.token.amount.clone(),
            sender: msg.sender.clone(),
            receiver: msg.receiver.clone(),
        };
        Packet {
            sequence,
            source_port: msg.source_port.clone(),
            source_channel: msg.source_channel.clone(),
            destination_port: msg.source_port.clone(),
            destination_channel: msg.source_channel.clone(),
            data: data.to_bytes(),
            timeout_height: msg.timeout_height,
            timeout_timestamp: msg.timeout_timestamp,
        }
    }

    /// Packet for the most recent send.
    pub fn last_packet(&self) -> Option<Packet> {
        self.sent
            .last()
            .map(|msg| Self::packet_for(msg, self.sent.len() as u64))
    }
}

impl TransferKeeper for RecordingKeeper {
    fn send_transfer<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        _events: &mut EventManager,
        msg: &MsgTransfer,
    ) -> Result<MsgTransferResponse, TransferError> {
        let sender = Address::parse(&msg.sender)?;
        let escrow = Address::escrow(&msg.source_port, &msg.source_channel);
        bank.send_coins(&sender, &escrow, &msg.token)?;
        if let Some(reason) = self.fail_next_send.take() {
            return Err(TransferError::InvalidPacketData(reason));
        }
        self.sent.push(msg.clone());
        let sequence = self.sent.len() as u64;
        self.commitments.insert(sequence, Self::packet_for(msg, sequence));
        Ok(MsgTransferResponse { sequence })
    }

    fn on_recv_packet<B: BankKeeper>(
        &mut self,
        bank: &mut B,
        _events: &mut EventManager,
        packet: &Packet,
        data: &PacketData,
    ) -> Result<Coin, TransferError> {
        let receiver = Address::parse(&data.receiver)?;
        let coin = Coin::new(DenomTrace::parse(&data.denom).ibc_denom()?, data.amount.clone());
        let escrow = Address::escrow(&packet.destination_port, &packet.destination_channel);
        bank.send_coins(&escrow, &receiver, &coin)?;
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
        let escrow = Address::escrow(&packet.source_port, &packet.source_channel);
        bank.send_coins(&escrow, &sender, &coin)?;
        Ok(coin)
    }

    fn has_packet_commitment(&self, packet: &Packet) -> bool {
        self.commitments.get(&packet.sequence) == Some(packet)
    }

    fn clear_packet_commitment(&mut self, packet: &Packet) {
        if self.commitments.remove(&packet.sequence).is_some() {
            self.cleared.push(packet.sequence);
        }
    }
}
