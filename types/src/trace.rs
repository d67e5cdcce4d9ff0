//! Denomination traces.
//!
//! A token that has crossed channels carries the path it travelled as a prefix
//! of its denomination: `transfer/channel-0/uatom` is `uatom` received over
//! `transfer/channel-0`. Locally such a token is held under the hashed
//! voucher denomination `ibc/<SHA256(path)>`.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::{ChannelId, Denom, PortId, TypesError};

/// One `port/channel` hop of a trace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TracePrefix {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

impl TracePrefix {
    pub fn new(port_id: PortId, channel_id: ChannelId) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }
}

impl fmt::Display for TracePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

/// The hops a token travelled plus its denomination on the chain it originated from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DenomTrace {
    pub path: Vec<TracePrefix>,
    pub base_denom: String,
}

impl DenomTrace {
    pub fn new(path: Vec<TracePrefix>, base_denom: impl Into<String>) -> Self {
        Self {
            path,
            base_denom: base_denom.into(),
        }
    }

    /// Split a full denomination path into its `port/channel` hops and the base.
    ///
    /// Leading segments are consumed in pairs as long as each pair is a valid
    /// port and channel; whatever remains (slashes included) is the base.
    pub fn parse(full_path: &str) -> Self {
        let segments: Vec<&str> = full_path.split('/').collect();
        let mut path = Vec::new();
        let mut idx = 0;
        while idx + 2 < segments.len() {
            let port = segments[idx].parse::<PortId>();
            let channel = segments[idx + 1].parse::<ChannelId>();
            match (port, channel) {
                (Ok(port_id), Ok(channel_id)) => path.push(TracePrefix::new(port_id, channel_id)),
                _ => break,
            }
            idx += 2;
        }
        Self {
            path,
            base_denom: segments[idx..].join("/"),
        }
    }

    pub fn is_native(&self) -> bool {
        self.path.is_empty()
    }

    /// `port/channel/.../base`, the form carried in packet data.
    pub fn full_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(self.base_denom.clone()))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The denomination this trace is held under locally.
    pub fn ibc_denom(&self) -> Result<Denom, TypesError> {
        if self.is_native() {
            return Denom::parse(&self.base_denom);
        }
        let digest = Sha256::digest(self.full_path().as_bytes());
        Denom::parse(&format!("ibc/{}", hex::encode_upper(digest)))
    }

    /// Whether the outermost hop is `prefix`.
    pub fn has_prefix(&self, prefix: &TracePrefix) -> bool {
        self.path.first() == Some(prefix)
    }

    pub fn add_prefix(&mut self, prefix: TracePrefix) {
        self.path.insert(0, prefix);
    }

    pub fn remove_prefix(&mut self, prefix: &TracePrefix) {
        if self.has_prefix(prefix) {
            self.path.remove(0);
        }
    }
}

impl fmt::Display for DenomTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path())
    }
}

/// True when a token arriving over `source_port/source_channel` is returning home.
pub fn receiver_chain_is_source(source_port: &PortId, source_channel: &ChannelId, denom: &str) -> bool {
    DenomTrace::parse(denom).has_prefix(&TracePrefix::new(source_port.clone(), source_channel.clone()))
}

/// True when the chain sending over `source_port/source_channel` minted the token.
pub fn sender_chain_is_source(source_port: &PortId, source_channel: &ChannelId, denom: &str) -> bool {
    !receiver_chain_is_source(source_port, source_channel, denom)
}
