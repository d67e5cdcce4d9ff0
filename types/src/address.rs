//! Account address type with the `mrd1` prefix.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::{ChannelId, PortId, TypesError};

/// A local-chain account address: `mrd1` followed by lowercase alphanumerics.
///
/// User addresses are parsed from strings; module and escrow addresses are
/// derived deterministically so every node computes the same custodial account.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Human-readable part of every local address.
    pub const PREFIX: &'static str = "mrd";

    const SEPARATOR: char = '1';
    const MAX_LEN: usize = 90;

    /// Parse and validate an address string.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let invalid = || TypesError::InvalidAddress(raw.to_string());
        let data = raw
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.strip_prefix(Self::SEPARATOR))
            .ok_or_else(invalid)?;
        if data.is_empty()
            || raw.len() > Self::MAX_LEN
            || !data.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(invalid());
        }
        Ok(Self(raw.to_string()))
    }

    /// Address of the account owned by the named module.
    pub fn module(name: &str) -> Self {
        Self::derive(&[b"module", name.as_bytes()])
    }

    /// Address of the escrow account holding outbound tokens of a channel.
    pub fn escrow(port: &PortId, channel: &ChannelId) -> Self {
        Self::derive(&[
            b"ics20-1",
            &[0u8],
            port.as_str().as_bytes(),
            b"/",
            channel.as_str().as_bytes(),
        ])
    }

    fn derive(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        let digest = hasher.finalize();
        Self(format!(
            "{}{}{}",
            Self::PREFIX,
            Self::SEPARATOR,
            hex::encode(&digest[..20])
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = TypesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_addresses() {
        let addr = Address::parse("mrd1qyqszqgpqyqszqgp").unwrap();
        assert_eq!(addr.as_str(), "mrd1qyqszqgpqyqszqgp");
    }

    #[test]
    fn rejects_wrong_prefix_and_charset() {
        assert!(Address::parse("cosmos1abc").is_err());
        assert!(Address::parse("mrd1").is_err());
        assert!(Address::parse("mrd1ABC").is_err());
        assert!(Address::parse("mrdabc").is_err());
        assert!(Address::parse("").is_err());
    }

    #[test]
    fn module_addresses_are_deterministic_and_valid() {
        let a = Address::module("transfer");
        let b = Address::module("transfer");
        assert_eq!(a, b);
        assert_ne!(a, Address::module("bank"));
        assert!(Address::parse(a.as_str()).is_ok());
    }

    #[test]
    fn escrow_address_depends_on_channel() {
        let port = PortId::transfer();
        let a = Address::escrow(&port, &ChannelId::new(0));
        let b = Address::escrow(&port, &ChannelId::new(1));
        assert_ne!(a, b);
        assert_ne!(a, Address::module("transfer"));
    }
}
