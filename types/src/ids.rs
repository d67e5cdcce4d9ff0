//! Transport identifiers: ports, channels and timeout heights.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

const VALID_ID_SPECIAL_CHARS: &str = "._+-#[]<>";

fn validate_identifier(id: &str, min: usize, max: usize) -> Result<(), TypesError> {
    if id.len() < min || id.len() > max {
        return Err(TypesError::InvalidIdentifier(format!(
            "{id:?} must be between {min} and {max} characters"
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_ID_SPECIAL_CHARS.contains(c))
    {
        return Err(TypesError::InvalidIdentifier(format!(
            "{id:?} contains invalid characters"
        )));
    }
    Ok(())
}

/// A port identifier, e.g. `transfer`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortId(String);

impl PortId {
    pub fn transfer() -> Self {
        Self("transfer".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PortId {
    type Err = TypesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_identifier(s, 2, 128)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for PortId {
    type Error = TypesError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PortId> for String {
    fn from(id: PortId) -> Self {
        id.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A channel identifier of the form `channel-<n>`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelId(String);

impl ChannelId {
    const PREFIX: &'static str = "channel-";

    pub fn new(sequence: u64) -> Self {
        Self(format!("{}{}", Self::PREFIX, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChannelId {
    type Err = TypesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_identifier(s, 8, 64)?;
        let is_numbered = s
            .strip_prefix(Self::PREFIX)
            .map_or(false, |n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
        if !is_numbered {
            return Err(TypesError::InvalidIdentifier(format!(
                "{s:?} is not of the form channel-<n>"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ChannelId {
    type Error = TypesError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ChannelId> for String {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remote block height after which a packet times out. `0-0` disables it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeoutHeight {
    pub revision_number: u64,
    pub revision_height: u64,
}

impl TimeoutHeight {
    pub fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.revision_number == 0 && self.revision_height == 0
    }
}

impl fmt::Display for TimeoutHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_ids_must_be_numbered() {
        assert!("channel-0".parse::<ChannelId>().is_ok());
        assert!("channel-".parse::<ChannelId>().is_err());
        assert!("chan-0000".parse::<ChannelId>().is_err());
        assert!("channel-x1".parse::<ChannelId>().is_err());
        assert_eq!(ChannelId::new(7).as_str(), "channel-7");
    }

    #[test]
    fn port_ids_reject_separators() {
        assert!("transfer".parse::<PortId>().is_ok());
        assert!("t".parse::<PortId>().is_err());
        assert!("trans/fer".parse::<PortId>().is_err());
    }

    #[test]
    fn zero_height_disables_timeout() {
        assert!(TimeoutHeight::default().is_zero());
        assert!(!TimeoutHeight::new(0, 10).is_zero());
        assert_eq!(TimeoutHeight::new(1, 20).to_string(), "1-20");
    }
}
