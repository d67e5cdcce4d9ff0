//! Registry entry representation.

use meridian_types::Denom;
use serde::{Deserialize, Serialize};

use crate::{Permission, RegistryError};

/// Everything the registry knows about one denomination.
///
/// The zero value (empty strings, zero decimals, no permissions) stands for
/// "not registered", which the coordinators treat as "no conversion configured".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryEntry {
    /// Unique key.
    pub denom: String,

    /// Denomination on the chain this token originated from.
    pub base_denom: String,

    /// Transport path the token travelled, empty for native tokens.
    pub path: String,

    /// Number of decimal places the integer amount represents.
    pub decimals: u32,

    /// Lower-precision denomination this token is converted into before it is sent.
    pub ibc_counterparty_denom: String,

    /// On a transport-side denomination: the original denomination it represents.
    pub unit_denom: String,

    pub display_name: String,

    pub permissions: Vec<Permission>,
}

impl RegistryEntry {
    /// Whether this is the zero value returned for unknown denominations.
    pub fn is_empty(&self) -> bool {
        self.denom.is_empty()
    }

    pub fn has_counterparty(&self) -> bool {
        !self.ibc_counterparty_denom.is_empty()
    }

    pub fn has_unit_denom(&self) -> bool {
        !self.unit_denom.is_empty()
    }

    /// True only if every permission in `required` is granted.
    /// An empty requirement is always satisfied.
    pub fn has_permissions(&self, required: &[Permission]) -> bool {
        required.iter().all(|p| self.permissions.contains(p))
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidEntry {
            denom: self.denom.clone(),
            reason: reason.to_string(),
        };
        Denom::parse(&self.denom).map_err(|e| invalid(&e.to_string()))?;
        if self.has_counterparty() {
            Denom::parse(&self.ibc_counterparty_denom).map_err(|e| invalid(&e.to_string()))?;
            if self.ibc_counterparty_denom == self.denom {
                return Err(invalid("counterparty denom must differ from denom"));
            }
        }
        if self.has_unit_denom() {
            Denom::parse(&self.unit_denom).map_err(|e| invalid(&e.to_string()))?;
            if self.unit_denom == self.denom {
                return Err(invalid("unit denom must differ from denom"));
            }
        }
        Ok(())
    }
}
