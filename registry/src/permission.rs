//! Per-denomination permissions.

use serde::{Deserialize, Serialize};

/// What a registered denomination may be used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Unspecified,
    /// Usable in liquidity pools.
    Clp,
    /// May leave the chain over a transport channel.
    IbcExport,
    /// May be received over a transport channel.
    IbcImport,
}
