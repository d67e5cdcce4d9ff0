//! Transfer module configuration with TOML file support.

use serde::{Deserialize, Serialize};

use meridian_registry::{RegistryEntry, TokenRegistry};
use meridian_types::PortId;
pub use meridian_utils::LoggingConfig;

use crate::TransferError;

/// Top-level configuration.
///
/// Can be loaded from a TOML file via [`MeridianConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MeridianConfig {
    #[serde(default)]
    pub transfer: TransferParams,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Entries that seed the in-memory token registry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry: Vec<RegistryEntry>,
}

/// Parameters of the transfer module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    /// Port the transfer module is bound to.
    #[serde(default = "default_port_id")]
    pub port_id: PortId,

    #[serde(default = "default_true")]
    pub send_enabled: bool,

    #[serde(default = "default_true")]
    pub receive_enabled: bool,

    /// Only tokens with the `ibc_export` permission may leave the chain.
    #[serde(default)]
    pub require_export_permission: bool,

    /// Only tokens with the `ibc_import` permission may be received.
    #[serde(default)]
    pub require_import_permission: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_port_id() -> PortId {
    PortId::transfer()
}

fn default_true() -> bool {
    true
}

// ── Impl ───────────────────────────────────────────────────────────────

impl MeridianConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, TransferError> {
        let content = std::fs::read_to_string(path).map_err(|e| TransferError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, TransferError> {
        toml::from_str(s).map_err(|e| TransferError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, TransferError> {
        toml::to_string_pretty(self).map_err(|e| TransferError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by `[logging]`.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Build the token registry from the configured entries.
    pub fn token_registry(&self) -> Result<TokenRegistry, TransferError> {
        Ok(TokenRegistry::from_entries(self.registry.iter().cloned())?)
    }
}

impl Default for TransferParams {
    fn default() -> Self {
        Self {
            port_id: default_port_id(),
            send_enabled: default_true(),
            receive_enabled: default_true(),
            require_export_permission: false,
            require_import_permission: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_registry::{Permission, RegistryError, RegistryLookup};
    use meridian_utils::LogFormat;
    use std::io::Write;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = MeridianConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.transfer, TransferParams::default());
        assert!(config.transfer.send_enabled);
        assert!(!config.transfer.require_export_permission);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Human);
        assert!(config.registry.is_empty());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let mut config = MeridianConfig::default();
        config.transfer.require_import_permission = true;
        config.logging.format = LogFormat::Json;
        let parsed = MeridianConfig::from_toml_str(&config.to_toml_string().unwrap()).expect("should parse");
        assert_eq!(parsed.transfer, config.transfer);
        assert_eq!(parsed.logging, config.logging);
    }

    #[test]
    fn registry_entries_seed_the_registry() {
        let toml = r#"
            [transfer]
            require_export_permission = true

            [logging]
            format = "json"
            level = "debug,meridian_transfer=trace"

            [[registry]]
            denom = "rowan"
            decimals = 18
            ibc_counterparty_denom = "xrowan"
            permissions = ["clp", "ibc_export"]

            [[registry]]
            denom = "xrowan"
            decimals = 10
            unit_denom = "rowan"
        "#;
        let config = MeridianConfig::from_toml_str(toml).expect("should parse");
        assert!(config.transfer.require_export_permission);
        assert!(config.transfer.receive_enabled);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "debug,meridian_transfer=trace");

        let registry = config.token_registry().unwrap();
        let rowan = registry.get_denom("rowan");
        assert_eq!(rowan.decimals, 18);
        assert!(registry.check_denom_permissions(&rowan, &[Permission::IbcExport]));
        assert_eq!(registry.get_denom("xrowan").unit_denom, "rowan");
    }

    #[test]
    fn duplicate_registry_entries_are_rejected() {
        let toml = r#"
            [[registry]]
            denom = "rowan"
            [[registry]]
            denom = "rowan"
        "#;
        let config = MeridianConfig::from_toml_str(toml).unwrap();
        assert!(matches!(
            config.token_registry(),
            Err(TransferError::Registry(RegistryError::DuplicateDenom(_)))
        ));
    }

    #[test]
    fn logging_section_installs_subscriber() {
        let config = MeridianConfig::from_toml_str("[logging]\nlevel = \"debug\"").unwrap();
        config.logging.try_init();
        tracing::debug!(level = %config.logging.level, "subscriber installed from config");
        assert!(!config.logging.try_init());
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let err = MeridianConfig::from_toml_str("[transfer]\nport_id = \"x\"").unwrap_err();
        assert!(matches!(err, TransferError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[transfer]\nsend_enabled = false").unwrap();
        let config = MeridianConfig::from_toml_file(file.path()).unwrap();
        assert!(!config.transfer.send_enabled);

        let missing = MeridianConfig::from_toml_file("/nonexistent/meridian.toml");
        assert!(matches!(missing, Err(TransferError::Config(_))));
    }
}
