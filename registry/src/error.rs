use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate registry entry for denom {0}")]
    DuplicateDenom(String),

    #[error("invalid registry entry for denom {denom:?}: {reason}")]
    InvalidEntry { denom: String, reason: String },
}
