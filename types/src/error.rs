//! Top-level error type for parsing and validating the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid denomination: {0}")]
    InvalidDenom(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}
