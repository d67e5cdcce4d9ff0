use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("insufficient funds in {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: String,
        needed: String,
        available: String,
    },

    #[error("module {0} is not permitted to mint")]
    MintNotPermitted(String),

    #[error("module {0} is not permitted to burn")]
    BurnNotPermitted(String),

    #[error("burn of {0} exceeds its total supply")]
    SupplyUnderflow(String),
}
