use crate::store::StoreError;

/// Structural failures raised by the banking service.
///
/// Business-rule refusals (bad amounts, insufficient funds) are not errors;
/// they come back as an [`Outcome`](crate::account::Outcome).
#[derive(Debug, thiserror::Error)]
pub enum BankingError {
    #[error("Account number or password is not recognized")]
    Authentication,

    #[error("Account does not exist")]
    NotFound,

    #[error("Invalid menu choice: {0}")]
    MenuChoice(String),

    #[error("Recipient account does not exist.")]
    Transfer,

    #[error("Missing required parameter '{parameter}' for {operation}")]
    MissingParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    #[error("Could not issue a free account number after {0} attempts")]
    IdSpaceExhausted(u32),

    #[error(transparent)]
    Storage(#[from] StoreError),
}
