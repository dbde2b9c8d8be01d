use std::fmt;

use super::BankingError;
use crate::account::{format_amount, Outcome};

/// Optional inputs that accompany a menu code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandParams {
    pub amount: Option<f64>,
    pub recipient_id: Option<String>,
    pub number: Option<String>,
}

impl CommandParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn recipient(mut self, recipient_id: impl Into<String>) -> Self {
        self.recipient_id = Some(recipient_id.into());
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }
}

/// One operation a logged-in account can perform
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CheckBalance,
    Deposit { amount: f64 },
    Withdraw { amount: f64 },
    Transfer { amount: f64, recipient_id: String },
    TopUp { number: String, amount: f64 },
    DeleteAccount,
}

impl Command {
    /// Menu code for this command
    pub fn code(&self) -> &'static str {
        match self {
            Command::CheckBalance => "1",
            Command::Deposit { .. } => "2",
            Command::Withdraw { .. } => "3",
            Command::Transfer { .. } => "4",
            Command::TopUp { .. } => "5",
            Command::DeleteAccount => "6",
        }
    }

    /// Build a command from a menu code and its parameters.
    ///
    /// Unknown codes fail with `MenuChoice`; a known code without the
    /// parameters it needs fails with `MissingParameter`.
    pub fn parse(code: &str, params: &CommandParams) -> Result<Self, BankingError> {
        match code {
            "1" => Ok(Command::CheckBalance),
            "2" => Ok(Command::Deposit {
                amount: require(params.amount, "deposit", "amount")?,
            }),
            "3" => Ok(Command::Withdraw {
                amount: require(params.amount, "withdraw", "amount")?,
            }),
            "4" => Ok(Command::Transfer {
                amount: require(params.amount, "transfer", "amount")?,
                recipient_id: require(params.recipient_id.clone(), "transfer", "recipient_id")?,
            }),
            "5" => Ok(Command::TopUp {
                number: require(params.number.clone(), "top-up", "number")?,
                amount: require(params.amount, "top-up", "amount")?,
            }),
            "6" => Ok(Command::DeleteAccount),
            other => Err(BankingError::MenuChoice(other.to_string())),
        }
    }

    /// Whether running this command changes the account file
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::CheckBalance)
    }
}

fn require<T>(value: Option<T>, operation: &'static str, parameter: &'static str) -> Result<T, BankingError> {
    value.ok_or(BankingError::MissingParameter { operation, parameter })
}

/// What a dispatched command produced
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Balance(f64),
    Outcome(Outcome),
    Deleted,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Balance(balance) => write!(f, "Your balance is {}", format_amount(*balance)),
            Reply::Outcome(outcome) => write!(f, "{}", outcome),
            Reply::Deleted => write!(f, "Account successfully deleted."),
        }
    }
}
