use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::fmt;

use super::model::Account;

/// Mobile numbers are exactly eight ASCII decimal digits
pub const MOBILE_NUMBER_REGEX: &str = r"^[0-9]{8}$";

lazy_static! {
    static ref MOBILE_NUMBER: Regex = Regex::new(MOBILE_NUMBER_REGEX).unwrap();
}

/// Why a balance-changing operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Amount was zero, negative or not a number
    InvalidAmount,
    /// Amount exceeded the current balance
    InsufficientFunds,
    /// Mobile number was not eight digits
    InvalidNumber,
}

/// Result of a balance-changing operation.
///
/// Business-rule failures are values, not errors. The `Display` output is the
/// fixed status text shown to users; callers that need to branch should match
/// on the variant instead of the text.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    DepositCompleted,
    DepositRejected,
    WithdrawalCompleted,
    WithdrawalRejected(RejectionReason),
    TransferCompleted,
    TopUpCompleted { number: String, amount: f64 },
    TopUpRejected(RejectionReason),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::DepositCompleted
                | Outcome::WithdrawalCompleted
                | Outcome::TransferCompleted
                | Outcome::TopUpCompleted { .. }
        )
    }

    /// The refusal cause, if any
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Outcome::DepositRejected => Some(RejectionReason::InvalidAmount),
            Outcome::WithdrawalRejected(reason) | Outcome::TopUpRejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::DepositCompleted => write!(f, "Deposit completed."),
            Outcome::DepositRejected => write!(f, "Invalid amount for deposit."),
            Outcome::WithdrawalCompleted => write!(f, "Withdrawal completed."),
            Outcome::WithdrawalRejected(_) => {
                write!(f, "Insufficiency of funds or invalid withdrawal sum.")
            }
            Outcome::TransferCompleted => write!(f, "Transfer completed."),
            Outcome::TopUpCompleted { number, amount } => write!(
                f,
                "Mobile number {} topped up with {}.",
                number,
                format_amount(*amount)
            ),
            Outcome::TopUpRejected(_) => write!(f, "Invalid phone number or insufficient balance."),
        }
    }
}

/// Render an amount the way the account file and status messages expect.
///
/// Shortest round-trip digits, with a trailing `.0` on integral values.
/// Magnitudes below `1e-4` or from `1e16` up switch to a signed exponent of
/// at least two digits (`1e+16`, `1.5e-05`).
pub fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "nan".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", amount);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let plain = amount.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Check an amount against the available balance
fn check_debit(amount: f64, balance: f64) -> Result<(), RejectionReason> {
    // NaN fails both comparisons
    if !(amount > 0.0) {
        return Err(RejectionReason::InvalidAmount);
    }
    if amount > balance {
        return Err(RejectionReason::InsufficientFunds);
    }
    Ok(())
}

fn is_mobile_number(number: &str) -> bool {
    MOBILE_NUMBER.is_match(number)
}

impl Account {
    /// Add money to the account. Only positive amounts are accepted.
    pub fn deposit(&mut self, amount: f64) -> Outcome {
        if amount > 0.0 {
            self.balance += amount;
            debug!("Deposited {} into account {}", format_amount(amount), self.id);
            Outcome::DepositCompleted
        } else {
            Outcome::DepositRejected
        }
    }

    /// Take money out of the account if `0 < amount <= balance`
    pub fn withdraw(&mut self, amount: f64) -> Outcome {
        match check_debit(amount, self.balance) {
            Ok(()) => {
                self.balance -= amount;
                debug!("Withdrew {} from account {}", format_amount(amount), self.id);
                Outcome::WithdrawalCompleted
            }
            Err(reason) => Outcome::WithdrawalRejected(reason),
        }
    }

    /// Move money to another account.
    ///
    /// The withdrawal leg decides the result; a refused withdrawal is
    /// returned unchanged and the recipient is not touched.
    pub fn transfer(&mut self, amount: f64, recipient: &mut Account) -> Outcome {
        let withdrawal = self.withdraw(amount);
        if !withdrawal.is_success() {
            return withdrawal;
        }
        recipient.deposit(amount);
        Outcome::TransferCompleted
    }

    /// Buy mobile credit for an 8-digit number
    pub fn top_up_mobile(&mut self, number: &str, amount: f64) -> Outcome {
        if !is_mobile_number(number) {
            return Outcome::TopUpRejected(RejectionReason::InvalidNumber);
        }
        if let Err(reason) = check_debit(amount, self.balance) {
            return Outcome::TopUpRejected(reason);
        }

        self.balance -= amount;
        debug!("Topped up {} with {} from account {}", number, format_amount(amount), self.id);
        Outcome::TopUpCompleted {
            number: number.to_string(),
            amount,
        }
    }
}
