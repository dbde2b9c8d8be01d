// Account module
// This module provides the account model and the balance-changing
// operations: deposit, withdrawal, transfer and mobile top-up.

mod model;
mod transactions;

pub use model::{Account, AccountCategory};
pub use transactions::{format_amount, Outcome, RejectionReason};
