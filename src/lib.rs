//! Pocket Bank: a small banking system that keeps its accounts in a flat
//! text file and drives them through numbered menu commands.

pub mod account;
pub mod banking;
pub mod cli;
pub mod config;
pub mod store;

pub use account::{Account, AccountCategory, Outcome, RejectionReason};
pub use banking::{BankingError, BankingService, Command, CommandParams, Reply};
pub use store::{AccountStore, StoreError};
