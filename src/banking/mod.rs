// Banking service module
// Authentication, account lifecycle and the menu-code dispatcher that sits
// on top of the account store.

mod command;
mod error;
mod ids;

pub use command::{Command, CommandParams, Reply};
pub use error::BankingError;
pub use ids::{IdGenerator, RandomIdGenerator, ACCOUNT_ID_RANGE, CREDENTIAL_RANGE};

#[cfg(test)]
pub use ids::MockIdGenerator;

use log::{debug, info, warn};
use std::path::Path;

use crate::account::{Account, AccountCategory, Outcome};
use crate::config::Config;
use crate::store::AccountStore;

/// Default number of draws before account number issuing gives up
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 1000;

/// Banking front door: every caller-facing operation goes through here and
/// every mutation is written back to the account file before returning.
pub struct BankingService {
    store: AccountStore,
    ids: Box<dyn IdGenerator>,
    max_id_attempts: u32,
}

impl BankingService {
    /// Open the account file at `path` with a randomly seeded generator
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BankingError> {
        let store = AccountStore::open(path)?;
        Ok(Self::new(store, Box::new(RandomIdGenerator::new())))
    }

    /// Open the account file named by the configuration
    pub fn from_config(config: &Config) -> Result<Self, BankingError> {
        let store = AccountStore::open(&config.storage.path)?
            .with_atomic_writes(config.storage.atomic_writes);
        Ok(Self::new(store, Box::new(RandomIdGenerator::new()))
            .with_max_id_attempts(config.accounts.max_id_attempts))
    }

    pub fn new(store: AccountStore, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            store,
            ids,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }

    pub fn with_max_id_attempts(mut self, max_id_attempts: u32) -> Self {
        self.max_id_attempts = max_id_attempts.max(1);
        self
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Look up an account without authenticating
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.store.get(id)
    }

    /// Open a new empty account.
    ///
    /// The returned copy is the only place the PIN is ever handed out.
    pub fn create_account(&mut self, category: AccountCategory) -> Result<Account, BankingError> {
        let id = self.issue_account_id()?;
        let credential = self.ids.credential();

        let account = Account::new(id, credential, category);
        self.store.insert(account.clone());
        if let Err(e) = self.store.save() {
            // Nobody has seen the PIN, so the account must not outlive the failure
            self.store.remove(&account.id);
            return Err(e.into());
        }

        info!("Created {} account {}", category.as_str(), account.id);
        Ok(account)
    }

    /// Draw account numbers until one is free in the store
    fn issue_account_id(&mut self) -> Result<String, BankingError> {
        for attempt in 1..=self.max_id_attempts {
            let candidate = self.ids.account_id();
            if !self.store.contains(&candidate) {
                return Ok(candidate);
            }
            debug!("Account number {} already taken (attempt {})", candidate, attempt);
        }

        warn!("No free account number after {} attempts", self.max_id_attempts);
        Err(BankingError::IdSpaceExhausted(self.max_id_attempts))
    }

    /// Authenticate with account number and PIN.
    ///
    /// Unknown accounts and wrong PINs fail the same way.
    pub fn login(&self, id: &str, credential: &str) -> Result<&Account, BankingError> {
        match self.store.get(id) {
            Some(account) if account.credential_matches(credential) => {
                debug!("Account {} logged in", id);
                Ok(account)
            }
            _ => {
                debug!("Rejected login for account {}", id);
                Err(BankingError::Authentication)
            }
        }
    }

    /// Permanently remove an account
    pub fn delete_account(&mut self, id: &str) -> Result<(), BankingError> {
        if self.store.remove(id).is_none() {
            return Err(BankingError::NotFound);
        }
        self.store.save()?;

        info!("Deleted account {}", id);
        Ok(())
    }

    /// Run a menu code for a logged-in account and render the reply
    pub fn dispatch(
        &mut self,
        account_id: &str,
        code: &str,
        params: &CommandParams,
    ) -> Result<String, BankingError> {
        let command = Command::parse(code, params)?;
        Ok(self.execute(account_id, command)?.to_string())
    }

    /// Run a typed command for a logged-in account
    pub fn execute(&mut self, account_id: &str, command: Command) -> Result<Reply, BankingError> {
        debug!("Account {} running command {}", account_id, command.code());
        let mutating = command.is_mutating();

        let reply = match command {
            Command::CheckBalance => {
                let account = self.store.get(account_id).ok_or(BankingError::NotFound)?;
                Reply::Balance(account.balance)
            }
            Command::Deposit { amount } => Reply::Outcome(self.account_mut(account_id)?.deposit(amount)),
            Command::Withdraw { amount } => Reply::Outcome(self.account_mut(account_id)?.withdraw(amount)),
            Command::Transfer { amount, recipient_id } => {
                Reply::Outcome(self.transfer(account_id, &recipient_id, amount)?)
            }
            Command::TopUp { number, amount } => {
                Reply::Outcome(self.account_mut(account_id)?.top_up_mobile(&number, amount))
            }
            Command::DeleteAccount => {
                self.delete_account(account_id)?;
                Reply::Deleted
            }
        };

        if mutating {
            self.store.save()?;
        }
        Ok(reply)
    }

    fn account_mut(&mut self, id: &str) -> Result<&mut Account, BankingError> {
        self.store.get_mut(id).ok_or(BankingError::NotFound)
    }

    fn transfer(&mut self, from_id: &str, to_id: &str, amount: f64) -> Result<Outcome, BankingError> {
        if !self.store.contains(to_id) {
            return Err(BankingError::Transfer);
        }
        if !self.store.contains(from_id) {
            return Err(BankingError::NotFound);
        }
        if from_id == to_id {
            debug!("Account {} is transferring to itself", from_id);
        }

        self.store
            .transfer(from_id, to_id, amount)
            .ok_or(BankingError::NotFound)
    }
}
