use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::account::{format_amount, Account, AccountCategory, Outcome};


/// Account file errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read account file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write account file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// In-memory accounts backed by a flat `id,credential,category,balance` file
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
    atomic_writes: bool,
    accounts: BTreeMap<String, Account>,
}

impl AccountStore {
    /// Open a store, loading every well-formed record from `path`.
    /// A missing file gives an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let accounts = load(&path)?;
        Ok(Self {
            path,
            atomic_writes: false,
            accounts,
        })
    }

    /// Replace the file through a temporary sibling instead of truncating it
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    /// Insert an account, returning whatever previously held its id
    pub fn insert(&mut self, account: Account) -> Option<Account> {
        self.accounts.insert(account.id.clone(), account)
    }

    pub fn remove(&mut self, id: &str) -> Option<Account> {
        self.accounts.remove(id)
    }

    /// Accounts in id order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Transfer between two stored accounts.
    ///
    /// Returns `None` if either id is unknown. The legs run one after the
    /// other on the stored slots, so a transfer to the sending account
    /// withdraws and re-deposits the same amount and reports completion.
    pub fn transfer(&mut self, from_id: &str, to_id: &str, amount: f64) -> Option<Outcome> {
        if !self.accounts.contains_key(to_id) {
            return None;
        }

        let withdrawal = self.accounts.get_mut(from_id)?.withdraw(amount);
        if !withdrawal.is_success() {
            return Some(withdrawal);
        }

        self.accounts.get_mut(to_id)?.deposit(amount);
        Some(Outcome::TransferCompleted)
    }

    /// Rewrite the whole account file
    pub fn save(&self) -> Result<(), StoreError> {
        let contents = serialize(self.accounts.values());
        let write_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        if self.atomic_writes {
            self.replace_atomically(&contents).map_err(write_error)?;
        } else {
            fs::write(&self.path, contents).map_err(write_error)?;
        }

        debug!("Saved {} accounts to {}", self.accounts.len(), self.path.display());
        Ok(())
    }

    fn replace_atomically(&self, contents: &str) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(contents.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Read every well-formed record from an account file.
///
/// Malformed lines are skipped and a missing file is an empty map; only
/// other I/O failures are returned.
pub fn load(path: &Path) -> Result<BTreeMap<String, Account>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Account file {} does not exist yet, starting empty", path.display());
            return Ok(BTreeMap::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let accounts = parse_accounts(&bytes);
    info!("Loaded {} accounts from {}", accounts.len(), path.display());
    Ok(accounts)
}

/// Parse raw account file contents, later records replacing earlier ones
/// with the same id.
///
/// Lines are decoded one at a time, so a line that is not valid UTF-8 is
/// skipped like any other malformed record.
pub fn parse_accounts(contents: &[u8]) -> BTreeMap<String, Account> {
    let mut accounts = BTreeMap::new();

    for (index, raw) in contents.split(|&byte| byte == b'\n').enumerate() {
        let line = std::str::from_utf8(raw).ok();
        match line.and_then(parse_record) {
            Some(account) => {
                accounts.insert(account.id.clone(), account);
            }
            None if matches!(line, Some(text) if text.trim().is_empty()) => {}
            None => warn!("Skipping malformed account record on line {}", index + 1),
        }
    }

    accounts
}

/// Parse one `id,credential,category,balance` line
pub fn parse_record(line: &str) -> Option<Account> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let [id, credential, category, balance] = fields.as_slice() else {
        return None;
    };

    let balance = balance.trim().parse::<f64>().ok()?;

    Some(Account::with_balance(
        *id,
        *credential,
        AccountCategory::from_stored(category),
        balance,
    ))
}

/// Format one account as a file line, without the newline
pub fn format_record(account: &Account) -> String {
    format!(
        "{},{},{},{}",
        account.id,
        account.credential,
        account.category.as_str(),
        format_amount(account.balance)
    )
}

fn serialize<'a>(accounts: impl Iterator<Item = &'a Account>) -> String {
    let mut contents = String::new();
    for account in accounts {
        contents.push_str(&format_record(account));
        contents.push('\n');
    }
    contents
}
