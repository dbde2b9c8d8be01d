use std::fmt;

/// Account category
///
/// Purely descriptive: personal and business accounts share every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCategory {
    Personal,
    Business,
}

impl AccountCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountCategory::Personal => "Personal",
            AccountCategory::Business => "Business",
        }
    }

    /// Parse a category typed by a user (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(AccountCategory::Personal),
            "business" => Ok(AccountCategory::Business),
            _ => Err(format!("Invalid account category: {}", s)),
        }
    }

    /// Restore a category read from the account file.
    ///
    /// Only an exact `Personal` restores as personal; every other value,
    /// including a corrupted field, restores as business.
    pub fn from_stored(s: &str) -> Self {
        if s == "Personal" {
            AccountCategory::Personal
        } else {
            AccountCategory::Business
        }
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account model
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// 5-digit account number
    pub id: String,
    /// 4-digit PIN, compared by exact string equality
    pub credential: String,
    pub category: AccountCategory,
    pub balance: f64,
}

impl Account {
    pub fn new(id: impl Into<String>, credential: impl Into<String>, category: AccountCategory) -> Self {
        Self::with_balance(id, credential, category, 0.0)
    }

    pub fn with_balance(
        id: impl Into<String>,
        credential: impl Into<String>,
        category: AccountCategory,
        balance: f64,
    ) -> Self {
        Self {
            id: id.into(),
            credential: credential.into(),
            category,
            balance,
        }
    }

    /// Check a presented PIN against the stored one
    pub fn credential_matches(&self, credential: &str) -> bool {
        self.credential == credential
    }
}
