use anyhow::{anyhow, Context, Result};
use log::{error, info};

use crate::account::AccountCategory;
use crate::banking::{BankingService, CommandParams};
use crate::cli::utils::{print_header, print_info, print_success, print_warning};

/// Create a new account and show its credentials
pub fn create_account(service: &mut BankingService, category_str: &str) -> Result<()> {
    let category = AccountCategory::from_str(category_str)
        .map_err(|_| anyhow!("Invalid account category. Must be 'personal' or 'business'."))?;

    let account = service
        .create_account(category)
        .context("Failed to create account")?;

    print_success(&format!("{} account created successfully!", category.as_str()));
    println!("Account ID: {}", account.id);
    println!("PIN: {}", account.credential);
    print_warning("Write the PIN down now. It cannot be shown again.");
    Ok(())
}

/// Log in and run one menu code, printing the reply
pub fn run_operation(
    service: &mut BankingService,
    id: &str,
    pin: &str,
    code: &str,
    params: CommandParams,
) -> Result<()> {
    let account_id = match service.login(id, pin) {
        Ok(account) => account.id.clone(),
        Err(e) => {
            error!("Login failed for account {}", id);
            return Err(e.into());
        }
    };

    let reply = service.dispatch(&account_id, code, &params)?;
    info!("Account {} completed operation {}", account_id, code);
    print_info(&reply);
    Ok(())
}

/// List account numbers and categories, never PINs
pub fn list_accounts(service: &BankingService) -> Result<()> {
    let store = service.store();
    if store.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    print_header("Accounts");
    println!("{:<8} {:<10}", "ID", "CATEGORY");
    println!("{:-<8} {:-<10}", "", "");
    for account in store.accounts() {
        println!("{:<8} {:<10}", account.id, account.category.as_str());
    }
    println!("\n{} account(s)", store.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banking::RandomIdGenerator;
    use crate::store::AccountStore;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_operation_requires_login() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        fs::write(&path, "11111,1111,Personal,10.0\n").unwrap();
        let store = AccountStore::open(&path).unwrap();
        let mut service = BankingService::new(store, Box::new(RandomIdGenerator::seeded(1)));

        let result = run_operation(&mut service, "11111", "0000", "3", CommandParams::new().amount(5.0));
        assert!(result.is_err());
        assert_eq!(service.account("11111").unwrap().balance, 10.0);

        run_operation(&mut service, "11111", "1111", "3", CommandParams::new().amount(5.0)).unwrap();
        assert_eq!(service.account("11111").unwrap().balance, 5.0);
    }

    #[test]
    fn test_create_account_rejects_unknown_category() {
        let dir = tempdir().unwrap();
        let store = AccountStore::open(dir.path().join("accounts.txt")).unwrap();
        let mut service = BankingService::new(store, Box::new(RandomIdGenerator::seeded(1)));

        assert!(create_account(&mut service, "savings").is_err());
        assert!(service.store().is_empty());

        create_account(&mut service, "Business").unwrap();
        assert_eq!(service.store().len(), 1);
    }
}
