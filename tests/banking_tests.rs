use pocket_bank::{
    banking::RandomIdGenerator, AccountCategory, AccountStore, BankingError, BankingService,
    CommandParams, Outcome, RejectionReason,
};
use rstest::{fixture, rstest};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

struct Setup {
    _dir: TempDir,
    path: PathBuf,
    service: BankingService,
    first_id: String,
    second_id: String,
}

impl Setup {
    fn reopen(&self) -> BankingService {
        let store = AccountStore::open(&self.path).unwrap();
        BankingService::new(store, Box::new(RandomIdGenerator::seeded(99)))
    }

    fn balance(&self, id: &str) -> f64 {
        self.service.account(id).unwrap().balance
    }
}

/// A personal account holding 200.0 and a business account holding 100.0,
/// both funded through the service
#[fixture]
fn setup() -> Setup {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.txt");
    let store = AccountStore::open(&path).unwrap();
    let mut service = BankingService::new(store, Box::new(RandomIdGenerator::seeded(2024)));

    let first = service.create_account(AccountCategory::Personal).unwrap();
    let second = service.create_account(AccountCategory::Business).unwrap();
    service
        .dispatch(&first.id, "2", &CommandParams::new().amount(200.0))
        .unwrap();
    service
        .dispatch(&second.id, "2", &CommandParams::new().amount(100.0))
        .unwrap();

    Setup {
        _dir: dir,
        path,
        service,
        first_id: first.id,
        second_id: second.id,
    }
}

#[rstest]
fn test_created_accounts_can_log_in(setup: Setup) {
    let first = setup.service.account(&setup.first_id).unwrap().clone();

    let account = setup.service.login(&first.id, &first.credential).unwrap();
    assert_eq!(account.id, setup.first_id);
    assert_eq!(account.category, AccountCategory::Personal);
    assert_eq!(first.id.len(), 5);
    assert_eq!(first.credential.len(), 4);
}

#[rstest]
fn test_wrong_pin_and_unknown_id_fail_alike(setup: Setup) {
    let first = setup.service.account(&setup.first_id).unwrap().clone();
    let wrong_pin = if first.credential == "1000" { "1001" } else { "1000" };

    let wrong = setup.service.login(&first.id, wrong_pin).unwrap_err();
    let unknown = setup.service.login("00000", &first.credential).unwrap_err();

    assert!(matches!(wrong, BankingError::Authentication));
    assert!(matches!(unknown, BankingError::Authentication));
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[rstest]
fn test_transfer_scenario(mut setup: Setup) {
    let params = CommandParams::new().amount(50.0).recipient(setup.second_id.clone());
    let first_id = setup.first_id.clone();

    let reply = setup.service.dispatch(&first_id, "4", &params).unwrap();

    assert_eq!(reply, "Transfer completed.");
    assert_eq!(setup.balance(&setup.first_id), 150.0);
    assert_eq!(setup.balance(&setup.second_id), 150.0);
}

#[rstest]
fn test_transfer_to_missing_recipient(mut setup: Setup) {
    let first_id = setup.first_id.clone();
    let params = CommandParams::new().amount(50.0).recipient("00000");

    let err = setup.service.dispatch(&first_id, "4", &params).unwrap_err();

    assert!(matches!(err, BankingError::Transfer));
    assert_eq!(setup.balance(&setup.first_id), 200.0);
    assert_eq!(setup.balance(&setup.second_id), 100.0);
}

#[rstest]
fn test_unknown_code_and_missing_parameters(mut setup: Setup) {
    let first_id = setup.first_id.clone();

    let err = setup.service.dispatch(&first_id, "99", &CommandParams::new()).unwrap_err();
    assert!(matches!(err, BankingError::MenuChoice(_)));

    let err = setup.service.dispatch(&first_id, "4", &CommandParams::new()).unwrap_err();
    assert!(matches!(err, BankingError::MissingParameter { .. }));

    let err = setup
        .service
        .dispatch(&first_id, "5", &CommandParams::new().amount(5.0))
        .unwrap_err();
    assert!(matches!(err, BankingError::MissingParameter { parameter: "number", .. }));
}

#[rstest]
fn test_every_mutation_is_persisted(mut setup: Setup) {
    let first_id = setup.first_id.clone();
    let second_id = setup.second_id.clone();

    setup.service.dispatch(&first_id, "3", &CommandParams::new().amount(20.0)).unwrap();
    setup
        .service
        .dispatch(&first_id, "5", &CommandParams::new().number("87654321").amount(30.0))
        .unwrap();
    setup
        .service
        .dispatch(&second_id, "4", &CommandParams::new().amount(10.0).recipient(first_id.clone()))
        .unwrap();

    let reopened = setup.reopen();
    assert_eq!(reopened.account(&first_id).unwrap().balance, 160.0);
    assert_eq!(reopened.account(&second_id).unwrap().balance, 90.0);
    assert_eq!(reopened.account(&second_id).unwrap().category, AccountCategory::Business);
}

#[rstest]
fn test_deleted_account_is_gone_after_reload(mut setup: Setup) {
    let first_id = setup.first_id.clone();

    let reply = setup.service.dispatch(&first_id, "6", &CommandParams::new()).unwrap();
    assert_eq!(reply, "Account successfully deleted.");

    let reopened = setup.reopen();
    assert!(reopened.account(&first_id).is_none());
    assert_eq!(reopened.store().len(), 1);

    let err = setup.service.delete_account(&first_id).unwrap_err();
    assert!(matches!(err, BankingError::NotFound));
}

#[rstest]
fn test_balance_check_does_not_rewrite_file(mut setup: Setup) {
    let first_id = setup.first_id.clone();
    fs::write(&setup.path, "").unwrap();

    let reply = setup.service.dispatch(&first_id, "1", &CommandParams::new()).unwrap();

    assert_eq!(reply, "Your balance is 200.0");
    assert_eq!(fs::read_to_string(&setup.path).unwrap(), "");
}

#[test]
fn test_outcomes_distinguish_causes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.txt");
    fs::write(&path, "12345,1111,Personal,100.0\n").unwrap();
    let mut store = AccountStore::open(&path).unwrap();
    let account = store.get_mut("12345").unwrap();

    let insufficient = account.withdraw(150.0);
    let invalid = account.withdraw(-1.0);

    assert_eq!(insufficient.to_string(), invalid.to_string());
    assert_eq!(insufficient, Outcome::WithdrawalRejected(RejectionReason::InsufficientFunds));
    assert_eq!(invalid, Outcome::WithdrawalRejected(RejectionReason::InvalidAmount));
    assert_eq!(account.balance, 100.0);
}

#[test]
fn test_lenient_load_then_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.txt");
    fs::write(&path, "bad,data,here\n12345,1111,Personal,100.0").unwrap();

    let mut service = BankingService::open(&path).unwrap();
    assert_eq!(service.store().len(), 1);

    service
        .dispatch("12345", "2", &CommandParams::new().amount(0.5))
        .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "12345,1111,Personal,100.5\n");
}
