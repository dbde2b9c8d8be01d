use anyhow::Result;
use log::debug;
use std::io::{self, BufRead, Write};

use crate::account::AccountCategory;
use crate::banking::{BankingService, CommandParams};
use crate::cli::utils::{is_confirmed, parse_amount, prompt};

const MAIN_MENU: &[(&str, &str)] = &[
    ("1", "Login"),
    ("2", "Create Personal Account"),
    ("3", "Create Business Account"),
    ("4", "Quit"),
];

const ACCOUNT_MENU: &[(&str, &str)] = &[
    ("1", "Check Balance"),
    ("2", "Deposit"),
    ("3", "Withdraw"),
    ("4", "Transfer"),
    ("5", "Top-Up Mobile"),
    ("6", "Delete Account"),
    ("7", "Logout"),
];

const LOGOUT: &str = "7";

enum Flow {
    Continue,
    Quit,
}

/// What the parameter prompts produced
enum Gathered {
    Params(CommandParams),
    Cancelled,
    EndOfInput,
}

/// Run the menu loop on the terminal
pub fn run_interactive(service: &mut BankingService) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run(service, &mut input, &mut output)
}

/// Run the menu loop until the user quits or input ends.
///
/// Failures from the service are printed and the loop carries on.
pub fn run<R: BufRead, W: Write>(service: &mut BankingService, input: &mut R, output: &mut W) -> Result<()> {
    writeln!(output, "Welcome to the Bank!")?;

    loop {
        print_menu(output, "Main Menu", MAIN_MENU)?;
        let Some(choice) = prompt(input, output, "Choose an option: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                if let Flow::Quit = login(service, input, output)? {
                    return Ok(());
                }
            }
            "2" => create_account(service, output, AccountCategory::Personal)?,
            "3" => create_account(service, output, AccountCategory::Business)?,
            "4" => {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }
            other => writeln!(output, "❌ Invalid menu choice: {}", other)?,
        }
    }
}

fn print_menu<W: Write>(output: &mut W, title: &str, options: &[(&str, &str)]) -> Result<()> {
    writeln!(output, "\n{}", title)?;
    for (key, label) in options {
        writeln!(output, "  {}. {}", key, label)?;
    }
    Ok(())
}

fn create_account<W: Write>(service: &mut BankingService, output: &mut W, category: AccountCategory) -> Result<()> {
    match service.create_account(category) {
        Ok(account) => writeln!(
            output,
            "✅ Created {} Account. ID: {}, Pass: {}",
            category.as_str(),
            account.id,
            account.credential
        )?,
        Err(e) => writeln!(output, "❌ {}", e)?,
    }
    Ok(())
}

fn login<R: BufRead, W: Write>(service: &mut BankingService, input: &mut R, output: &mut W) -> Result<Flow> {
    let Some(id) = prompt(input, output, "Account ID: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(passcode) = prompt(input, output, "Passcode: ")? else {
        return Ok(Flow::Quit);
    };

    let account_id = match service.login(&id, &passcode) {
        Ok(account) => account.id.clone(),
        Err(e) => {
            writeln!(output, "❌ Login failed: {}", e)?;
            return Ok(Flow::Continue);
        }
    };

    writeln!(output, "✅ Logged in to account {}", account_id)?;
    session(service, input, output, &account_id)
}

/// Operation menu for one logged-in account
fn session<R: BufRead, W: Write>(
    service: &mut BankingService,
    input: &mut R,
    output: &mut W,
    account_id: &str,
) -> Result<Flow> {
    loop {
        print_menu(output, "Account Menu", ACCOUNT_MENU)?;
        let Some(choice) = prompt(input, output, "Choose an operation: ")? else {
            return Ok(Flow::Quit);
        };

        if choice == LOGOUT {
            writeln!(output, "Logged out.")?;
            return Ok(Flow::Continue);
        }

        let params = match gather_params(&choice, input, output)? {
            Gathered::Params(params) => params,
            Gathered::Cancelled => continue,
            Gathered::EndOfInput => return Ok(Flow::Quit),
        };

        match service.dispatch(account_id, &choice, &params) {
            Ok(reply) => writeln!(output, "{}", reply)?,
            Err(e) => writeln!(output, "❌ {}", e)?,
        }

        // Deleted accounts go back to the main menu
        if service.account(account_id).is_none() {
            debug!("Session for account {} ended", account_id);
            return Ok(Flow::Continue);
        }
    }
}

fn gather_params<R: BufRead, W: Write>(choice: &str, input: &mut R, output: &mut W) -> Result<Gathered> {
    let params = CommandParams::new();

    let gathered = match choice {
        "2" => ask_amount(input, output, "Enter amount to deposit: ", params)?,
        "3" => ask_amount(input, output, "Enter amount to withdraw: ", params)?,
        "4" => match prompt(input, output, "Enter recipient account ID: ")? {
            Some(recipient) => ask_amount(input, output, "Enter amount to transfer: ", params.recipient(recipient))?,
            None => Gathered::EndOfInput,
        },
        "5" => match prompt(input, output, "Enter mobile number (8 digits): ")? {
            Some(number) => ask_amount(input, output, "Enter top-up amount: ", params.number(number))?,
            None => Gathered::EndOfInput,
        },
        "6" => match prompt(input, output, "Permanently delete this account? This cannot be undone! [y/N]: ")? {
            Some(answer) if is_confirmed(&answer) => Gathered::Params(params),
            Some(_) => {
                writeln!(output, "Deletion cancelled.")?;
                Gathered::Cancelled
            }
            None => Gathered::EndOfInput,
        },
        _ => Gathered::Params(params),
    };

    Ok(gathered)
}

fn ask_amount<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt_text: &str,
    params: CommandParams,
) -> Result<Gathered> {
    let Some(answer) = prompt(input, output, prompt_text)? else {
        return Ok(Gathered::EndOfInput);
    };

    match parse_amount(&answer) {
        Ok(amount) => Ok(Gathered::Params(params.amount(amount))),
        Err(e) => {
            writeln!(output, "❌ {}", e)?;
            Ok(Gathered::Cancelled)
        }
    }
}
