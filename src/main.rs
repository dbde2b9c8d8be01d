use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use log::{debug, error, info};
use std::process;

use pocket_bank::banking::{BankingService, CommandParams};
use pocket_bank::cli;
use pocket_bank::config;

/// Pocket Bank - a small terminal banking system backed by a flat account file
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Sets the configuration file
    #[clap(short, long, value_name = "FILE", default_value = "config.toml")]
    config: String,

    /// Account file to use instead of the configured one
    #[clap(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[clap(subcommand)]
    command: Commands,
}

/// Account number and PIN
#[derive(Args)]
struct Credentials {
    /// Account ID
    #[clap(long)]
    id: String,

    /// 4-digit PIN
    #[clap(long)]
    pin: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Create {
        /// Account category (personal or business)
        #[clap(short, long, default_value = "personal")]
        category: String,
    },

    /// Show the account balance
    Balance {
        #[clap(flatten)]
        credentials: Credentials,
    },

    /// Deposit funds
    Deposit {
        #[clap(flatten)]
        credentials: Credentials,

        /// Amount to deposit
        #[clap(short, long, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Withdraw funds
    Withdraw {
        #[clap(flatten)]
        credentials: Credentials,

        /// Amount to withdraw
        #[clap(short, long, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Transfer funds to another account
    Transfer {
        #[clap(flatten)]
        credentials: Credentials,

        /// Recipient account ID
        #[clap(long)]
        to: String,

        /// Amount to transfer
        #[clap(short, long, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Buy mobile credit
    TopUp {
        #[clap(flatten)]
        credentials: Credentials,

        /// 8-digit mobile number
        #[clap(short, long)]
        number: String,

        /// Amount to top up
        #[clap(short, long, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Permanently delete the account
    Delete {
        #[clap(flatten)]
        credentials: Credentials,

        /// Confirm deletion without additional prompt
        #[clap(long)]
        confirm: bool,
    },

    /// List account numbers and categories
    List {},

    /// Start the interactive menu
    Interactive {},
}

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    // Initialize logger; RUST_LOG still wins over the -d flags
    let default_level = match cli.debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(err) = config::load_config(&cli.config) {
        error!("Failed to load configuration: {:#}", err);
        process::exit(1);
    }
    debug!("Configuration loaded from {}", cli.config);

    let mut settings = config::get_config();
    if let Some(file) = &cli.file {
        settings.storage.path = file.clone();
    }

    let mut service = match BankingService::from_config(&settings) {
        Ok(service) => service,
        Err(err) => {
            error!("Failed to open account file {}: {}", settings.storage.path, err);
            process::exit(1);
        }
    };
    info!("{} v{} using {}", settings.app_name, settings.version, settings.storage.path);

    let result = match &cli.command {
        Commands::Create { category } => cli::account::create_account(&mut service, category),
        Commands::Balance { credentials } => run(&mut service, credentials, "1", CommandParams::new()),
        Commands::Deposit { credentials, amount } => {
            run(&mut service, credentials, "2", CommandParams::new().amount(*amount))
        }
        Commands::Withdraw { credentials, amount } => {
            run(&mut service, credentials, "3", CommandParams::new().amount(*amount))
        }
        Commands::Transfer { credentials, to, amount } => run(
            &mut service,
            credentials,
            "4",
            CommandParams::new().amount(*amount).recipient(to.clone()),
        ),
        Commands::TopUp { credentials, number, amount } => run(
            &mut service,
            credentials,
            "5",
            CommandParams::new().number(number.clone()).amount(*amount),
        ),
        Commands::Delete { credentials, confirm } => {
            if !*confirm && !confirm_deletion() {
                cli::utils::print_info("Deletion cancelled.");
                return;
            }
            run(&mut service, credentials, "6", CommandParams::new())
        }
        Commands::List {} => cli::account::list_accounts(&service),
        Commands::Interactive {} => cli::interactive::run_interactive(&mut service),
    };

    if let Err(err) = result {
        cli::utils::print_error(&format!("{:#}", err));
        process::exit(1);
    }
}

fn run(service: &mut BankingService, credentials: &Credentials, code: &str, params: CommandParams) -> anyhow::Result<()> {
    cli::account::run_operation(service, &credentials.id, &credentials.pin, code, params)
}

fn confirm_deletion() -> bool {
    cli::utils::print_warning("Permanently delete this account? This cannot be undone!");
    match cli::utils::read_line("Continue? [y/N]: ") {
        Ok(answer) => cli::utils::is_confirmed(&answer),
        Err(_) => false,
    }
}
