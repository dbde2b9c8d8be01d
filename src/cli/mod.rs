// Terminal front end
// One-shot subcommands and the interactive menu loop. Both only talk to the
// banking service; neither touches the account file directly.

pub mod account;
pub mod interactive;
pub mod utils;
