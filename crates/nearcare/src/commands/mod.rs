//! Command handlers, one module per top-level subcommand.

pub mod config_cmd;
pub mod distance;
pub mod facilities;
pub mod nearest;
pub mod util;

use nearcare_config::Config;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
///
/// `Config` and `Completions` never reach here — they are handled in
/// `main` before configuration is validated.
pub async fn dispatch(cmd: Command, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Facilities(args) => facilities::handle(config, args, global),
        Command::Nearest(args) => nearest::handle(config, args, global).await,
        Command::Distance(args) => distance::handle(&args, global),
        Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled before dispatch")
        }
    }
}
