use pdq_config::PdqConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, config: &PdqConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => commands::run::handle(args, config, flags),
        Commands::Report(args) => commands::report::handle(args, config, flags),
        Commands::Config => commands::config::handle(config, flags),
    }
}
