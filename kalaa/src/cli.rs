//! Root CLI structure for kalaa

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kalaa")]
#[command(about = "Command-line tools for the Kalaa site", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fire effect rendering and inspection
    Fire {
        #[command(subcommand)]
        command: crate::commands::fire::FireCommands,
    },

    /// Menu file operations
    Menu {
        #[command(subcommand)]
        command: crate::commands::menu::MenuCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }
}
