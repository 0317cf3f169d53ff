use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "clipstack")]
#[command(version, about = "Clipboard history daemon with favorites and a privacy mode", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the history registry, payloads and logs
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Watch the clipboard until Ctrl+C (default)
    Watch {
        /// Read history commands from stdin
        #[arg(long)]
        console: bool,
    },
    /// Print the persisted history without touching the clipboard
    List,
}

impl Default for Command {
    fn default() -> Self {
        Command::Watch { console: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_watch() {
        let cli = Cli::try_parse_from(["clipstack"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::Watch { console: false });
    }

    #[test]
    fn global_paths_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["clipstack", "list", "--data-dir", "/tmp/cs"]).unwrap();
        assert_eq!(cli.command, Some(Command::List));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/cs")));
    }

    #[test]
    fn watch_accepts_console_flag() {
        let cli = Cli::try_parse_from(["clipstack", "watch", "--console"]).unwrap();
        assert_eq!(cli.command, Some(Command::Watch { console: true }));
    }
}
