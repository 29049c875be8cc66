use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lntop", version)]
#[command(about = "Terminal dashboard for a Lightning node", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path (default: ~/.lntop/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Force debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the on-chain wallet balance and exit
    WalletBalance,
    /// Print node events as they are detected, without the dashboard
    Pubsub,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_runs_dashboard() {
        let cli = Cli::try_parse_from(["lntop"]).expect("parse");
        assert_eq!(cli.command, None);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lntop", "wallet-balance", "-v", "-c", "/tmp/c.toml"])
            .expect("parse");
        assert_eq!(cli.command, Some(Command::WalletBalance));
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["lntop", "send-payment"]).is_err());
    }
}
