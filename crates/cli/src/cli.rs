//! CLI argument definitions using clap.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tcdp_rs_contracts::Network;

/// tCDP CLI - project and manage tokenized CDP positions
#[derive(Parser, Debug)]
#[command(name = "tcdp")]
#[command(about = "Project and manage tokenized CDP positions", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// JSON file overriding the default ratio thresholds
    #[arg(long, global = true, env = "TCDP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the pooled position, ratio band and migration advice
    Status(StatusArgs),
    /// Deposit ether and mint tCDP (initiates an empty pool)
    Deposit(DepositArgs),
    /// Burn tCDP, repaying DAI and receiving ether
    Withdraw(WithdrawArgs),
    /// Approve the tCDP contract to pull DAI
    Approve(ApproveArgs),
    /// Leverage or deleverage when the ratio leaves its band
    Rebalance(WriteArgs),
    /// Flash-migrate to the back-end with the better funding rate
    Migrate(WriteArgs),
}

/// Where to read chain state from.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// RPC URL for the target chain (can also use ETH_RPC_URL env var)
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Chain the tCDP is deployed on (mainnet, rinkeby, or a chain id)
    #[arg(long, default_value = "mainnet")]
    pub chain: NetworkArg,
}

/// How to sign and whether to send.
#[derive(Args, Debug)]
pub struct SignerArgs {
    /// Private key for signing transactions (can also use PRIVATE_KEY env var)
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Print the transaction instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Account whose balances to show
    #[arg(long)]
    pub account: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DepositArgs {
    /// Ether to deposit in human-readable units (e.g., "1.5"), or "max"
    pub amount: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub signer: SignerArgs,
}

#[derive(Parser, Debug)]
pub struct WithdrawArgs {
    /// tCDP to burn in human-readable units (e.g., "0.25"), or "max"
    pub amount: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub signer: SignerArgs,
}

#[derive(Parser, Debug)]
pub struct ApproveArgs {
    /// DAI allowance in human-readable units (default: unlimited)
    #[arg(long)]
    pub amount: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub signer: SignerArgs,
}

#[derive(Parser, Debug)]
pub struct WriteArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub signer: SignerArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Wrapper for Network that parses names, aliases and chain ids
#[derive(Clone, Copy, Debug)]
pub struct NetworkArg(pub Network);

impl FromStr for NetworkArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Network>()
            .map(NetworkArg)
            .map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for NetworkArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_network_arg_parses_aliases() {
        assert_eq!("rinkeby".parse::<NetworkArg>().unwrap().0, Network::Rinkeby);
        assert_eq!("1".parse::<NetworkArg>().unwrap().0, Network::Mainnet);
        assert!("polygon".parse::<NetworkArg>().is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from([
            "tcdp",
            "-vv",
            "status",
            "--rpc-url",
            "http://localhost:8545",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Table);
    }
}
