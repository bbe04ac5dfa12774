//! Known networks and per-chain contract addresses.
//!
//! Every address can be overridden through the environment with
//! `TCDP_ADDRESS_<chainId>_<NAME>`, where `NAME` is one of `DAI`, `TCDP`,
//! `FLASH_MIGRATOR` or `SOLO_MARGIN`. An empty variable counts as unset.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{address, Address};

use crate::error::{ContractError, Result};

/// Networks the front end knows how to name and link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    Kovan,
}

impl Network {
    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Ropsten => 3,
            Network::Rinkeby => 4,
            Network::Goerli => 5,
            Network::Kovan => 42,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            1 => Some(Network::Mainnet),
            3 => Some(Network::Ropsten),
            4 => Some(Network::Rinkeby),
            5 => Some(Network::Goerli),
            42 => Some(Network::Kovan),
            _ => None,
        }
    }

    /// Display name, e.g. "Main Network".
    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "Main Network",
            Network::Ropsten => "Ropsten",
            Network::Rinkeby => "Rinkeby",
            Network::Goerli => "Görli",
            Network::Kovan => "Kovan",
        }
    }

    fn explorer_base(self) -> &'static str {
        match self {
            Network::Mainnet => "https://etherscan.io",
            Network::Ropsten => "https://ropsten.etherscan.io",
            Network::Rinkeby => "https://rinkeby.etherscan.io",
            Network::Goerli => "https://goerli.etherscan.io",
            Network::Kovan => "https://kovan.etherscan.io",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Network {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        let network = match s.to_lowercase().as_str() {
            "mainnet" | "ethereum" | "eth" | "1" => Network::Mainnet,
            "ropsten" | "3" => Network::Ropsten,
            "rinkeby" | "4" => Network::Rinkeby,
            "goerli" | "gorli" | "görli" | "5" => Network::Goerli,
            "kovan" | "42" => Network::Kovan,
            _ => return Err(ContractError::UnsupportedChain(s.to_string())),
        };
        Ok(network)
    }
}

/// What an explorer link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerTarget {
    Transaction,
    Address,
}

/// Block-explorer link for a transaction hash or address. Unknown chains link to mainnet.
pub fn explorer_link(chain_id: u64, data: &str, target: ExplorerTarget) -> String {
    let base = Network::from_chain_id(chain_id)
        .unwrap_or(Network::Mainnet)
        .explorer_base();
    match target {
        ExplorerTarget::Transaction => format!("{base}/tx/{data}"),
        ExplorerTarget::Address => format!("{base}/address/{data}"),
    }
}

/// Contract addresses for one chain. Missing entries are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub chain_id: u64,
    pub dai: Option<Address>,
    pub tcdp: Option<Address>,
    pub flash_migrator: Option<Address>,
    pub solo_margin: Option<Address>,
}

impl Deployment {
    /// Built-in addresses for a chain, without environment overrides.
    pub fn builtin(chain_id: u64) -> Result<Self> {
        match chain_id {
            1 => Ok(Self {
                chain_id,
                dai: Some(address!("6b175474e89094c44da98b954eedeac495271d0f")),
                tcdp: Some(address!("da4C9Ee8373Fd1095379a3Dd457A0c78968aAF03")),
                flash_migrator: Some(address!("228679770b2d8a281a466765ba55e0dfd8441ae6")),
                solo_margin: Some(address!("1E0447b19BB6EcFdAe1e4AE1694b0C3659614e4e")),
            }),
            4 => Ok(Self {
                chain_id,
                dai: Some(address!("5592ec0cfb4dbc12d3ab100b257153436a1f0fea")),
                tcdp: Some(address!("ae5e23e7c1820E10c8aB850B456D36aED6225bff")),
                flash_migrator: None,
                solo_margin: None,
            }),
            other => Err(ContractError::UnsupportedChain(other.to_string())),
        }
    }

    /// Built-in addresses with `TCDP_ADDRESS_*` overrides from the process environment.
    pub fn for_chain(chain_id: u64) -> Result<Self> {
        Self::builtin(chain_id)?.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let chain_id = self.chain_id;
        let read = |name: &str| -> Result<Option<Address>> {
            let key = format!("TCDP_ADDRESS_{chain_id}_{name}");
            match lookup(&key).filter(|value| !value.trim().is_empty()) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ContractError::InvalidAddress(format!("{key}={value}"))),
                None => Ok(None),
            }
        };

        if let Some(dai) = read("DAI")? {
            self.dai = Some(dai);
        }
        if let Some(tcdp) = read("TCDP")? {
            self.tcdp = Some(tcdp);
        }
        if let Some(migrator) = read("FLASH_MIGRATOR")? {
            self.flash_migrator = Some(migrator);
        }
        if let Some(solo) = read("SOLO_MARGIN")? {
            self.solo_margin = Some(solo);
        }
        Ok(self)
    }

    pub fn network(&self) -> Option<Network> {
        Network::from_chain_id(self.chain_id)
    }

    pub fn tcdp_address(&self) -> Result<Address> {
        self.tcdp.ok_or(ContractError::MissingAddress("tCDP"))
    }

    pub fn dai_address(&self) -> Result<Address> {
        self.dai.ok_or(ContractError::MissingAddress("DAI"))
    }

    pub fn flash_migrator_address(&self) -> Result<Address> {
        self.flash_migrator
            .ok_or(ContractError::MissingAddress("flash migrator"))
    }

    pub fn solo_margin_address(&self) -> Result<Address> {
        self.solo_margin
            .ok_or(ContractError::MissingAddress("solo margin"))
    }
}
