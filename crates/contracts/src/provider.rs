//! Provider construction for the chain client.

use alloy::{
    network::EthereumWallet,
    providers::{DynProvider, Provider, ProviderBuilder},
};

use crate::error::{ContractError, Result};

/// The provider type used by the chain client, with the wallet filler erased from the type.
pub type HttpProvider = DynProvider;

fn parse_url(rpc_url: &str) -> Result<url::Url> {
    rpc_url
        .parse()
        .map_err(|e| ContractError::RpcConnection(format!("{}", e)))
}

/// Connects an HTTP provider that signs with `wallet`.
pub fn signing_provider(rpc_url: &str, wallet: EthereumWallet) -> Result<HttpProvider> {
    let url = parse_url(rpc_url)?;
    Ok(ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(url)
        .erased())
}

/// Connects an HTTP provider for view calls only.
pub fn read_only_provider(rpc_url: &str) -> Result<HttpProvider> {
    let url = parse_url(rpc_url)?;
    Ok(ProviderBuilder::new().connect_http(url).erased())
}
