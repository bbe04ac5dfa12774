//! Chain client for a tokenized CDP deployment.
//!
//! [`TcdpClient`] reads position, balance and rate state from the tCDP, DAI and the
//! node, and builds or sends the write operations the engine recommends. It implements
//! both engine collaborator traits.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    sol_types::SolCall,
};
use tcdp_rs_engine::{
    AccountSnapshotData, ChainError, Operation, OperationSubmitter, PositionSnapshot, Protocol,
    RateSnapshot, Snapshot, SnapshotReader, TxOutcome,
};
use tracing::{debug, info, warn};

use crate::deployment::Deployment;
use crate::erc20::IERC20;
use crate::error::{ContractError, Result};
use crate::prepared_call::PreparedCall;
use crate::provider::{read_only_provider, signing_provider, HttpProvider};
use crate::tcdp::{IFlashMigrator, ITokenizedCdp};

/// Target, calldata and value of a write, without sending it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl<C: SolCall> From<PreparedCall<'_, C>> for EncodedCall {
    fn from(prepared: PreparedCall<'_, C>) -> Self {
        let data = Bytes::from(prepared.calldata());
        let value = prepared.value();
        let (to, _) = prepared.prepare();
        Self { to, data, value }
    }
}

/// Which of the four APR getters to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    CompoundDai,
    CompoundEth,
    AaveDai,
    AaveEth,
}

/// Client for reading from and writing to one tCDP deployment.
pub struct TcdpClient {
    provider: HttpProvider,
    signer_address: Option<Address>,
    deployment: Deployment,
}

impl TcdpClient {
    /// Create a client that can sign and send transactions.
    pub fn new(rpc_url: &str, private_key: &str, deployment: Deployment) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|_| ContractError::InvalidPrivateKey)?;
        let signer_address = signer.address();
        let provider = signing_provider(rpc_url, EthereumWallet::from(signer))?;

        Ok(Self {
            provider,
            signer_address: Some(signer_address),
            deployment,
        })
    }

    /// Create a client for view calls only.
    pub fn read_only(rpc_url: &str, deployment: Deployment) -> Result<Self> {
        Ok(Self {
            provider: read_only_provider(rpc_url)?,
            signer_address: None,
            deployment,
        })
    }

    /// Address transactions are sent from, if the client can sign.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer_address
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Chain id reported by the node.
    pub async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ContractError::RpcConnection(format!("Failed to get chain id: {}", e)))
    }

    fn tcdp(&self) -> Result<ITokenizedCdp::ITokenizedCdpInstance<&HttpProvider>> {
        Ok(ITokenizedCdp::new(
            self.deployment.tcdp_address()?,
            &self.provider,
        ))
    }

    fn dai(&self) -> Result<IERC20::IERC20Instance<&HttpProvider>> {
        Ok(IERC20::new(self.deployment.dai_address()?, &self.provider))
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Ether locked in the pooled position.
    pub async fn collateral(&self) -> Result<U256> {
        self.tcdp()?.collateral().call().await.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get collateral: {}", e))
        })
    }

    /// DAI owed by the pooled position.
    pub async fn debt(&self) -> Result<U256> {
        self.tcdp()?
            .debt()
            .call()
            .await
            .map_err(|e| ContractError::TransactionFailed(format!("Failed to get debt: {}", e)))
    }

    pub async fn total_supply(&self) -> Result<U256> {
        self.tcdp()?.totalSupply().call().await.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get total supply: {}", e))
        })
    }

    /// tCDP balance of `owner`.
    pub async fn token_balance(&self, owner: Address) -> Result<U256> {
        self.tcdp()?.balanceOf(owner).call().await.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get tCDP balance: {}", e))
        })
    }

    /// Active lending back-end.
    pub async fn protocol(&self) -> Result<Protocol> {
        let is_compound = self.tcdp()?.isCompound().call().await.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get protocol: {}", e))
        })?;
        Ok(Protocol::from_is_compound(is_compound))
    }

    /// Oracle price of DAI in ether.
    pub async fn underlying_price(&self) -> Result<U256> {
        self.tcdp()?.getUnderlyingPrice().call().await.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get underlying price: {}", e))
        })
    }

    pub async fn rate(&self, kind: RateKind) -> Result<U256> {
        let tcdp = self.tcdp()?;
        let result = match kind {
            RateKind::CompoundDai => tcdp.CompoundDaiAPR().call().await,
            RateKind::CompoundEth => tcdp.CompoundEthAPR().call().await,
            RateKind::AaveDai => tcdp.AaveDaiAPR().call().await,
            RateKind::AaveEth => tcdp.AaveEthAPR().call().await,
        };
        result.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get {:?} APR: {}", kind, e))
        })
    }

    pub async fn ether_balance(&self, owner: Address) -> Result<U256> {
        self.provider.get_balance(owner).await.map_err(|e| {
            ContractError::RpcConnection(format!("Failed to get ether balance: {}", e))
        })
    }

    pub async fn dai_balance(&self, owner: Address) -> Result<U256> {
        self.dai()?.balanceOf(owner).call().await.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get DAI balance: {}", e))
        })
    }

    /// DAI the tCDP contract may pull from `owner`.
    pub async fn dai_allowance(&self, owner: Address) -> Result<U256> {
        let spender = self.deployment.tcdp_address()?;
        self.dai()?.allowance(owner, spender).call().await.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get DAI allowance: {}", e))
        })
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// First deposit into an empty pool.
    pub fn initiate(
        &self,
        dai_amount: U256,
        value: U256,
    ) -> Result<PreparedCall<'_, ITokenizedCdp::initiateCall>> {
        let call = ITokenizedCdp::initiateCall { amount: dai_amount };
        Ok(PreparedCall::new(
            self.deployment.tcdp_address()?,
            call,
            value,
            &self.provider,
        ))
    }

    pub fn mint(&self, value: U256) -> Result<PreparedCall<'_, ITokenizedCdp::mintCall>> {
        Ok(PreparedCall::new(
            self.deployment.tcdp_address()?,
            ITokenizedCdp::mintCall {},
            value,
            &self.provider,
        ))
    }

    pub fn burn(&self, amount: U256) -> Result<PreparedCall<'_, ITokenizedCdp::burnCall>> {
        Ok(PreparedCall::new(
            self.deployment.tcdp_address()?,
            ITokenizedCdp::burnCall { amount },
            U256::ZERO,
            &self.provider,
        ))
    }

    /// Approve the tCDP contract to pull DAI.
    pub fn approve(&self, amount: U256) -> Result<PreparedCall<'_, IERC20::approveCall>> {
        let call = IERC20::approveCall {
            spender: self.deployment.tcdp_address()?,
            amount,
        };
        Ok(PreparedCall::new(
            self.deployment.dai_address()?,
            call,
            U256::ZERO,
            &self.provider,
        ))
    }

    pub fn leverage(&self) -> Result<PreparedCall<'_, ITokenizedCdp::leverageCall>> {
        Ok(PreparedCall::new(
            self.deployment.tcdp_address()?,
            ITokenizedCdp::leverageCall {},
            U256::ZERO,
            &self.provider,
        ))
    }

    pub fn deleverage(&self) -> Result<PreparedCall<'_, ITokenizedCdp::deleverageCall>> {
        Ok(PreparedCall::new(
            self.deployment.tcdp_address()?,
            ITokenizedCdp::deleverageCall {},
            U256::ZERO,
            &self.provider,
        ))
    }

    /// Move the position to the other back-end through the solo margin flash loan.
    pub fn flash_migrate(&self) -> Result<PreparedCall<'_, IFlashMigrator::flashMigrateCall>> {
        let call = IFlashMigrator::flashMigrateCall {
            soloMargin: self.deployment.solo_margin_address()?,
        };
        Ok(PreparedCall::new(
            self.deployment.flash_migrator_address()?,
            call,
            U256::ZERO,
            &self.provider,
        ))
    }

    /// Target, calldata and value for an operation, for dry runs.
    pub fn encode(&self, operation: &Operation) -> Result<EncodedCall> {
        let encoded = match *operation {
            Operation::Initiate { dai_amount, value } => self.initiate(dai_amount, value)?.into(),
            Operation::Mint { value } => self.mint(value)?.into(),
            Operation::Burn { amount } => self.burn(amount)?.into(),
            Operation::Approve { amount } => self.approve(amount)?.into(),
            Operation::Leverage => self.leverage()?.into(),
            Operation::Deleverage => self.deleverage()?.into(),
            Operation::FlashMigrate => self.flash_migrate()?.into(),
        };
        Ok(encoded)
    }

    /// Sends an operation and waits for it to be mined.
    pub async fn execute(&self, operation: &Operation) -> Result<TransactionReceipt> {
        if self.signer_address.is_none() {
            return Err(ContractError::NoSigner);
        }
        info!(%operation, "submitting operation");

        match *operation {
            Operation::Initiate { dai_amount, value } => {
                self.initiate(dai_amount, value)?.send().await
            }
            Operation::Mint { value } => self.mint(value)?.send().await,
            Operation::Burn { amount } => self.burn(amount)?.send().await,
            Operation::Approve { amount } => self.approve(amount)?.send().await,
            Operation::Leverage => self.leverage()?.send().await,
            Operation::Deleverage => self.deleverage()?.send().await,
            Operation::FlashMigrate => self.flash_migrate()?.send().await,
        }
    }
}

/// Keeps a successful read, or logs the failure and marks the field unavailable.
fn available<T>(field: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(field, %error, "read failed, marking unavailable");
            None
        }
    }
}

impl SnapshotReader for TcdpClient {
    async fn read_snapshot(&self, account: Address) -> std::result::Result<Snapshot, ChainError> {
        let (
            protocol,
            collateral,
            debt,
            total_supply,
            underlying_price,
            ether_balance,
            token_balance,
            dai_balance,
            dai_allowance,
            compound_dai_apr,
            compound_eth_apr,
            aave_dai_apr,
            aave_eth_apr,
        ) = futures::join!(
            self.protocol(),
            self.collateral(),
            self.debt(),
            self.total_supply(),
            self.underlying_price(),
            self.ether_balance(account),
            self.token_balance(account),
            self.dai_balance(account),
            self.dai_allowance(account),
            self.rate(RateKind::CompoundDai),
            self.rate(RateKind::CompoundEth),
            self.rate(RateKind::AaveDai),
            self.rate(RateKind::AaveEth),
        );

        let snapshot = Snapshot {
            protocol: available("isCompound", protocol),
            position: PositionSnapshot {
                collateral: available("collateral", collateral),
                debt: available("debt", debt),
                total_supply: available("totalSupply", total_supply),
                underlying_price: available("underlyingPrice", underlying_price),
            },
            account: AccountSnapshotData {
                ether_balance: available("etherBalance", ether_balance),
                token_balance: available("tokenBalance", token_balance),
                dai_balance: available("daiBalance", dai_balance),
                dai_allowance: available("daiAllowance", dai_allowance),
            },
            rates: RateSnapshot {
                compound_dai_apr: available("CompoundDaiAPR", compound_dai_apr),
                compound_eth_apr: available("CompoundEthAPR", compound_eth_apr),
                aave_dai_apr: available("AaveDaiAPR", aave_dai_apr),
                aave_eth_apr: available("AaveEthAPR", aave_eth_apr),
            },
        };

        if snapshot == Snapshot::default() {
            return Err(ChainError::Network(format!(
                "no state could be read for {}",
                account
            )));
        }

        debug!(%account, ?snapshot, "read snapshot");
        Ok(snapshot)
    }
}

impl OperationSubmitter for TcdpClient {
    async fn submit(&self, operation: &Operation) -> std::result::Result<TxOutcome, ChainError> {
        let receipt = self.execute(operation).await?;
        Ok(TxOutcome {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }
}
