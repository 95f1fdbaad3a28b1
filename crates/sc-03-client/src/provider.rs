//! Provider: a cluster connection plus the wallet that pays for and signs
//! transactions.

use crate::config::{Commitment, ProviderConfig};
use crate::error::ClientError;
use crate::rpc::RpcClient;
use crate::wallet::Keypair;
use shared_types::{Transaction, TxSignature};
use tracing::{debug, instrument};

/// Connection settings, payer wallet and RPC client, passed explicitly to
/// every program handle.
#[derive(Debug)]
pub struct Provider {
    config: ProviderConfig,
    wallet: Keypair,
    rpc: RpcClient,
}

impl Provider {
    /// Builds a provider from a validated config and an already loaded wallet.
    pub fn new(config: ProviderConfig, wallet: Keypair) -> Result<Self, ClientError> {
        config.validate()?;
        let rpc = RpcClient::new(config.url.clone(), config.timeout)?;
        Ok(Self {
            config,
            wallet,
            rpc,
        })
    }

    /// Builds a provider, loading the wallet from `config.wallet_path`.
    pub fn from_config(config: ProviderConfig) -> Result<Self, ClientError> {
        let wallet = Keypair::read_file(&config.wallet_path)?;
        Self::new(config, wallet)
    }

    /// Builds a provider from the `ANCHOR_*` environment variables.
    pub fn env() -> Result<Self, ClientError> {
        Self::from_config(ProviderConfig::from_env()?)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Fee payer.
    pub fn wallet(&self) -> &Keypair {
        &self.wallet
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    pub fn commitment(&self) -> Commitment {
        self.config.commitment
    }

    /// Submits `tx` with a single `sendTransaction` call.
    ///
    /// The cluster executes the transaction before answering, so a returned
    /// signature means the transaction committed. Failures are returned as-is.
    #[instrument(skip_all, fields(url = %self.config.url))]
    pub async fn send_and_confirm(&self, tx: &Transaction) -> Result<TxSignature, ClientError> {
        let signature = self.rpc.send_transaction(tx).await?;
        if tx.signature() != Some(&signature) {
            return Err(ClientError::InvalidResponse(format!(
                "cluster returned signature {signature} for a different transaction"
            )));
        }
        debug!(%signature, "transaction committed");
        Ok(signature)
    }

    /// Whether `signature` has reached the provider's commitment level, using
    /// one `getSignatureStatuses` call.
    pub async fn confirm_transaction(&self, signature: &TxSignature) -> Result<bool, ClientError> {
        let statuses = self
            .rpc
            .get_signature_statuses(std::slice::from_ref(signature))
            .await?;
        Ok(statuses
            .first()
            .and_then(Option::as_ref)
            .is_some_and(|status| status.satisfies(self.commitment())))
    }
}
