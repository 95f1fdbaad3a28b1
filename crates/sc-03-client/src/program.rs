//! Program handles and the IDL-driven method builder.
//!
//! ```ignore
//! let program = workspace.program("Supercollab", provider)?;
//! let signature = program.method("initialize")?.rpc().await?;
//! ```

use crate::coder;
use crate::error::ClientError;
use crate::provider::Provider;
use crate::wallet::Keypair;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::{
    normalize_name, AccountMeta, Idl, IdlInstruction, Instruction, Message, Pubkey, Transaction,
    TxSignature,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A deployed program, described by its IDL and bound to a provider.
#[derive(Debug, Clone)]
pub struct Program {
    idl: Idl,
    provider: Arc<Provider>,
}

impl Program {
    pub fn new(idl: Idl, provider: Arc<Provider>) -> Self {
        Self { idl, provider }
    }

    /// Program address.
    pub fn id(&self) -> Pubkey {
        self.idl.address
    }

    pub fn name(&self) -> &str {
        self.idl.name()
    }

    pub fn idl(&self) -> &Idl {
        &self.idl
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Starts a call to the instruction `name` (case and separators ignored).
    pub fn method(&self, name: &str) -> Result<MethodBuilder<'_>, ClientError> {
        let instruction = self
            .idl
            .instruction(name)
            .ok_or_else(|| ClientError::UnknownMethod {
                program: self.name().to_string(),
                method: name.to_string(),
            })?;
        Ok(MethodBuilder {
            program: self,
            instruction,
            args: Vec::new(),
            accounts: HashMap::new(),
            signers: Vec::new(),
        })
    }

    /// Fetches and decodes an account of the IDL account type `type_name`.
    ///
    /// Returns `None` if the account does not exist.
    pub async fn fetch_account<T: DeserializeOwned>(
        &self,
        type_name: &str,
        address: &Pubkey,
    ) -> Result<Option<T>, ClientError> {
        let key = normalize_name(type_name);
        let account_type = self
            .idl
            .accounts
            .iter()
            .find(|a| normalize_name(&a.name) == key)
            .ok_or_else(|| ClientError::InvalidArguments {
                method: "fetch_account".into(),
                reason: format!("{} has no account type {type_name}", self.name()),
            })?;

        let Some(info) = self.provider.rpc().get_account_info(address).await? else {
            return Ok(None);
        };
        let bytes = info.bytes()?;
        let body = bytes
            .strip_prefix(account_type.discriminator.as_slice())
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!(
                    "account {address} is not a {}",
                    account_type.name
                ))
            })?;
        bincode::deserialize(body)
            .map(Some)
            .map_err(|e| ClientError::InvalidResponse(format!("account {address}: {e}")))
    }
}

/// Accumulates arguments, accounts and signers for one instruction call.
#[derive(Debug)]
pub struct MethodBuilder<'a> {
    program: &'a Program,
    instruction: &'a IdlInstruction,
    args: Vec<Value>,
    /// Keyed by normalized account name.
    accounts: HashMap<String, Pubkey>,
    signers: Vec<Keypair>,
}

impl<'a> MethodBuilder<'a> {
    /// Replaces the positional arguments.
    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Appends one positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Supplies several accounts by IDL name.
    pub fn accounts<'n>(mut self, accounts: impl IntoIterator<Item = (&'n str, Pubkey)>) -> Self {
        for (name, key) in accounts {
            self.accounts.insert(normalize_name(name), key);
        }
        self
    }

    /// Supplies one account by IDL name.
    pub fn account(mut self, name: &str, key: Pubkey) -> Self {
        self.accounts.insert(normalize_name(name), key);
        self
    }

    /// Adds a keypair for a signer account other than the wallet.
    pub fn signer(mut self, keypair: &Keypair) -> Self {
        self.signers.push(keypair.clone());
        self
    }

    pub fn signers(mut self, keypairs: &[Keypair]) -> Self {
        self.signers.extend(keypairs.iter().cloned());
        self
    }

    /// Builds the instruction.
    pub fn instruction(&self) -> Result<Instruction, ClientError> {
        let data = coder::encode_instruction(&self.program.idl, self.instruction, &self.args)
            .map_err(|e| ClientError::InvalidArguments {
                method: self.instruction.name.clone(),
                reason: e.to_string(),
            })?;

        let accounts = self
            .instruction
            .accounts
            .iter()
            .map(|slot| {
                let pubkey = match slot.address {
                    Some(address) => address,
                    None => *self
                        .accounts
                        .get(&normalize_name(&slot.name))
                        .ok_or_else(|| ClientError::MissingAccount(slot.name.clone()))?,
                };
                Ok(AccountMeta {
                    pubkey,
                    is_signer: slot.signer,
                    is_writable: slot.writable,
                })
            })
            .collect::<Result<Vec<_>, ClientError>>()?;

        Ok(Instruction {
            program_id: self.program.id(),
            accounts,
            data,
        })
    }

    /// Builds the transaction, paid for by the provider's wallet and signed by
    /// every key it requires.
    pub fn transaction(&self) -> Result<Transaction, ClientError> {
        let wallet = self.program.provider.wallet();
        let message = Message {
            fee_payer: wallet.pubkey(),
            nonce: rand::random(),
            instructions: vec![self.instruction()?],
        };
        let bytes = message
            .serialize()
            .map_err(|e| ClientError::InvalidArguments {
                method: self.instruction.name.clone(),
                reason: e.to_string(),
            })?;

        let signatures = message
            .signer_keys()
            .into_iter()
            .map(|key| {
                std::iter::once(wallet)
                    .chain(self.signers.iter())
                    .find(|kp| kp.pubkey() == key)
                    .map(|kp| kp.sign_message(&bytes))
                    .ok_or(ClientError::MissingSigner(key))
            })
            .collect::<Result<Vec<_>, ClientError>>()?;

        Ok(Transaction {
            signatures,
            message,
        })
    }

    /// Sends the call once and returns its transaction signature.
    #[instrument(skip_all, fields(program = %self.program.name(), method = %self.instruction.name))]
    pub async fn rpc(self) -> Result<TxSignature, ClientError> {
        let tx = self.transaction()?;
        debug!(signers = tx.signatures.len(), "sending transaction");
        let signature = self.program.provider.send_and_confirm(&tx).await?;
        info!(%signature, "method call committed");
        Ok(signature)
    }
}
