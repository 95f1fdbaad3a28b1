//! Ed25519 keypairs and the keypair file format.
//!
//! A keypair file is a JSON array of 64 numbers: the 32-byte secret key
//! followed by the 32-byte public key.

use crate::error::ClientError;
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use shared_types::{Pubkey, TxSignature};
use std::fmt;
use std::fs;
use std::path::Path;

/// A signing keypair.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generates a fresh random keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Builds a keypair from its 64-byte form. The public half must match the
    /// secret half.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClientError> {
        let bytes: &[u8; 64] = bytes.try_into().map_err(|_| {
            ClientError::Wallet(format!("keypair must be 64 bytes, got {}", bytes.len()))
        })?;
        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| ClientError::Wallet(format!("invalid keypair: {e}")))?;
        Ok(Self { signing_key })
    }

    /// Secret key followed by public key.
    pub fn to_bytes(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }

    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Signs `message`.
    pub fn sign_message(&self, message: &[u8]) -> TxSignature {
        TxSignature::new(self.signing_key.sign(message).to_bytes())
    }

    /// Reads a keypair file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ClientError::Wallet(format!("{}: {e}", path.display())))?;
        let bytes: Vec<u8> = serde_json::from_str(&text)
            .map_err(|e| ClientError::Wallet(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes)
    }

    /// Writes a keypair file, creating parent directories.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), ClientError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ClientError::Wallet(format!("{}: {e}", parent.display())))?;
        }
        let text = serde_json::to_string(&self.to_bytes().to_vec())
            .map_err(|e| ClientError::Wallet(e.to_string()))?;
        fs::write(path, text).map_err(|e| ClientError::Wallet(format!("{}: {e}", path.display())))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .field("secret", &"<redacted>")
            .finish()
    }
}
