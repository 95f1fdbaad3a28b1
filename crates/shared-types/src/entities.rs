//! # Core Wire Entities
//!
//! Addresses, signatures, instructions and transactions exchanged between the
//! client and the local cluster.
//!
//! ## Clusters
//!
//! - **Identity**: `Pubkey`, `TxSignature`, `Discriminator`
//! - **Invocation**: `AccountMeta`, `Instruction`
//! - **Transport**: `Message`, `Transaction`

use crate::errors::WireError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// An 8-byte type tag prefixed to instruction data, account data and events.
pub type Discriminator = [u8; 8];

/// Computes the discriminator for `name` in `namespace`.
///
/// The tag is the first 8 bytes of `sha256("<namespace>:<name>")`, where the
/// namespace is `global` for instructions, `account` for accounts and `event`
/// for events.
pub fn discriminator(namespace: &str, name: &str) -> Discriminator {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// A 32-byte account or program address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey(pub [u8; 32]);

impl Pubkey {
    /// Length in bytes.
    pub const LEN: usize = 32;

    /// Creates a key from a 32-byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a key from a slice. Returns None if wrong length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Returns the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns a key that is unique within this process.
    ///
    /// Used for fixtures; real keys come from keypairs.
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        bytes[0] = 0xfe;
        Self(bytes)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", hex::encode(&self.0[..4]))
    }
}

impl FromStr for Pubkey {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes).ok_or(WireError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            // Raw 32-byte tuple, no length prefix.
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

/// A 64-byte transaction signature.
///
/// This is the fee payer's ed25519 signature over the encoded message, so it
/// doubles as the transaction's identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxSignature(pub [u8; 64]);

impl TxSignature {
    /// Length in bytes.
    pub const LEN: usize = 64;

    /// Creates a signature from a 64-byte array.
    pub const fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Creates a signature from a slice. Returns None if wrong length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 64] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Returns the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Display for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxSignature({}..)", hex::encode(&self.0[..8]))
    }
}

impl FromStr for TxSignature {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes).ok_or(WireError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })
    }
}

impl Serialize for TxSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for TxSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SignatureVisitor;

        impl<'de> de::Visitor<'de> for SignatureVisitor {
            type Value = TxSignature;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 64-byte signature or its hex string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<TxSignature, E> {
                value.parse().map_err(E::custom)
            }

            fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<TxSignature, E> {
                TxSignature::from_slice(value).ok_or_else(|| E::invalid_length(value.len(), &self))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<TxSignature, A::Error> {
                let mut bytes = Vec::with_capacity(TxSignature::LEN);
                while let Some(b) = seq.next_element::<u8>()? {
                    bytes.push(b);
                }
                TxSignature::from_slice(&bytes)
                    .ok_or_else(|| de::Error::invalid_length(bytes.len(), &self))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(SignatureVisitor)
        } else {
            deserializer.deserialize_bytes(SignatureVisitor)
        }
    }
}

// =============================================================================
// CLUSTER B: INVOCATION
// =============================================================================

/// An account referenced by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    /// Account address.
    pub pubkey: Pubkey,
    /// Whether the transaction must carry this account's signature.
    pub is_signer: bool,
    /// Whether the instruction may modify this account.
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account.
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// A single call into a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Program to invoke.
    pub program_id: Pubkey,
    /// Accounts in the order the program expects them.
    pub accounts: Vec<AccountMeta>,
    /// Discriminator followed by the encoded arguments.
    pub data: Vec<u8>,
}

impl Instruction {
    /// Returns the 8-byte discriminator, if the data is long enough.
    pub fn discriminator(&self) -> Option<Discriminator> {
        self.data.get(..8).and_then(|d| d.try_into().ok())
    }
}

// =============================================================================
// CLUSTER C: TRANSPORT
// =============================================================================

/// The signed part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Account paying for the transaction; always the first signer.
    pub fee_payer: Pubkey,
    /// Random value making otherwise identical messages distinct.
    pub nonce: u64,
    /// Instructions executed in order, atomically.
    pub instructions: Vec<Instruction>,
}

impl Message {
    /// Keys whose signatures the transaction must carry, in signing order.
    ///
    /// The fee payer comes first, followed by every signer account referenced
    /// by the instructions, without duplicates.
    pub fn signer_keys(&self) -> Vec<Pubkey> {
        let mut keys = vec![self.fee_payer];
        for meta in self.instructions.iter().flat_map(|ix| ix.accounts.iter()) {
            if meta.is_signer && !keys.contains(&meta.pubkey) {
                keys.push(meta.pubkey);
            }
        }
        keys
    }

    /// Bytes covered by the signatures.
    pub fn serialize(&self) -> Result<Vec<u8>, WireError> {
        bincode::serialize(self).map_err(|e| WireError::Encode(e.to_string()))
    }
}

/// A message together with its signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// One signature per entry of `message.signer_keys()`, same order.
    pub signatures: Vec<TxSignature>,
    /// The signed message.
    pub message: Message,
}

impl Transaction {
    /// The transaction identifier (the fee payer's signature).
    pub fn signature(&self) -> Option<&TxSignature> {
        self.signatures.first()
    }

    /// Encodes the transaction as the hex text sent over RPC.
    pub fn to_wire(&self) -> Result<String, WireError> {
        let bytes = bincode::serialize(self).map_err(|e| WireError::Encode(e.to_string()))?;
        Ok(hex::encode(bytes))
    }

    /// Decodes a transaction from its RPC text form.
    pub fn from_wire(text: &str) -> Result<Self, WireError> {
        let bytes = hex::decode(text)?;
        bincode::deserialize(&bytes).map_err(|e| WireError::Decode(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
