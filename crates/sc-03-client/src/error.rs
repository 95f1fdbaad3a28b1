//! Client error types.

use serde_json::Value;
use shared_types::Pubkey;
use thiserror::Error;

/// Errors returned by the client SDK.
///
/// `Transport`, `Rpc` and `InvalidResponse` together form the "remote call
/// failed" category; see [`ClientError::is_remote_call_failure`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Provider configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Keypair file could not be read, parsed or written.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// IDL directory could not be read or holds an invalid IDL.
    #[error("workspace error: {0}")]
    Workspace(String),

    /// No IDL in the workspace matches the name.
    #[error("program not found in workspace: {0}")]
    ProgramNotFound(String),

    /// The program's IDL has no such instruction.
    #[error("program {program} has no method {method}")]
    UnknownMethod { program: String, method: String },

    /// Arguments do not match the instruction's IDL types.
    #[error("invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },

    /// An account the instruction needs was not supplied.
    #[error("missing account: {0}")]
    MissingAccount(String),

    /// A signer account has no keypair to sign with.
    #[error("missing signer: {0}")]
    MissingSigner(Pubkey),

    /// HTTP request failed or timed out.
    #[error("transport error: {0}")]
    Transport(String),

    /// The cluster answered with a JSON-RPC error.
    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    /// The cluster's answer was not a valid JSON-RPC response.
    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Whether the error came from talking to the cluster.
    pub fn is_remote_call_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Rpc { .. } | Self::InvalidResponse(_)
        )
    }

    /// Custom program error code carried by a failed transaction.
    ///
    /// Reads `data.err = {"InstructionError": [index, {"Custom": code}]}`.
    pub fn custom_program_error(&self) -> Option<u32> {
        let Self::Rpc {
            data: Some(data), ..
        } = self
        else {
            return None;
        };
        data.get("err")?
            .get("InstructionError")?
            .get(1)?
            .get("Custom")?
            .as_u64()
            .and_then(|c| u32::try_from(c).ok())
    }

    /// Program logs attached to a failed transaction.
    pub fn logs(&self) -> Option<Vec<String>> {
        let Self::Rpc {
            data: Some(data), ..
        } = self
        else {
            return None;
        };
        serde_json::from_value(data.get("logs")?.clone()).ok()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
