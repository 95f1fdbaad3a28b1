//! Localnet error types with JSON-RPC 2.0 error codes.
//!
//! Transaction failures use the server-error range the way public clusters
//! report them, so clients written against a real cluster read them unchanged.

use serde::Serialize;
use std::fmt;

/// JSON-RPC error codes
pub mod codes {
    // JSON-RPC 2.0 standard errors (-32700 to -32600)
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;

    // Cluster errors (-32000 to -32099)
    pub const TRANSACTION_SIMULATION_FAILED: i32 = -32002;
    pub const SIGNATURE_VERIFICATION_FAILURE: i32 = -32003;
    pub const LIMIT_EXCEEDED: i32 = -32005;
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// JSON-RPC error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Optional additional data
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create error with additional data
    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Parse error - invalid JSON
    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(
            codes::PARSE_ERROR,
            format!("Parse error: {}", details.into()),
        )
    }

    /// Invalid request - not a valid JSON-RPC request
    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_REQUEST,
            format!("Invalid request: {}", details.into()),
        )
    }

    /// Method not found
    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    /// Invalid parameters
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_PARAMS,
            format!("Invalid params: {}", details.into()),
        )
    }

    /// Limit exceeded (batch size, etc.)
    pub fn limit_exceeded(limit: impl Into<String>) -> Self {
        Self::new(
            codes::LIMIT_EXCEEDED,
            format!("Limit exceeded: {}", limit.into()),
        )
    }

    /// Signatures missing or not valid for the message
    pub fn signature_verification_failure() -> Self {
        Self::new(
            codes::SIGNATURE_VERIFICATION_FAILURE,
            "Transaction signature verification failure",
        )
    }

    /// Transaction executed and failed; nothing was committed
    pub fn simulation_failed(
        err: &crate::domain::ledger::TransactionError,
        logs: &[String],
    ) -> Self {
        Self::with_data(
            codes::TRANSACTION_SIMULATION_FAILED,
            format!("Transaction simulation failed: {}", err),
            serde_json::json!({
                "err": err,
                "logs": logs,
            }),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let len = if self.data.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("ApiError", len)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        if let Some(ref data) = self.data {
            state.serialize_field("data", data)?;
        }
        state.end()
    }
}

impl From<shared_types::WireError> for ApiError {
    fn from(e: shared_types::WireError) -> Self {
        ApiError::invalid_params(e.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Localnet-level errors (not JSON-RPC, internal use)
#[derive(Debug, thiserror::Error)]
pub enum LocalnetError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] crate::domain::config::ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(#[source] std::io::Error),

    /// Writing the IDL failed
    #[error("failed to write IDL to {path}: {reason}")]
    IdlWrite { path: String, reason: String },

    /// Server task failed
    #[error("server error: {0}")]
    Server(String),
}
