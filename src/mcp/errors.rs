//! MCP protocol error handling.
//!
//! These are protocol-level faults: malformed framing, unknown methods, bad
//! protocol versions. Tool-domain failures never appear here; they travel
//! in-band inside a successful `tools/call` response.

use crate::mcp::protocol::*;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum McpError {
    #[error("Protocol version not supported: {version}. Supported versions: {supported:?}")]
    UnsupportedProtocolVersion {
        version: String,
        supported: Vec<String>,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },

    #[error("JSON-RPC parse error: {message}")]
    ParseError { message: String },

    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    #[error("Invalid parameters: {message}")]
    InvalidParameters { message: String },
}

impl McpError {
    /// Convert to a JSON-RPC error object
    #[inline]
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            Self::UnsupportedProtocolVersion { version, supported } => JsonRpcError::new(
                mcp_error_codes::INVALID_PROTOCOL_VERSION,
                format!(
                    "Unsupported protocol version: {}. Supported: {}",
                    version,
                    supported.join(", ")
                ),
                None,
            ),
            Self::InvalidRequest { message } => {
                JsonRpcError::new(error_codes::INVALID_REQUEST, message.clone(), None)
            }
            Self::InternalError { message } => {
                JsonRpcError::new(error_codes::INTERNAL_ERROR, message.clone(), None)
            }
            Self::ParseError { message } => {
                JsonRpcError::new(error_codes::PARSE_ERROR, message.clone(), None)
            }
            Self::MethodNotFound { method } => JsonRpcError::new(
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
                None,
            ),
            Self::InvalidParameters { message } => {
                JsonRpcError::new(error_codes::INVALID_PARAMS, message.clone(), None)
            }
        }
    }

    /// Create the error response message
    #[inline]
    pub fn to_error_response(&self, id: Option<RequestId>) -> JsonRpcMessage {
        let error = self.to_jsonrpc_error();
        let error_response = JsonRpcErrorResponse::new(error, id);
        JsonRpcMessage::ErrorResponse(error_response)
    }

    /// Log the error with appropriate context
    #[inline]
    pub fn log(&self) {
        match self {
            Self::ParseError { .. }
            | Self::InvalidRequest { .. }
            | Self::InvalidParameters { .. }
            | Self::MethodNotFound { .. } => {
                error!("Client error: {}", self);
            }
            Self::UnsupportedProtocolVersion { .. } | Self::InternalError { .. } => {
                error!("Server error: {}", self);
            }
        }
    }
}

impl From<serde_json::Error> for McpError {
    #[inline]
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError {
            message: error.to_string(),
        }
    }
}

impl From<anyhow::Error> for McpError {
    #[inline]
    fn from(error: anyhow::Error) -> Self {
        Self::InternalError {
            message: error.to_string(),
        }
    }
}
