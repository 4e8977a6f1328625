//! MCP (Model Context Protocol) server implementation.
//!
//! JSON-RPC 2.0 over stdio, MCP protocol version 2025-06-18, serving the
//! tools surface only.

pub mod errors;
pub mod protocol;
pub mod server;
pub mod validation;


pub use errors::McpError;
pub use protocol::{CallToolParams, CallToolResult, Tool, ToolContent};
pub use server::{ConnectionState, McpServer, MessageHandler};
pub use validation::McpValidator;
