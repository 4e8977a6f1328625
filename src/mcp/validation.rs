//! JSON schema validation for incoming MCP messages.
//!
//! The server only ever receives requests and notifications; responses
//! arriving from a client are rejected as invalid traffic.

use crate::mcp::protocol::*;
use anyhow::{Result, anyhow};
use jsonschema::{Draft, JSONSchema};
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::debug;

/// Validator for the message shapes this server accepts.
#[derive(Debug)]
pub struct McpValidator {
    schemas: HashMap<String, JSONSchema>,
}

impl McpValidator {
    #[inline]
    pub fn new() -> Result<Self> {
        let mut validator = Self {
            schemas: HashMap::new(),
        };

        validator.load_builtin_schemas()?;

        Ok(validator)
    }

    fn load_builtin_schemas(&mut self) -> Result<()> {
        let request_schema = json!({
            "type": "object",
            "properties": {
                "jsonrpc": {
                    "type": "string",
                    "const": "2.0"
                },
                "method": {"type": "string"},
                "params": {},
                "id": {
                    "oneOf": [
                        {"type": "string"},
                        {"type": "integer"}
                    ]
                }
            },
            "required": ["jsonrpc", "method", "id"]
        });
        self.add_schema("jsonrpc_request", &request_schema)?;

        let notification_schema = json!({
            "type": "object",
            "properties": {
                "jsonrpc": {
                    "type": "string",
                    "const": "2.0"
                },
                "method": {"type": "string"},
                "params": {}
            },
            "required": ["jsonrpc", "method"]
        });
        self.add_schema("jsonrpc_notification", &notification_schema)?;

        let initialize_schema = json!({
            "type": "object",
            "properties": {
                "protocolVersion": {"type": "string"},
                "capabilities": {"type": "object"},
                "clientInfo": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "version": {"type": "string"}
                    },
                    "required": ["name", "version"]
                }
            },
            "required": ["protocolVersion", "capabilities", "clientInfo"]
        });
        self.add_schema("initialize_params", &initialize_schema)?;

        let tool_call_schema = json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "arguments": {"type": "object"}
            },
            "required": ["name"]
        });
        self.add_schema("call_tool_params", &tool_call_schema)?;

        debug!("Loaded {} built-in JSON schemas", self.schemas.len());
        Ok(())
    }

    fn add_schema(&mut self, name: &str, schema: &Value) -> Result<()> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| anyhow!("Failed to compile schema '{}': {}", name, e))?;

        self.schemas.insert(name.to_string(), compiled);
        Ok(())
    }

    /// Validate a JSON-RPC request, including method-specific parameters.
    #[inline]
    pub fn validate_request(&self, request: &JsonRpcRequest) -> Result<()> {
        let request_value = serde_json::to_value(request)?;
        self.validate_with_schema("jsonrpc_request", &request_value)?;

        if let Some(params) = &request.params {
            self.validate_method_params(&request.method, params)?;
        }

        Ok(())
    }

    /// Validate a JSON-RPC notification.
    #[inline]
    pub fn validate_notification(&self, notification: &JsonRpcNotification) -> Result<()> {
        let notification_value = serde_json::to_value(notification)?;
        self.validate_with_schema("jsonrpc_notification", &notification_value)
    }

    fn validate_method_params(&self, method: &str, params: &Value) -> Result<()> {
        let schema_name = match method {
            "initialize" => "initialize_params",
            "tools/call" => "call_tool_params",
            _ => {
                // Unknown methods get no parameter validation; the server
                // answers them with method-not-found anyway.
                debug!("No parameter validation schema for method: {}", method);
                return Ok(());
            }
        };

        self.validate_with_schema(schema_name, params)
    }

    /// Validate a value against a named schema
    #[inline]
    pub fn validate_with_schema(&self, schema_name: &str, value: &Value) -> Result<()> {
        let schema = self
            .schemas
            .get(schema_name)
            .ok_or_else(|| anyhow!("Schema '{}' not found", schema_name))?;

        let validation_result = schema.validate(value);
        if let Err(errors) = validation_result {
            let error_messages: Vec<String> = errors
                .into_iter()
                .map(|e| format!("{}:{}", e.instance_path, e))
                .collect();

            return Err(anyhow!(
                "Schema validation failed for '{}': {}",
                schema_name,
                error_messages.join(", ")
            ));
        }

        Ok(())
    }

    /// Validate a raw JSON value as an incoming message. Requests are tried
    /// first; a message carrying an `id` is never a notification.
    #[inline]
    pub fn validate_incoming(&self, value: &Value) -> Result<JsonRpcMessage> {
        if let Ok(request) = serde_json::from_value::<JsonRpcRequest>(value.clone()) {
            self.validate_request(&request)?;
            return Ok(JsonRpcMessage::Request(request));
        }

        if let Ok(notification) = serde_json::from_value::<JsonRpcNotification>(value.clone()) {
            self.validate_notification(&notification)?;
            return Ok(JsonRpcMessage::Notification(notification));
        }

        Err(anyhow!(
            "Value is not a JSON-RPC request or notification"
        ))
    }

    /// Check if a protocol version is supported
    #[inline]
    pub fn is_protocol_version_supported(&self, version: &str) -> bool {
        version == MCP_VERSION
    }

    /// Get supported protocol versions
    #[inline]
    pub fn supported_protocol_versions(&self) -> Vec<&'static str> {
        vec![MCP_VERSION]
    }
}
