//! MCP server over stdio.
//!
//! Line-delimited JSON-RPC 2.0 on stdin/stdout. The server owns no tool
//! state of its own; `tools/list` and `tools/call` are both answered from
//! the shared [`ToolRegistry`], so the tool pipeline exists exactly once.

use crate::mcp::errors::McpError;
use crate::mcp::protocol::*;
use crate::mcp::validation::McpValidator;
use crate::tools::ToolRegistry;
use anyhow::{Result, anyhow};
use serde_json::Value;
use std::sync::Arc;
use tokio::io;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// MCP server state and configuration
pub struct McpServer {
    /// Server implementation information
    pub server_info: Implementation,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// The tool catalog and dispatcher
    registry: Arc<ToolRegistry>,
    /// Connection state
    connection_state: Arc<RwLock<ConnectionState>>,
    /// Message validator
    validator: McpValidator,
}

/// Connection state tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Uninitialized,
    Initializing,
    Ready,
    Closed,
}

impl McpServer {
    /// Create a new MCP server around a tool registry.
    #[inline]
    pub fn new(name: String, version: String, registry: Arc<ToolRegistry>) -> Result<Self> {
        let server_info = Implementation { name, version };

        let capabilities = ServerCapabilities {
            experimental: None,
            logging: Some(LoggingCapability {}),
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
        };

        let validator = McpValidator::new()?;

        Ok(Self {
            server_info,
            capabilities,
            registry,
            connection_state: Arc::new(RwLock::new(ConnectionState::Uninitialized)),
            validator,
        })
    }

    /// The advertised tool catalog, in registration order.
    #[inline]
    pub fn tool_catalog(&self) -> Vec<Tool> {
        self.registry
            .tools()
            .map(|tool| Tool {
                name: tool.name().to_string(),
                description: Some(tool.description().to_string()),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Start the server using stdio transport
    #[inline]
    pub async fn serve_stdio(self: Arc<Self>) -> Result<()> {
        info!(
            "Starting MCP server with stdio transport ({} tools)",
            self.registry.len()
        );

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = BufReader::new(stdin);

        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("EOF reached, closing connection");
                    break;
                }
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let raw_value: Value = match serde_json::from_str(line) {
                        Ok(value) => value,
                        Err(e) => {
                            let error = McpError::ParseError {
                                message: e.to_string(),
                            };
                            error.log();
                            self.send_message(&mut stdout, &error.to_error_response(None))
                                .await?;
                            continue;
                        }
                    };

                    match self.validator.validate_incoming(&raw_value) {
                        Ok(message) => {
                            let handler = MessageHandler::new(Arc::clone(&self));
                            if let Err(e) = handler.process_message(message, &mut stdout).await {
                                error!("Error processing message: {}", e);
                            }
                        }
                        Err(e) => {
                            let error = McpError::InvalidRequest {
                                message: e.to_string(),
                            };
                            error.log();
                            self.send_message(&mut stdout, &error.to_error_response(None))
                                .await?;
                        }
                    }
                }
                Err(e) => {
                    error!("Error reading from stdin: {}", e);
                    break;
                }
            }
        }

        {
            let mut state = self.connection_state.write().await;
            *state = ConnectionState::Closed;
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Send a message to the client
    async fn send_message<W>(&self, writer: &mut W, message: &JsonRpcMessage) -> Result<()>
    where
        W: AsyncWriteExt + Unpin,
    {
        let json = serde_json::to_string(message)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    /// Get current connection state
    #[inline]
    pub async fn connection_state(&self) -> ConnectionState {
        self.connection_state.read().await.clone()
    }
}

/// Message handler for processing incoming messages
pub struct MessageHandler {
    server: Arc<McpServer>,
}

impl MessageHandler {
    /// Create a new message handler
    #[inline]
    pub fn new(server: Arc<McpServer>) -> Self {
        Self { server }
    }

    /// Process an incoming message
    #[inline]
    pub async fn process_message<W>(&self, message: JsonRpcMessage, writer: &mut W) -> Result<()>
    where
        W: AsyncWriteExt + Unpin,
    {
        match message {
            JsonRpcMessage::Request(request) => self.handle_request(request, writer).await,
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(notification).await
            }
            JsonRpcMessage::Response(_) | JsonRpcMessage::ErrorResponse(_) => {
                warn!("Received unexpected response message from client");
                Ok(())
            }
        }
    }

    /// Handle a JSON-RPC request
    async fn handle_request<W>(&self, request: JsonRpcRequest, writer: &mut W) -> Result<()>
    where
        W: AsyncWriteExt + Unpin,
    {
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params).await,
            "tools/list" => self.handle_list_tools(),
            "tools/call" => self.handle_call_tool(request.params).await,
            "ping" => Ok(serde_json::json!({})),
            _ => {
                let error = McpError::MethodNotFound {
                    method: request.method.clone(),
                };
                error.log();
                return self
                    .send_error_response(writer, error.to_jsonrpc_error(), Some(request.id))
                    .await;
            }
        };

        match response {
            Ok(result) => {
                let response = JsonRpcResponse::new(result, request.id);
                self.send_response(writer, JsonRpcMessage::Response(response))
                    .await
            }
            Err(e) => {
                error!("Error handling request {}: {}", request.method, e);
                let error = match e.downcast_ref::<McpError>() {
                    Some(mcp_error) => mcp_error.to_jsonrpc_error(),
                    None => JsonRpcError::internal_error(Some(e.to_string())),
                };
                self.send_error_response(writer, error, Some(request.id))
                    .await
            }
        }
    }

    /// Handle a JSON-RPC notification
    async fn handle_notification(&self, notification: JsonRpcNotification) -> Result<()> {
        match notification.method.as_str() {
            "initialized" => self.handle_initialized().await,
            "notifications/cancelled" => {
                debug!("Received cancellation notification");
                Ok(())
            }
            _ => {
                warn!("Unknown notification method: {}", notification.method);
                Ok(())
            }
        }
    }

    /// Handle initialize request
    #[inline]
    pub async fn handle_initialize(&self, params: Option<Value>) -> Result<Value> {
        let params: InitializeParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => return Err(anyhow!("Initialize request missing parameters")),
        };

        if !self
            .server
            .validator
            .is_protocol_version_supported(&params.protocol_version)
        {
            let supported = self.server.validator.supported_protocol_versions();
            return Err(McpError::UnsupportedProtocolVersion {
                version: params.protocol_version,
                supported: supported.iter().map(|v| (*v).to_string()).collect(),
            }
            .into());
        }

        {
            let mut state = self.server.connection_state.write().await;
            *state = ConnectionState::Initializing;
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: self.server.capabilities.clone(),
            server_info: self.server.server_info.clone(),
            instructions: Some(
                "Open Library catalog and dictionary lookup MCP server".to_string(),
            ),
        };

        info!("Client initialized: {}", params.client_info.name);
        Ok(serde_json::to_value(result)?)
    }

    /// Handle initialized notification
    async fn handle_initialized(&self) -> Result<()> {
        {
            let mut state = self.server.connection_state.write().await;
            *state = ConnectionState::Ready;
        }

        info!("Server ready to handle requests");
        Ok(())
    }

    /// Handle list tools request
    #[inline]
    pub fn handle_list_tools(&self) -> Result<Value> {
        let result = ListToolsResult {
            tools: self.server.tool_catalog(),
        };
        Ok(serde_json::to_value(result)?)
    }

    /// Handle call tool request. Tool failures are carried in-band inside a
    /// successful response; only missing/unparsable params reach the
    /// JSON-RPC error channel.
    #[inline]
    pub async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value> {
        let params: CallToolParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => return Err(anyhow!("Tool call request missing parameters")),
        };

        let reply = self
            .server
            .registry
            .invoke(&params.name, params.arguments)
            .await;

        let result = CallToolResult {
            content: vec![ToolContent::Text { text: reply.text }],
            is_error: Some(reply.is_error),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Send a response message
    async fn send_response<W>(&self, writer: &mut W, message: JsonRpcMessage) -> Result<()>
    where
        W: AsyncWriteExt + Unpin,
    {
        self.server.send_message(writer, &message).await
    }

    /// Send an error response
    async fn send_error_response<W>(
        &self,
        writer: &mut W,
        error: JsonRpcError,
        id: Option<RequestId>,
    ) -> Result<()>
    where
        W: AsyncWriteExt + Unpin,
    {
        let error_response = JsonRpcErrorResponse::new(error, id);
        let message = JsonRpcMessage::ErrorResponse(error_response);
        self.server.send_message(writer, &message).await
    }
}
