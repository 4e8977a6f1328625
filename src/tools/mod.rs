//! Tool abstraction and dispatch.
//!
//! A [`Tool`] is a named, schema-described callable. The [`ToolRegistry`] is
//! the single catalog consumed by every front end (the MCP server and the
//! one-shot CLI), so each tool's fetch/normalize/render pipeline is written
//! exactly once.


use crate::client::FetchError;
use crate::config::Config;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// How a tool invocation failed. All three kinds surface to the caller as
/// in-band failure text; the protocol-level call itself still succeeds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// A required argument was missing or blank. Raised before any network
    /// traffic happens.
    #[error("{0}")]
    Validation(String),

    /// The upstream answered, but not with the requested resource. Carries
    /// the tool's domain-specific message, status code included verbatim
    /// where one exists.
    #[error("{0}")]
    NotFound(String),

    /// Transport failure, undecodable body, or a render problem.
    #[error("An error occurred: {0}")]
    Fault(String),
}

impl From<FetchError> for ToolError {
    #[inline]
    fn from(error: FetchError) -> Self {
        Self::Fault(error.to_string())
    }
}

/// The argument bag of a tool call.
#[derive(Debug, Clone, Default)]
pub struct ToolArguments {
    values: HashMap<String, Value>,
}

impl ToolArguments {
    #[inline]
    pub fn new(values: Option<HashMap<String, Value>>) -> Self {
        Self {
            values: values.unwrap_or_default(),
        }
    }

    /// A required string argument, trimmed. Missing, non-string, or blank
    /// values fail validation.
    #[inline]
    pub fn required_str(&self, name: &str) -> Result<String, ToolError> {
        let value = self
            .values
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();

        if value.is_empty() {
            return Err(ToolError::Validation(format!(
                "Please provide a valid value for '{name}'."
            )));
        }

        Ok(value.to_string())
    }

    /// An optional integer argument with a fallback.
    #[inline]
    pub fn integer_or(&self, name: &str, default: i64) -> i64 {
        self.values
            .get(name)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    }
}

/// A named, schema-described callable exposed over the protocol boundary.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema for the tool's argument object.
    fn input_schema(&self) -> Value;

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError>;
}

/// The uniform result envelope: complete rendered text, plus a flag telling
/// the caller whether the text is failure prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    pub text: String,
    pub is_error: bool,
}

impl ToolReply {
    #[inline]
    pub fn ok(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    #[inline]
    pub fn error(text: String) -> Self {
        Self {
            text,
            is_error: true,
        }
    }
}

/// Static catalog of tools, dispatched by name. Registration order is
/// preserved so the advertised catalog is deterministic.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.index.insert(tool.name(), self.tools.len());
        self.tools.push(tool);
    }

    /// Build the registry with the full Open Library and dictionary catalog,
    /// sharing one HTTP client across every tool.
    #[inline]
    pub fn with_default_tools(config: &Config) -> crate::Result<Self> {
        use crate::client::UpstreamClient;
        use crate::dictionary::Dictionary;
        use crate::openlibrary::OpenLibrary;

        let client = Arc::new(UpstreamClient::new(config.http_timeout()));

        let library = Arc::new(OpenLibrary::new(
            Arc::clone(&client),
            config
                .open_library_url()
                .map_err(|e| crate::ServerError::Config(e.to_string()))?,
        ));
        let dictionary = Arc::new(Dictionary::new(
            Arc::clone(&client),
            config
                .dictionary_url()
                .map_err(|e| crate::ServerError::Config(e.to_string()))?,
        ));

        let mut registry = Self::new();
        crate::openlibrary::register_tools(&mut registry, &library);
        crate::dictionary::register_tools(&mut registry, &dictionary);

        Ok(registry)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&at| &self.tools[at])
    }

    #[inline]
    pub fn tools(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch one invocation. This is the single safety net: every
    /// [`ToolError`] is rendered to failure text here, and an unknown tool
    /// name is itself an in-band failure rather than a protocol error.
    #[inline]
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<HashMap<String, Value>>,
    ) -> ToolReply {
        let Some(tool) = self.get(name) else {
            return ToolReply::error(format!("Unknown tool: {name}"));
        };

        debug!("Invoking tool {}", name);

        let arguments = ToolArguments::new(arguments);
        match tool.call(&arguments).await {
            Ok(text) => ToolReply::ok(text),
            Err(error) => {
                debug!("Tool {} failed: {}", name, error);
                ToolReply::error(error.to_string())
            }
        }
    }
}

/// Pretty JSON with two-space indentation. `serde_json` leaves non-ASCII
/// characters unescaped, which keeps titles and names readable as-is.
#[inline]
pub fn render_pretty<T: Serialize>(value: &T) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value).map_err(|error| ToolError::Fault(error.to_string()))
}
