use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::{self, Config};
use crate::mcp::McpServer;
use crate::tools::ToolRegistry;

/// Start the MCP server on stdio.
#[inline]
pub async fn serve_mcp() -> Result<()> {
    let config = Config::load_default().context("Failed to load configuration")?;
    let registry = Arc::new(
        ToolRegistry::with_default_tools(&config).context("Failed to build tool registry")?,
    );

    let server = Arc::new(
        McpServer::new(
            "openlibrary-mcp".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
            Arc::clone(&registry),
        )
        .context("Failed to create MCP server")?,
    );

    info!("MCP server initialized with {} tools", registry.len());

    tokio::select! {
        result = Arc::clone(&server).serve_stdio() => {
            result.context("MCP server terminated abnormally")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt signal, shutting down");
        }
    }

    Ok(())
}

/// Print the tool catalog with required arguments.
#[inline]
pub fn list_tools() -> Result<()> {
    let config = Config::load_default().context("Failed to load configuration")?;
    let registry =
        ToolRegistry::with_default_tools(&config).context("Failed to build tool registry")?;

    println!("Available tools ({} total):", registry.len());
    println!();

    for tool in registry.tools() {
        println!("{}", tool.name());
        println!("   {}", tool.description());

        let schema = tool.input_schema();
        if let Some(required) = schema["required"].as_array() {
            let names: Vec<&str> = required.iter().filter_map(|name| name.as_str()).collect();
            if !names.is_empty() {
                println!("   Required: {}", names.join(", "));
            }
        }

        println!();
    }

    Ok(())
}

/// Invoke a single tool and print its reply text. Returns whether the reply
/// was a success, so the caller can set the exit code.
#[inline]
pub async fn call_tool(name: &str, arguments: Option<&str>) -> Result<bool> {
    let config = Config::load_default().context("Failed to load configuration")?;
    let registry =
        ToolRegistry::with_default_tools(&config).context("Failed to build tool registry")?;

    let arguments: Option<std::collections::HashMap<String, serde_json::Value>> = match arguments {
        Some(raw) => {
            Some(serde_json::from_str(raw).context("Arguments must be a JSON object")?)
        }
        None => None,
    };

    let reply = registry.invoke(name, arguments).await;
    println!("{}", reply.text);

    Ok(!reply.is_error)
}

/// Print the resolved configuration and where it lives.
#[inline]
pub fn show_config() -> Result<()> {
    let dir = config::config_dir().context("Failed to resolve config directory")?;
    let config = Config::load(&dir)?;

    println!(
        "Configuration file: {}",
        config::config_file_path(&dir).display()
    );
    println!();
    print!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
