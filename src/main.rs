use clap::{Parser, Subcommand};
use openlibrary_mcp::Result;
use openlibrary_mcp::commands::{call_tool, list_tools, serve_mcp, show_config};

#[derive(Parser)]
#[command(name = "openlibrary-mcp")]
#[command(about = "Open Library catalog and dictionary lookup tools over MCP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server on stdio
    Serve,
    /// List the available tools
    Tools,
    /// Invoke a single tool and print its reply
    Call {
        /// Tool name, e.g. search_books
        tool: String,
        /// Arguments as a JSON object, e.g. '{"query": "dune"}'
        arguments: Option<String>,
    },
    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries the MCP transport; logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve_mcp().await?,
        Commands::Tools => list_tools()?,
        Commands::Call { tool, arguments } => {
            let succeeded = call_tool(&tool, arguments.as_deref()).await?;
            if !succeeded {
                std::process::exit(1);
            }
        }
        Commands::Config => show_config()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["openlibrary-mcp", "serve"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            matches!(parsed.command, Commands::Serve);
        }
    }

    #[test]
    fn call_command_with_arguments() {
        let cli = Cli::try_parse_from([
            "openlibrary-mcp",
            "call",
            "search_books",
            r#"{"query": "dune"}"#,
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Call { tool, arguments } = parsed.command {
                assert_eq!(tool, "search_books");
                assert_eq!(arguments.as_deref(), Some(r#"{"query": "dune"}"#));
            }
        }
    }

    #[test]
    fn call_command_without_arguments() {
        let cli = Cli::try_parse_from(["openlibrary-mcp", "call", "get_definitions"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Call { tool, arguments } = parsed.command {
                assert_eq!(tool, "get_definitions");
                assert_eq!(arguments, None);
            }
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["openlibrary-mcp", "index"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_message() {
        let cli = Cli::try_parse_from(["openlibrary-mcp", "--help"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
