//! Mailinator CLI and MCP server
//!
//! One binary, two transports: human-formatted subcommands with per-kind
//! exit codes, and `serve` which runs the MCP server over stdio.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mailinator_mcp::commands::{self, AppContext};
use mailinator_mcp::config::{self, Config, TOKEN_ENV};
use mailinator_mcp::error::Error;
use mailinator_mcp::format::{format_inbox_table, render, EmailFormat};
use mailinator_mcp::server::MailinatorMcpServer;

#[derive(Parser)]
#[command(
    name = "mailinator",
    version,
    about = "CLI tool to interact with the Mailinator disposable email service"
)]
struct Cli {
    /// Show detailed HTTP request/response information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List emails in an inbox
    Inbox {
        /// Inbox name to query
        inbox_name: String,
        /// Domain (public, private, or custom domain)
        domain: Option<String>,
    },
    /// Retrieve and display an email
    Email {
        /// Message ID or listing number from the inbox command
        message_id: String,
        /// Email format (summary, text, textplain, texthtml, full, raw,
        /// headers, smtplog, links, linksfull)
        #[arg(default_value = "text")]
        format: EmailFormat,
        /// Domain override for raw message IDs
        #[arg(short, long)]
        domain: Option<String>,
    },
    /// Manage the stored API token
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Run the MCP server on stdio
    Serve,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Save the API token to the config file
    SetToken { token: String },
    /// Show where the current token comes from
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(error) => handle_error(error),
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    // Log to stderr; stdout carries command output and the MCP protocol
    let default_level = if verbose {
        "mailinator_mcp=debug"
    } else {
        "mailinator_mcp=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .init();
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load();

    match cli.command {
        Commands::Inbox { inbox_name, domain } => {
            let ctx = AppContext::from_config(&config);
            let listing = commands::list_inbox(&ctx, &inbox_name, domain.as_deref()).await?;
            print!("{}", format_inbox_table(&listing));
        }
        Commands::Email {
            message_id,
            format,
            domain,
        } => {
            let ctx = AppContext::from_config(&config);
            let email =
                commands::get_email(&ctx, &message_id, domain.as_deref(), format).await?;
            let output = render(&email, format);
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
        Commands::Config(ConfigCommand::SetToken { token }) => {
            let path = config::save_token(&token)?;
            println!("API token saved to {}", path.display());
        }
        Commands::Config(ConfigCommand::Show) => {
            // The token value itself is never printed
            if config.has_token() {
                println!("API token configured (source: {})", config.source);
            } else {
                println!("No API token configured. Set {TOKEN_ENV} or run \"config set-token\".");
            }
            println!("Config file: {}", config::config_path().display());
        }
        Commands::Serve => {
            let ctx = Arc::new(AppContext::from_config(&config));
            let server = MailinatorMcpServer::new(ctx);

            tracing::info!("Starting Mailinator MCP server");
            let service = server.serve(stdio()).await?;
            service.waiting().await?;
            tracing::info!("Server shutting down");
        }
    }

    Ok(())
}

fn handle_error(error: anyhow::Error) -> ! {
    let code = match error.downcast_ref::<Error>() {
        Some(Error::Validation(message)) => {
            eprintln!("Validation Error: {message}");
            1
        }
        Some(Error::Api { message, status, .. }) => {
            eprintln!("API Error: {message}");
            if let Some(status) = status {
                eprintln!("Status code: {status}");
            }
            2
        }
        Some(Error::Cache(cache_error)) => {
            eprintln!("Cache Error: {cache_error}");
            eprintln!("Hint: Run the \"inbox\" command first to populate the cache.");
            3
        }
        Some(Error::Config(message)) => {
            eprintln!("Config Warning: {message}");
            0
        }
        None => {
            eprintln!("Unexpected Error: {error:?}");
            1
        }
    };
    std::process::exit(code);
}
