//! Mailinator disposable-email client library
//!
//! Core for the `mailinator` CLI and MCP server: an HTTP client for the
//! Mailinator API, a listing cache backing numeric message references, a
//! ten-format rendering pipeline, and the two command orchestrators shared
//! by both transports.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use mailinator_mcp::commands::{self, AppContext};
//! use mailinator_mcp::config::Config;
//!
//! let ctx = AppContext::from_config(&Config::load());
//! let listing = commands::list_inbox(&ctx, "joe", None).await?;
//! ```

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod params;
pub mod server;
pub mod types;
pub mod validators;

// Re-export the main entry points
pub use commands::AppContext;
pub use error::{CacheError, Error, Result};
pub use format::EmailFormat;
pub use server::MailinatorMcpServer;
