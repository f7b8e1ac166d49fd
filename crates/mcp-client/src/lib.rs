//! `mcp-client`: call tools on an external MCP server over stdio.
//!
//! ```text
//! Registry (.mcp.json)
//!     │  name → ServerConfig
//!     ▼
//! ServerProcess   ← spawns the server, newline-delimited JSON-RPC on stdio
//!     │
//!     ▼
//! McpClient       ← initialize handshake, request/response matching by id,
//!                   tools/call with isError mapped to McpClientError::Tool
//! ```
//!
//! ```rust,ignore
//! use mcp_client::{McpClient, Registry};
//!
//! let registry = Registry::load(Path::new(".mcp.json"))?;
//! let server = registry.get("n8n-mcp").expect("registered");
//! let mut client = McpClient::connect("n8n-mcp", server).await?;
//! let value = client.call_tool("workflows.activate", json!({"id": "42"})).await?;
//! client.close().await;
//! ```

pub mod client;
pub mod error;
pub mod registry;
pub mod types;

pub(crate) mod process;


pub use client::{McpClient, PROTOCOL_VERSION};
pub use error::McpClientError;
pub use types::{Registry, ServerConfig, ToolCallResult};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, McpClientError>;
