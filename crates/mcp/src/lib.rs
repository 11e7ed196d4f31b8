// MCP (Model Context Protocol) server for the YÖK Atlas tools.
// Exposes the four tools over a JSON-RPC dispatcher that the stdio
// transport here and the HTTP endpoint in the server crate share.

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::{McpError, McpResult};
pub use server::McpServer;
pub use tools::{default_registry, Tool, ToolRegistry};
pub use transport::run_stdio;
