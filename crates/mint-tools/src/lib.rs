//! Tool framework for mint-visibility-rs
//!
//! An MCP server exposes a flat list of named tools to its client. This
//! crate defines the [`Tool`] trait every tool implements and a
//! [`ToolRegistry`] the server dispatches `tools/list` and `tools/call`
//! against. The registry preserves registration order so listings are
//! stable across runs.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::Tool;
