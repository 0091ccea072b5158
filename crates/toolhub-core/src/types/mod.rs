//! Core types shared by the config, registry and cache layers

mod server;
mod tool;

pub use server::{CanonicalConfig, ServerConfig, Transport, DEFAULT_ENCODING};
pub use tool::{ToolDescriptor, ToolSet, ToolSummary};
