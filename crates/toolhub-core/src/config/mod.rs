//! Configuration loading and adaptation
//!
//! - `ConfigLoader`: reads the MCP document from disk off the async scheduler
//! - `adapt`: converts the IDE document into a `CanonicalConfig`
//! - `Settings`: where to find the document and how the cache behaves

mod adapter;
mod document;
mod loader;
mod settings;

pub use adapter::{adapt, MCP_SERVERS_KEY};
pub use document::{merge_documents, validate_server_entry};
pub use loader::{load_document, ConfigLoader, DEFAULT_CONFIG_FILE};
pub use settings::{Settings, SettingsFile, ENV_MCP_CONFIG, ENV_MCP_SERVER, ENV_WARMUP};
