//! Registry connection management
//!
//! ```text
//! ConfigLoader ──► adapt ──► Connector ──► RegistryHandle (Arc<dyn ToolSource>)
//!                                               │
//!                       RegistryClientSingleton ┘  created once, never reset
//! ```

mod client;
mod singleton;
mod traits;

pub use client::{RegistryClient, StdioConnector};
pub use singleton::RegistryClientSingleton;
pub use traits::{Connector, RegistryHandle, ToolSource};
