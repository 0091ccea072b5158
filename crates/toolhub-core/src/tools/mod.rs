//! Tool cache module
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  ToolCache                                   │
//! │                                              │
//! │  - get_all: one fetch per generation         │
//! │  - get_subset: named tools, request order    │
//! │  - CacheInvalidator: reset, no I/O           │
//! │  - WarmupScheduler: background get_all       │
//! └──────────────────────────────────────────────┘
//!           │
//!           │ tools/list (per server)
//!           ▼
//! ┌──────────────────────────────────────────────┐
//! │  RegistryClientSingleton → MCP servers       │
//! └──────────────────────────────────────────────┘
//! ```

mod cache;
mod warmup;

pub use cache::{CacheInvalidator, CacheState, CacheStatus, ToolCache};
pub use warmup::{warm, WarmupScheduler};
