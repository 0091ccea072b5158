//! Logging abstractions
//!
//! Components take an `Arc<dyn Logger>` so hosts can route messages anywhere.
//! The default implementation forwards to `tracing`.

mod init;
mod tracing_logger;

pub use init::{init_tracing, tracing_installed};
pub use tracing_logger::TracingLogger;

/// Logger abstraction
///
/// Implementations:
/// - `TracingLogger`: Forwards to the `tracing` crate
/// - `NoOpLogger`: Silent logger
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);

    /// Log an error message
    fn error(&self, message: &str);
}

/// A logger that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
