//! Process-wide tracing subscriber setup

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Whether the first call managed to install its subscriber
static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Only the first call has an
/// effect; later calls (or a subscriber installed elsewhere) return `false`.
pub fn init_tracing(json: bool, level: &str) -> bool {
    let mut first = false;
    let installed = *INSTALLED.get_or_init(|| {
        first = true;
        install(json, level)
    });
    first && installed
}

/// Outcome of the first `init_tracing` call, if one was made
pub fn tracing_installed() -> Option<bool> {
    INSTALLED.get().copied()
}

fn install(json: bool, level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_lowercase()));

    let result = if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let first = init_tracing(false, "INFO");
        assert_eq!(tracing_installed(), Some(first));
        assert!(!init_tracing(true, "DEBUG"));
        assert_eq!(tracing_installed(), Some(first));
    }
}
