//! `tracing` subscriber setup for the binary and for tests.

use tracing_subscriber::EnvFilter;

/// Builds the event filter: `RUST_LOG` first, then `directive`, then `info`.
pub fn env_filter(directive: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| match directive {
            Some(d) => EnvFilter::try_new(d),
            None => EnvFilter::try_new("info"),
        })
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a formatted subscriber on stderr.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(directive: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_noop() {
        init_tracing(Some("debug"));
        assert!(!init_tracing(Some("debug")));
    }
}
