//! Subscriber setup for the binary. Library code only emits events.

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `default_directive`.
///
/// Calling this twice is harmless; the second install is refused and
/// reported as an error.
pub fn init_logging(
    default_directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn second_install_is_refused() {
        // The first call may already lose to another test's subscriber.
        let _ = init_logging("debug");
        assert!(init_logging("debug").is_err());
    }
}
