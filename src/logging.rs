//! Logging setup for applications embedding the crate.

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "ticket_ocr=info";

/// Installs a global subscriber printing timestamped lines to stdout.
/// `RUST_LOG` overrides the default filter. Does nothing if a subscriber
/// is already installed.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(ChronoLocal::new("%H:%M:%S%.3f".to_string())),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
        tracing::info!("logging initialized");
    }
}
