//! Development-time tracing for debugging the game.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics on stderr, filtered by
//!   `RUST_LOG` or the CLI `-v` flag. Not part of the game's product output.
//!
//! - **Step trace and reports**: Printed to stdout (`play`) or written to the
//!   batch report file. Always produced, unaffected by log filtering.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a `-v` count when `RUST_LOG` is unset.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "wikigame=info,warn",
        _ => "wikigame=debug,info",
    }
}

/// Initialize tracing subscriber for development logging.
///
/// `RUST_LOG` wins when set; otherwise the level follows `verbose`.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=wikigame=debug cargo run -- play --start "Rust"
/// ```
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_crate_level() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).contains("wikigame=info"));
        assert!(default_directive(5).contains("wikigame=debug"));
    }
}
