//! Diagnostic logging
//!
//! Diagnostics go to stderr so command output on stdout stays clean. The
//! default level is `warn` for this crate; `RUST_LOG` overrides it.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "coa_ledger=warn";

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
