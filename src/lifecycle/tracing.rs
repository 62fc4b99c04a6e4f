//! Tracing setup.
//!
//! Log lines use the compact format without module targets; the store loop
//! records `entity_type` instead. The level comes from `RUST_LOG` and falls back
//! to `info`.
//!
//! ```bash
//! RUST_LOG=debug crm serve              # store payloads and reads
//! RUST_LOG=crm=info,tower_http=debug crm serve
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
