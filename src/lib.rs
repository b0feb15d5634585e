//! Cross-cutting utilities for the StarQi host application.
//!
//! - [`ResultEnvelope`]: uniform success/fail result passed between subsystems
//! - [`debounce`] / [`throttle`]: bound how often an event callback runs
//! - [`IconExtractor`]: best-effort icon extraction through the bundled tool,
//!   plus [`extract_filename`] for Windows paths

pub mod config;
pub mod core;
pub mod error;

pub use crate::config::BridgeConfig;
pub use crate::core::{
    debounce, debounce_async, decode_icon_data, extract_filename, extract_icon, is_icon_data_uri,
    throttle, throttle_async, Debounce, IconExtractor, ResultCode, ResultEnvelope, Throttle,
    ThrottleEdge,
};
pub use crate::error::CoreError;

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG`
/// (default `starqi_core=info`).
///
/// Does nothing if the host already installed a global subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starqi_core=info".into()),
        )
        .try_init();
}
