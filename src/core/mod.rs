//! The three leaf components, independent of each other.
//!
//! - [`ResultEnvelope`]: success/fail envelope with message and opaque payload
//! - [`Debounce`] / [`Throttle`]: rate-controlled callback wrappers
//! - [`IconExtractor`]: external icon tool bridge and Windows path helpers

pub mod envelope;
pub mod icon_extractor;
pub mod rate_control;

pub use envelope::{ResultCode, ResultEnvelope, CODE_FAIL, CODE_SUCCESS};
pub use icon_extractor::{
    decode_icon_data, extract_filename, extract_icon, is_icon_data_uri, IconExtractor,
};
pub use rate_control::{
    debounce, debounce_async, throttle, throttle_async, Debounce, Throttle, ThrottleEdge,
};
