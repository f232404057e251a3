//! Utility functions and helpers

mod time;

pub use time::{cache_buster, current_timestamp_millis, rfc3339_now};
