//! Shared types for the sitecms workspace: error kinds, configuration and
//! small helpers used by the store, the renderer and the API server.

pub mod config;
pub mod errors;
pub mod utils;

pub use config::{CmsConfig, SeedTarget, ServerConfig, StoreConfig};
pub use errors::{Error, ErrorKind, ReadFailure, Result};
