// src/lib.rs

//! sitecms-api - HTTP surface of the site CMS
//!
//! Serves the public site and the admin UI, exposes the document read/save
//! endpoints and a server-side preview of the rendered page.

pub mod endpoints;
pub mod health;
pub mod rest;
pub mod server;
pub mod types;

pub use health::HealthService;
pub use rest::{ApiServer, AppState};
pub use server::{ctrl_c, run_api_server_with_config};
pub use types::{
    ApiError, ApiResponse, ErrorBody, HealthCheckResult, HealthResponse, HealthStatus,
    SaveResponse, StatusResponse,
};
