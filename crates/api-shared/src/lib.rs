//! # API Shared
//!
//! Shared utilities and definitions for the Oncora APIs.
//!
//! Contains:
//! - Wire DTOs with serde and OpenAPI schemas (`dto` module)
//! - The stateless `HealthService` behind the health endpoint
//! - Bearer token header parsing
//!
//! Used by `api-rest` and the `oncora` CLI for common functionality.

pub mod auth;
pub mod dto;
pub mod health;

pub use auth::{bearer_token, AuthError};
pub use dto::*;
pub use health::HealthService;
