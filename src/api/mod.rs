//! REST API client module for the JobScope backend.
//!
//! This module provides the `ApiClient` used by the rest of the
//! application for every HTTP exchange. The client runs an ordered
//! interceptor list around each request: the auth interceptor attaches
//! the stored bearer token on the way out and handles session expiry
//! (401) on the way back.

pub mod client;
pub mod error;
pub mod interceptor;

pub use client::ApiClient;
pub use error::ApiError;
pub use interceptor::{AuthInterceptor, Interceptor};
