//! Client library for the JobScope job-market analytics API.
//!
//! This crate provides the `ApiClient` every other part of the
//! application talks through: a reqwest wrapper that attaches the
//! stored bearer token to outbound requests, unwraps response bodies,
//! and reacts to 401 responses by clearing the session and redirecting
//! to the login route.
//!
//! The pieces the wrapper depends on are injected at construction:
//! a [`auth::SessionStore`] holding the `token` and `userInfo` entries,
//! and a [`nav::Navigator`] for the login redirect. Both have in-memory
//! implementations suitable for tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod nav;

pub use api::{ApiClient, ApiError, AuthInterceptor, Interceptor};
pub use auth::{FileSessionStore, MemorySessionStore, SessionStore, TOKEN_KEY, USER_INFO_KEY};
pub use config::ClientConfig;
pub use nav::{Navigator, NullNavigator};
