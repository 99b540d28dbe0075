//! Session storage for the authenticated session.
//!
//! The session is two opaque string entries, `token` and `userInfo`,
//! written by the login flow and cleared by the 401 handler. The store
//! is injected into the client at construction so tests can substitute
//! an in-memory implementation.

pub mod session;

pub use session::{
    FileSessionStore, MemorySessionStore, SessionStore, StoreError, TOKEN_KEY, USER_INFO_KEY,
};
