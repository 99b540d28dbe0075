//! Serde models mirroring the backend API schemas.

pub mod job;
pub mod user;

pub use job::{Job, JobQuery};
pub use user::{LoginRequest, LoginResponse, UserInfo};
