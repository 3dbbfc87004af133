mod auth;

pub use auth::{request_token, require_auth, AuthUser};
