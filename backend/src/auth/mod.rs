//! Authentication module
//!
//! Bearer-token (JWT) identity for the recommendation endpoints.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::{bearer_token, AuthUser};
