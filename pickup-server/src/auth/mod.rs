//! Authentication and authorization
//!
//! Tokens are issued by the external session service; this module only
//! validates them:
//! - [`JwtService`] - token validation (and issuance for tooling/tests)
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] / [`require_admin`] - middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, Role};
pub use middleware::{require_admin, require_auth};
