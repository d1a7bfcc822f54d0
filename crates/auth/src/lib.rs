//! `materials-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it decodes
//! session tokens into claims and answers permission checks.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod principal;
pub mod rbac;

pub use authorize::{ActionAuthorization, AuthzError, Principal, authorize};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use principal::PrincipalId;
pub use rbac::{Permission, Role, RolePolicy};
