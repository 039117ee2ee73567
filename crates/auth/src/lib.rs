//! `erpsuite-auth` — authentication/authorization boundary.
//!
//! Decoupled from HTTP and storage: token validation, roles, permissions and
//! the tenant-scoped authorization check.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod roles;

pub use authorize::{AuthzError, Principal, TenantMembership, authorize};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use permissions::Permission;
pub use roles::{Role, permissions_for_roles};
