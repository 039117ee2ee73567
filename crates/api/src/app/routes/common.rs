use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use erpsuite_auth::Permission;
use erpsuite_core::{DomainResult, RecordId};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

/// Reject the request unless the caller holds `permission`.
pub fn guard(
    tenant: &TenantContext,
    principal: &PrincipalContext,
    permission: &Permission,
) -> Result<(), axum::response::Response> {
    crate::authz::require(tenant, principal, permission).map_err(errors::forbidden)
}

pub fn parse_id(raw: &str) -> DomainResult<RecordId> {
    raw.parse()
}

/// Serialize a successful result with `status`, or trace and render the error.
pub fn respond<T: Serialize>(
    services: &AppServices,
    tenant: &TenantContext,
    principal: &PrincipalContext,
    origin: &str,
    status: StatusCode,
    result: DomainResult<T>,
) -> axum::response::Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => errors::domain_error_to_response(services, tenant, principal, origin, e),
    }
}
