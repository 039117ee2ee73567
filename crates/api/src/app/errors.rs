use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use erpsuite_auth::AuthzError;
use erpsuite_core::{DomainError, ErrorCategory};

use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::MissingField | ErrorCategory::InvalidId => StatusCode::BAD_REQUEST,
        ErrorCategory::NoUniqueKey | ErrorCategory::Conflict => StatusCode::CONFLICT,
        ErrorCategory::NoValue | ErrorCategory::ConfigurationError | ErrorCategory::Inconsistency => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Unauthorized => StatusCode::FORBIDDEN,
    }
}

fn category_name(category: ErrorCategory) -> String {
    serde_json::to_value(category)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "error".to_string())
}

/// Trace a business error and render it in the caller's language.
pub fn domain_error_to_response(
    services: &AppServices,
    tenant: &TenantContext,
    principal: &PrincipalContext,
    origin: &str,
    err: DomainError,
) -> axum::response::Response {
    let trace = services.tracebacks.trace(tenant.tenant_id(), &err, origin);
    let category = err.category();
    (
        status_for(category),
        axum::Json(json!({
            "error": category_name(category),
            "code": category.code(),
            "message": err.message().render(&services.catalog, principal.locale()),
            "traceId": trace.id.to_string(),
        })),
    )
        .into_response()
}

pub fn forbidden(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_map_to_http_statuses() {
        assert_eq!(status_for(ErrorCategory::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCategory::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCategory::MissingField), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorCategory::ConfigurationError),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn category_names_are_snake_case() {
        assert_eq!(category_name(ErrorCategory::ConfigurationError), "configuration_error");
        assert_eq!(category_name(ErrorCategory::NotFound), "not_found");
    }
}
