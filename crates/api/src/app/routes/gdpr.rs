use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};

use erpsuite_auth::Permission;
use erpsuite_base::anonymize_json;

use crate::app::dto;
use crate::app::routes::common::{guard, respond};
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

/// Anonymize the listed fields of a record; other fields are returned as-is.
pub async fn anonymize(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::AnonymizeRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::GDPR_ANONYMIZE) {
        return resp;
    }

    let fields = body
        .fields
        .into_iter()
        .map(|f| (f.name, f.field_type, f.max_size))
        .collect::<Vec<_>>();
    let result = anonymize_json(&body.object, &fields);
    tracing::info!(
        tenant_id = %tenant.tenant_id(),
        user_id = %principal.user_id(),
        fields = fields.len(),
        "record anonymized"
    );

    respond(
        &services,
        &tenant,
        &principal,
        "gdpr.anonymize",
        StatusCode::OK,
        result,
    )
}
