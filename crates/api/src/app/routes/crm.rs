use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use erpsuite_auth::Permission;
use erpsuite_crm::Opportunity;

use crate::app::dto;
use crate::app::routes::common::{guard, parse_id, respond};
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/opportunity", post(create_opportunity).get(list_opportunities))
        .route("/opportunity/:id/copy", post(copy_opportunity))
        .route("/batch", post(run_batch))
}

pub async fn create_opportunity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<Opportunity>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::CRM_WRITE) {
        return resp;
    }

    let result = services.create_opportunity(tenant.tenant_id(), body);
    respond(
        &services,
        &tenant,
        &principal,
        "opportunity.create",
        StatusCode::CREATED,
        result,
    )
}

pub async fn list_opportunities(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> Json<serde_json::Value> {
    let mut items = services.opportunities.list(tenant.tenant_id());
    items.sort_by(|a, b| a.opportunity_seq.cmp(&b.opportunity_seq));
    Json(serde_json::json!({ "items": items }))
}

pub async fn copy_opportunity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::CopyQuery>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::CRM_WRITE) {
        return resp;
    }

    let result = parse_id(&id)
        .and_then(|id| services.copy_opportunity(tenant.tenant_id(), id, query.deep));
    respond(
        &services,
        &tenant,
        &principal,
        "opportunity.copy",
        StatusCode::CREATED,
        result,
    )
}

pub async fn run_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CrmBatchRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::CRM_WRITE) {
        return resp;
    }

    let dto::CrmBatchRequest { batch, mut data, now } = body;
    if data.opportunities.is_empty() {
        data.opportunities = services.opportunities.list(tenant.tenant_id());
    }
    let now = now.unwrap_or_else(|| Utc::now().naive_utc());

    let result = services
        .crm_batches
        .run(&batch, &mut data, now)
        .map(|report| dto::CrmBatchResponse { report, data });
    respond(
        &services,
        &tenant,
        &principal,
        "crm.batch",
        StatusCode::OK,
        result,
    )
}
