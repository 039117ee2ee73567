use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use erpsuite_auth::Permission;
use erpsuite_core::i18n::Message;
use erpsuite_core::{DomainError, DomainResult, ExpectedVersion, TenantId};
use erpsuite_sale::LoyaltyAccount;

use crate::app::dto;
use crate::app::routes::common::{guard, respond};
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/loyalty-account", post(create_loyalty_account).get(list_loyalty_accounts))
        .route("/loyalty-account/acquire", post(acquire_loyalty_points))
}

pub async fn merge_sale_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::SaleOrderMergeRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::SALE_WRITE) {
        return resp;
    }

    let result = services
        .sale_order_merging
        .merge_sale_orders(&body.sale_orders, body.choices.as_ref());
    respond(
        &services,
        &tenant,
        &principal,
        "sale_order.merge",
        StatusCode::OK,
        result,
    )
}

pub async fn create_loyalty_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<LoyaltyAccount>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::SALE_WRITE) {
        return resp;
    }

    let result = services.loyalty_accounts.insert(tenant.tenant_id(), body);
    respond(
        &services,
        &tenant,
        &principal,
        "loyalty_account.create",
        StatusCode::CREATED,
        result,
    )
}

pub async fn list_loyalty_accounts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> Json<serde_json::Value> {
    let items = services.loyalty_accounts.list(tenant.tenant_id());
    Json(serde_json::json!({ "items": items }))
}

pub async fn acquire_loyalty_points(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::AcquireLoyaltyPointsRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::SALE_WRITE) {
        return resp;
    }

    let result = apply_acquisition(&services, tenant.tenant_id(), &body);
    respond(
        &services,
        &tenant,
        &principal,
        "loyalty_account.acquire",
        StatusCode::OK,
        result,
    )
}

fn apply_acquisition(
    services: &AppServices,
    tenant_id: TenantId,
    body: &dto::AcquireLoyaltyPointsRequest,
) -> DomainResult<dto::AcquireLoyaltyPointsResponse> {
    let accounts = services.loyalty_accounts.list(tenant_id);
    let mut account = services
        .loyalty
        .get_loyalty_account(&accounts, &body.partner, &body.company)
        .cloned()
        .ok_or_else(|| {
            DomainError::no_value(
                Message::new(erpsuite_sale::messages::LOYALTY_ACCOUNT_MISSING)
                    .arg(&body.partner)
                    .arg(&body.company),
            )
        })?;

    let now = body.now.unwrap_or_else(|| Utc::now().naive_utc());
    let acquired = services
        .loyalty
        .acquire_points(&mut account, services.loyalty_points_delay_days, now)?;

    let expected = ExpectedVersion::Exact(account.version);
    let account = services.loyalty_accounts.update(tenant_id, account, expected)?;
    Ok(dto::AcquireLoyaltyPointsResponse { acquired, account })
}
