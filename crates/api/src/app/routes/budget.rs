use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use erpsuite_auth::Permission;
use erpsuite_budget::{Budget, BudgetLevel, GlobalBudget};
use erpsuite_core::{ActionContext, DomainError};

use crate::app::dto;
use crate::app::routes::common::{guard, parse_id, respond};
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/global-budget", post(register_global_budget))
        .route("/budget", post(register_budget))
        .route("/budget-level", post(create_budget_level))
        .route("/budget-level/:id", get(get_budget_level))
        .route("/budget-level/:id/copy", post(copy_budget_level))
}

pub async fn compute_budget_distribution(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::MoveActionRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::BUDGET_WRITE) {
        return resp;
    }

    let mut mv = body.record;
    let ctx = principal.action_context(body.context);
    let context = services
        .move_budgets
        .compute_budget_distribution_action(&mut mv, &ctx);

    respond(
        &services,
        &tenant,
        &principal,
        "move.budget_distribution",
        StatusCode::OK,
        Ok(dto::RecordActionResponse {
            context: context.into_response(&services.catalog, principal.locale()),
            record: mv,
        }),
    )
}

pub async fn check_budget_distribution(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::MoveActionRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::BUDGET_WRITE) {
        return resp;
    }

    let mv = body.record;
    let mut context = services.move_budgets.check_budget_distribution_action(&mv);
    let result = services.move_budgets.get_budget_exceed_alert(&mv).map(|alerts| {
        for alert in alerts {
            context.put_in_alert(alert);
        }
        dto::RecordActionResponse {
            context: context.into_response(&services.catalog, principal.locale()),
            record: mv,
        }
    });

    respond(
        &services,
        &tenant,
        &principal,
        "move.budget_check",
        StatusCode::OK,
        result,
    )
}

/// Budget exceed alert shown before a sale order is finalized; empty when
/// no budget is exceeded.
pub async fn check_sale_order_budget(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::SaleOrderCheckBudgetRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::BUDGET_WRITE) {
        return resp;
    }

    let result = services
        .sale_order_budgets
        .check_budget_before_finalize(&body.sale_order)
        .map(|alert| {
            let alert = alert
                .map(|m| m.render(&services.catalog, principal.locale()))
                .unwrap_or_default();
            json!({ "alert": alert })
        });

    respond(
        &services,
        &tenant,
        &principal,
        "sale_order.check_budget",
        StatusCode::OK,
        result,
    )
}

pub async fn register_global_budget(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<GlobalBudget>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::BUDGET_WRITE) {
        return resp;
    }

    services.budgets.upsert_global_budget(body.clone());
    respond(
        &services,
        &tenant,
        &principal,
        "budget.register_global_budget",
        StatusCode::CREATED,
        Ok(body),
    )
}

pub async fn register_budget(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<Budget>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::BUDGET_WRITE) {
        return resp;
    }

    services.budgets.upsert_budget(body.clone());
    respond(
        &services,
        &tenant,
        &principal,
        "budget.register_budget",
        StatusCode::CREATED,
        Ok(body),
    )
}

pub async fn create_budget_level(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<BudgetLevel>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::BUDGET_WRITE) {
        return resp;
    }

    let result = services
        .budget_levels
        .insert(tenant.tenant_id(), body)
        .map(|level| {
            let ctx = principal.action_context(ActionContext::default());
            services.budget_levels.to_json(&level, &ctx)
        });
    respond(
        &services,
        &tenant,
        &principal,
        "budget_level.create",
        StatusCode::CREATED,
        result,
    )
}

pub async fn get_budget_level(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = parse_id(&id).and_then(|id| {
        let level = services
            .budget_levels
            .find(tenant.tenant_id(), id)
            .ok_or_else(DomainError::not_found)?;
        let ctx = principal.action_context(ActionContext::default());
        Ok(services.budget_levels.to_json(&level, &ctx))
    });
    respond(
        &services,
        &tenant,
        &principal,
        "budget_level.get",
        StatusCode::OK,
        result,
    )
}

pub async fn copy_budget_level(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::CopyQuery>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::BUDGET_WRITE) {
        return resp;
    }

    let result = parse_id(&id)
        .and_then(|id| services.budget_levels.copy(tenant.tenant_id(), id, query.deep));
    respond(
        &services,
        &tenant,
        &principal,
        "budget_level.copy",
        StatusCode::CREATED,
        result,
    )
}
