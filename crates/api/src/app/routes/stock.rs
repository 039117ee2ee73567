use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;

use erpsuite_auth::Permission;
use erpsuite_core::{DomainError, DomainResult, ExpectedVersion, RecordId, TenantId};
use erpsuite_stock::messages;
use erpsuite_stock::{StockMove, StockMoveLine};

use crate::app::dto;
use crate::app::routes::common::{guard, parse_id, respond};
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/stock-move", post(create_stock_move))
        .route("/stock-move/:id", get(get_stock_move))
        .route("/stock-move/:id/status", put(update_status))
        .route("/stock-move/:id/mobility", put(update_mobility))
        .route("/stock-move/:id/destination", put(update_destination))
        .route("/stock-move-line/:id", put(update_stock_move_line))
}

pub async fn create_stock_move(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<StockMove>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::STOCK_WRITE) {
        return resp;
    }

    let result = services.stock_moves.insert(tenant.tenant_id(), body);
    respond(
        &services,
        &tenant,
        &principal,
        "stock_move.create",
        StatusCode::CREATED,
        result,
    )
}

pub async fn get_stock_move(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = parse_id(&id).and_then(|id| {
        services
            .stock_moves
            .find(tenant.tenant_id(), id)
            .ok_or_else(DomainError::not_found)
    });
    respond(
        &services,
        &tenant,
        &principal,
        "stock_move.get",
        StatusCode::OK,
        result,
    )
}

/// Load a stock move, check its version, apply `change` and store it.
fn modify_stock_move(
    services: &AppServices,
    tenant_id: TenantId,
    raw_id: &str,
    version: Option<u64>,
    change: impl FnOnce(&mut StockMove) -> DomainResult<()>,
) -> DomainResult<StockMove> {
    let id = parse_id(raw_id)?;
    let mut mv = services
        .stock_moves
        .find(tenant_id, id)
        .ok_or_else(DomainError::not_found)?;
    let expected = ExpectedVersion::from(version);
    expected.check(mv.version)?;
    change(&mut mv)?;
    services.stock_moves.update(tenant_id, mv, expected)
}

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStockMoveStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::STOCK_WRITE) {
        return resp;
    }

    let today = body.today.unwrap_or_else(|| Utc::now().date_naive());
    let result = modify_stock_move(&services, tenant.tenant_id(), &id, body.version, |mv| {
        services.stock_move_updates.update_status(mv, body.status, today)
    });
    respond(
        &services,
        &tenant,
        &principal,
        "stock_move.update_status",
        StatusCode::OK,
        result,
    )
}

pub async fn update_mobility(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStockMoveMobilityRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::STOCK_WRITE) {
        return resp;
    }

    let dto::UpdateStockMoveMobilityRequest {
        version,
        moved_qty,
        unit,
    } = body;
    let result = modify_stock_move(&services, tenant.tenant_id(), &id, version, |mv| {
        services
            .stock_move_updates
            .update_stock_move_mobility(mv, moved_qty, unit)
    });
    respond(
        &services,
        &tenant,
        &principal,
        "stock_move.update_mobility",
        StatusCode::OK,
        result,
    )
}

pub async fn update_destination(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStockMoveDestinationRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::STOCK_WRITE) {
        return resp;
    }

    let dto::UpdateStockMoveDestinationRequest {
        version,
        to_location,
    } = body;
    let result = modify_stock_move(&services, tenant.tenant_id(), &id, version, |mv| {
        services
            .stock_move_updates
            .update_stock_move_destination_location(mv, to_location)
    });
    respond(
        &services,
        &tenant,
        &principal,
        "stock_move.update_destination",
        StatusCode::OK,
        result,
    )
}

/// Update the received quantity and conformity of a line.
///
/// 404 when no stock move of the tenant holds the line, 409 when `version`
/// is not the line's current version.
pub async fn update_stock_move_line(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStockMoveLineRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::STOCK_WRITE) {
        return resp;
    }

    let result = parse_id(&id)
        .and_then(|line_id| apply_line_update(&services, tenant.tenant_id(), line_id, &body))
        .map(|line| dto::AosResponse {
            message: erpsuite_core::Message::new(messages::STOCK_MOVE_LINE_UPDATED)
                .render(&services.catalog, principal.locale()),
            object: line,
        });
    respond(
        &services,
        &tenant,
        &principal,
        "stock_move_line.update",
        StatusCode::OK,
        result,
    )
}

fn apply_line_update(
    services: &AppServices,
    tenant_id: TenantId,
    line_id: RecordId,
    body: &dto::UpdateStockMoveLineRequest,
) -> DomainResult<StockMoveLine> {
    let mut mv = services
        .stock_moves
        .find_where(tenant_id, |m| m.line(line_id).is_some())
        .ok_or_else(DomainError::not_found)?;
    let move_version = ExpectedVersion::Exact(mv.version);

    let line = mv.line_mut(line_id).ok_or_else(DomainError::not_found)?;
    ExpectedVersion::Exact(body.version).check(line.version)?;
    services
        .stock_move_lines
        .update_stock_move_line(line, body.real_qty, body.conformity)?;
    line.version += 1;
    let updated = line.clone();

    services.stock_moves.update(tenant_id, mv, move_version)?;
    Ok(updated)
}
