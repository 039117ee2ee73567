use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use erpsuite_auth::Permission;
use erpsuite_core::{DomainError, DomainResult, ExpectedVersion, TenantId};
use erpsuite_hr::Expense;

use crate::app::dto;
use crate::app::routes::common::{guard, parse_id, respond};
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/expense", post(create_expense))
        .route("/expense/:id", get(get_expense))
}

pub async fn create_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<Expense>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::HR_WRITE) {
        return resp;
    }

    let result = services.expenses.insert(tenant.tenant_id(), body);
    respond(
        &services,
        &tenant,
        &principal,
        "expense.create",
        StatusCode::CREATED,
        result,
    )
}

pub async fn get_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = parse_id(&id).and_then(|id| {
        services
            .expenses
            .find(tenant.tenant_id(), id)
            .ok_or_else(DomainError::not_found)
    });
    respond(
        &services,
        &tenant,
        &principal,
        "expense.get",
        StatusCode::OK,
        result,
    )
}

pub async fn update_expense_line(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::UpdateExpenseLineRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::HR_WRITE) {
        return resp;
    }

    let result = apply_expense_line_update(&services, tenant.tenant_id(), &body);
    respond(
        &services,
        &tenant,
        &principal,
        "expense_line.update",
        StatusCode::OK,
        result,
    )
}

/// Update the line and store every expense it touched. Nothing is stored
/// when the update is rejected.
fn apply_expense_line_update(
    services: &AppServices,
    tenant_id: TenantId,
    body: &dto::UpdateExpenseLineRequest,
) -> DomainResult<Value> {
    let mut expense = services
        .expenses
        .find(tenant_id, body.expense_id)
        .ok_or_else(DomainError::not_found)?;
    ExpectedVersion::from(body.version).check(expense.version)?;

    let mut new_expense = match body.new_expense_id {
        Some(id) if id != expense.id => Some(
            services
                .expenses
                .find(tenant_id, id)
                .ok_or_else(DomainError::not_found)?,
        ),
        _ => None,
    };

    let line = services.expense_lines.update_expense_line(
        &mut expense,
        body.expense_line_id,
        &body.update,
        new_expense.as_mut(),
    )?;

    let expected = ExpectedVersion::Exact(expense.version);
    let expense = services.expenses.update(tenant_id, expense, expected)?;
    let new_expense = match new_expense {
        Some(target) => {
            let expected = ExpectedVersion::Exact(target.version);
            Some(services.expenses.update(tenant_id, target, expected)?)
        }
        None => None,
    };

    Ok(json!({
        "line": line,
        "expense": expense,
        "newExpense": new_expense,
    }))
}
