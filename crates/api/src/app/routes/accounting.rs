use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use erpsuite_accounting::Move;
use erpsuite_auth::Permission;
use erpsuite_core::{ActionContext, DomainResult, RecordContext};

use crate::app::dto;
use crate::app::errors;
use crate::app::routes::common::{guard, respond};
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

/// Lifecycle events of the move form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    New,
    Load,
    ChangeDate,
    ChangeJournal,
    ChangePartner,
    ChangeMoveLineList,
    ChangeOriginDate,
    ChangeOrigin,
    SaveBefore,
    SaveAfter,
}

impl MoveEvent {
    pub fn parse(raw: &str) -> Option<Self> {
        Some(match raw {
            "new" => Self::New,
            "load" => Self::Load,
            "change-date" => Self::ChangeDate,
            "change-journal" => Self::ChangeJournal,
            "change-partner" => Self::ChangePartner,
            "change-move-line-list" => Self::ChangeMoveLineList,
            "change-origin-date" => Self::ChangeOriginDate,
            "change-origin" => Self::ChangeOrigin,
            "save-before" => Self::SaveBefore,
            "save-after" => Self::SaveAfter,
            _ => return None,
        })
    }

    pub fn origin(self) -> &'static str {
        match self {
            Self::New => "move.on_new",
            Self::Load => "move.on_load",
            Self::ChangeDate => "move.on_change_date",
            Self::ChangeJournal => "move.on_change_journal",
            Self::ChangePartner => "move.on_change_partner",
            Self::ChangeMoveLineList => "move.on_change_move_line_list",
            Self::ChangeOriginDate => "move.on_change_origin_date",
            Self::ChangeOrigin => "move.on_change_origin",
            Self::SaveBefore => "move.on_save_before",
            Self::SaveAfter => "move.on_save_after",
        }
    }
}

pub async fn register_company(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::RegisterCompanyRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::ACCOUNTING_WRITE) {
        return resp;
    }

    let code = body.company.code.clone();
    services.accounting.add_company(body.company.clone());
    for year in &body.fiscal_years {
        services.accounting.add_fiscal_year(&code, *year);
    }
    tracing::info!(company = %code, fiscal_years = body.fiscal_years.len(), "company registered");

    respond(
        &services,
        &tenant,
        &principal,
        "accounting.register_company",
        StatusCode::CREATED,
        Ok(body.company),
    )
}

pub async fn move_action(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(event): Path<String>,
    Json(body): Json<dto::MoveActionRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::ACCOUNTING_WRITE) {
        return resp;
    }
    let Some(event) = MoveEvent::parse(&event) else {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "unknown_event",
            format!("unknown move event '{event}'"),
        );
    };

    let mut mv = body.record;
    let mut ctx = principal.action_context(body.context);
    let result = run_move_event(&services, &tenant, event, &mut mv, &mut ctx).map(|context| {
        dto::RecordActionResponse {
            context: context.into_response(&services.catalog, principal.locale()),
            record: mv,
        }
    });

    respond(&services, &tenant, &principal, event.origin(), StatusCode::OK, result)
}

/// Run one lifecycle event. Save events also persist the move.
fn run_move_event(
    services: &AppServices,
    tenant: &TenantContext,
    event: MoveEvent,
    mv: &mut Move,
    ctx: &mut ActionContext,
) -> DomainResult<RecordContext> {
    let records = &services.move_records;
    let context = match event {
        MoveEvent::New => records.on_new(mv, ctx)?,
        MoveEvent::Load => records.on_load(mv, ctx)?,
        MoveEvent::ChangeDate => records.on_change_date(mv, ctx)?,
        MoveEvent::ChangeJournal => records.on_change_journal(mv, ctx)?,
        MoveEvent::ChangePartner => records.on_change_partner(mv, ctx)?,
        MoveEvent::ChangeMoveLineList => records.on_change_move_line_list(mv, ctx)?,
        MoveEvent::ChangeOriginDate => records.on_change_origin_date(mv, ctx)?,
        MoveEvent::ChangeOrigin => records.on_change_origin(mv, ctx)?,
        MoveEvent::SaveBefore | MoveEvent::SaveAfter => {
            let context = if event == MoveEvent::SaveBefore {
                records.on_save_before(mv, ctx)?
            } else {
                records.on_save_after(mv, ctx)?
            };
            *mv = services.save_move(tenant.tenant_id(), mv.clone())?;
            context
        }
    };
    Ok(context)
}

pub async fn invoice_payment_terms(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::InvoicePaymentTermsRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::ACCOUNTING_WRITE) {
        return resp;
    }

    let dto::InvoicePaymentTermsRequest {
        mut payment,
        invoice,
        update_amount,
        today,
    } = body;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());

    let result = (|| -> DomainResult<_> {
        let service = &services.invoice_term_payments;
        payment.invoice_term_payments.clear();
        service.create_invoice_payment_terms(&mut payment, &invoice)?;
        if update_amount {
            service.update_invoice_payment_amount(&mut payment, &invoice, today)?;
        }
        Ok(payment)
    })();

    respond(
        &services,
        &tenant,
        &principal,
        "invoice_payment.terms",
        StatusCode::OK,
        result,
    )
}

pub async fn financial_discount(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::FinancialDiscountRequest>,
) -> axum::response::Response {
    if let Err(resp) = guard(&tenant, &principal, &Permission::ACCOUNTING_WRITE) {
        return resp;
    }

    let mut invoice = body.invoice;
    let result = services
        .financial_discounts
        .set_financial_discount_informations(&mut invoice)
        .map(|()| invoice);

    respond(
        &services,
        &tenant,
        &principal,
        "invoice.financial_discount",
        StatusCode::OK,
        result,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_name_parses() {
        let names = [
            "new",
            "load",
            "change-date",
            "change-journal",
            "change-partner",
            "change-move-line-list",
            "change-origin-date",
            "change-origin",
            "save-before",
            "save-after",
        ];
        for name in names {
            let event = MoveEvent::parse(name).unwrap();
            assert!(event.origin().starts_with("move.on_"));
        }
        assert_eq!(MoveEvent::parse("delete"), None);
    }
}
