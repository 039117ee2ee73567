use axum::{
    routing::{get, post, put},
    Router,
};

pub mod accounting;
pub mod budget;
pub mod common;
pub mod crm;
pub mod gdpr;
pub mod hr;
pub mod sale;
pub mod stock;
pub mod system;

/// Router for all authenticated (tenant-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/ws/whoami", get(system::whoami))
        .route("/ws/traceback", get(system::tracebacks))
        .route("/ws/accounting/company", post(accounting::register_company))
        .route("/ws/action/move/:event", post(accounting::move_action))
        .route(
            "/ws/action/move/budget-distribution",
            post(budget::compute_budget_distribution),
        )
        .route("/ws/action/move/budget-check", post(budget::check_budget_distribution))
        .route("/ws/action/sale-order/check-budget", post(budget::check_sale_order_budget))
        .route("/ws/action/invoice-payment/terms", post(accounting::invoice_payment_terms))
        .route(
            "/ws/action/invoice/financial-discount",
            post(accounting::financial_discount),
        )
        .route("/ws/action/sale-order/merge", post(sale::merge_sale_orders))
        .route("/ws/action/expense-line", put(hr::update_expense_line))
        .nest("/ws/budget", budget::router())
        .nest("/ws/hr", hr::router())
        .nest("/ws/crm", crm::router())
        .nest("/ws/sale", sale::router())
        .nest("/ws/aos", stock::router())
        .route("/ws/gdpr/anonymize", post(gdpr::anonymize))
}
