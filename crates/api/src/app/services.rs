//! Service wiring: repositories, directories and domain services shared by
//! every handler.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use erpsuite_accounting::{
    Company, InMemoryAccountingDirectory, InvoiceFinancialDiscountService, InvoiceTermPaymentService, Move,
    MoveHooks, MoveRecordService,
};
use erpsuite_base::{CurrencyService, SequenceGenerator};
use erpsuite_budget::{
    BudgetAccess, BudgetLevel, BudgetLevelHooks, InMemoryBudgetDirectory, MoveBudgetService,
    SaleOrderCheckBudgetService,
};
use erpsuite_core::{Catalog, DomainResult, Locale, TenantId};
use erpsuite_crm::{
    CrmBatchService, OPPORTUNITY_SEQUENCE, Opportunity, OpportunityHooks, OpportunityStatus, StatusTechnicalType,
};
use erpsuite_hr::{Expense, ExpenseLineUpdateService};
use erpsuite_infra::{AppConfig, InMemoryRepository, InMemoryTenantStore, TraceBackService};
use erpsuite_sale::{LoyaltyAccount, LoyaltyAccountService, SaleOrderMergingService};
use erpsuite_stock::{StockMove, StockMoveLineService, StockMoveUpdateService, UnitConversionService};

const OPPORTUNITY_PREFIX: &str = "OPP";
const OPPORTUNITY_PADDING: usize = 5;

pub struct AppServices {
    pub catalog: Catalog,
    pub tracebacks: TraceBackService,
    pub sequences: Arc<SequenceGenerator>,

    pub accounting: Arc<InMemoryAccountingDirectory>,
    pub budgets: Arc<InMemoryBudgetDirectory>,

    pub moves: InMemoryRepository<Move, MoveHooks>,
    pub expenses: InMemoryRepository<Expense>,
    pub opportunities: InMemoryRepository<Opportunity, OpportunityHooks>,
    pub stock_moves: InMemoryRepository<StockMove>,
    pub budget_levels: InMemoryRepository<BudgetLevel, BudgetLevelHooks>,
    pub loyalty_accounts: InMemoryRepository<LoyaltyAccount>,

    pub move_records: MoveRecordService,
    pub move_budgets: MoveBudgetService,
    pub sale_order_budgets: SaleOrderCheckBudgetService,
    pub invoice_term_payments: InvoiceTermPaymentService,
    pub financial_discounts: InvoiceFinancialDiscountService,
    pub expense_lines: ExpenseLineUpdateService,
    pub crm_batches: CrmBatchService,
    pub stock_move_lines: StockMoveLineService,
    pub stock_move_updates: StockMoveUpdateService,
    pub sale_order_merging: SaleOrderMergingService,
    pub loyalty: LoyaltyAccountService,
    pub loyalty_points_delay_days: u32,
}

/// Translation tables of every module.
pub fn catalog() -> Catalog {
    Catalog::new()
        .with(Locale::Fr, erpsuite_base::messages::FR)
        .with(Locale::Fr, erpsuite_accounting::messages::FR)
        .with(Locale::Fr, erpsuite_budget::messages::FR)
        .with(Locale::Fr, erpsuite_hr::messages::FR)
        .with(Locale::Fr, erpsuite_crm::messages::FR)
        .with(Locale::Fr, erpsuite_stock::messages::FR)
        .with(Locale::Fr, erpsuite_sale::messages::FR)
}

/// Opportunity pipeline used when none is configured.
pub fn default_opportunity_statuses() -> Vec<OpportunityStatus> {
    [
        ("New", StatusTechnicalType::New),
        ("In progress", StatusTechnicalType::InProgress),
        ("Closed won", StatusTechnicalType::ClosedWon),
        ("Closed lost", StatusTechnicalType::ClosedLost),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, technical_type), sequence)| OpportunityStatus {
        name: name.to_string(),
        sequence,
        technical_type,
    })
    .collect()
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let accounting = Arc::new(InMemoryAccountingDirectory::new());
    if let Some(code) = &config.accounting.default_company {
        accounting.add_company(Company::new(code.clone(), config.accounting.currency.clone()));
        let year = Utc::now().year();
        for y in year - 1..=year + 1 {
            accounting.add_fiscal_year(code, y);
        }
        tracing::info!(company = %code, "default company registered");
    }

    let budgets = Arc::new(InMemoryBudgetDirectory::new());
    let currencies = Arc::new(CurrencyService::default());
    let sequences = Arc::new(SequenceGenerator::new());

    let budget_access = BudgetAccess {
        enabled: config.budget.enabled,
        authorized_roles: config.budget.authorized_roles.clone(),
    };

    AppServices {
        catalog: catalog(),
        tracebacks: TraceBackService::new(Arc::new(InMemoryTenantStore::new())),
        sequences: sequences.clone(),

        moves: InMemoryRepository::new(MoveHooks::new(accounting.clone())),
        expenses: InMemoryRepository::default(),
        opportunities: InMemoryRepository::new(OpportunityHooks::new(
            sequences,
            default_opportunity_statuses(),
        )),
        stock_moves: InMemoryRepository::default(),
        budget_levels: InMemoryRepository::new(BudgetLevelHooks::new(budgets.clone(), config.budget.enabled)),
        loyalty_accounts: InMemoryRepository::default(),

        move_records: MoveRecordService::new(
            accounting.clone(),
            currencies.clone(),
            config.accounting.nb_decimal_digits,
        ),
        move_budgets: MoveBudgetService::new(budgets.clone(), budget_access),
        sale_order_budgets: SaleOrderCheckBudgetService::new(budgets.clone()),
        invoice_term_payments: InvoiceTermPaymentService::new(currencies),
        financial_discounts: InvoiceFinancialDiscountService::new(),
        expense_lines: ExpenseLineUpdateService::new(),
        crm_batches: CrmBatchService::new(),
        stock_move_lines: StockMoveLineService::new(),
        stock_move_updates: StockMoveUpdateService::new(Arc::new(UnitConversionService::new())),
        sale_order_merging: SaleOrderMergingService::new(),
        loyalty: LoyaltyAccountService::new(),
        loyalty_points_delay_days: config.sale.loyalty_points_delay_days,

        accounting,
        budgets,
    }
}

impl AppServices {
    /// Store a new opportunity, numbering it from the tenant's sequence.
    pub fn create_opportunity(&self, tenant_id: TenantId, opportunity: Opportunity) -> DomainResult<Opportunity> {
        self.sequences.register_if_absent(
            tenant_id,
            OPPORTUNITY_SEQUENCE,
            OPPORTUNITY_PREFIX,
            OPPORTUNITY_PADDING,
        );
        self.opportunities.insert(tenant_id, opportunity)
    }

    pub fn copy_opportunity(
        &self,
        tenant_id: TenantId,
        id: erpsuite_core::RecordId,
        deep: bool,
    ) -> DomainResult<Opportunity> {
        self.sequences.register_if_absent(
            tenant_id,
            OPPORTUNITY_SEQUENCE,
            OPPORTUNITY_PREFIX,
            OPPORTUNITY_PADDING,
        );
        self.opportunities.copy(tenant_id, id, deep)
    }

    /// Persist a move and publish it to the directory used by duplicate and
    /// cut-off lookups.
    pub fn save_move(&self, tenant_id: TenantId, mv: Move) -> DomainResult<Move> {
        let saved = self.moves.save(tenant_id, mv)?;
        self.accounting.upsert_move(saved.clone());
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_company_is_seeded_from_config() {
        use erpsuite_accounting::AccountingDirectory;

        let mut config = AppConfig::default();
        config.accounting.default_company = Some("ACME".into());
        let services = build_services(&config);

        let company = services.accounting.default_company().unwrap();
        assert_eq!(company.code, "ACME");
        assert_eq!(company.currency, "EUR");
        let today = Utc::now().date_naive();
        assert!(services.accounting.period_for_date(&company, today).is_some());
    }

    #[test]
    fn opportunities_are_numbered_per_tenant() {
        let services = build_services(&AppConfig::default());
        let tenant = TenantId::new();

        let first = services.create_opportunity(tenant, Opportunity::new("Tender")).unwrap();
        let second = services.create_opportunity(tenant, Opportunity::new("Renewal")).unwrap();

        assert_eq!(first.opportunity_seq.as_deref(), Some("OPP00001"));
        assert_eq!(second.opportunity_seq.as_deref(), Some("OPP00002"));
        assert_eq!(first.status.map(|s| s.name), Some("New".to_string()));
    }

    #[test]
    fn catalog_translates_module_messages() {
        let catalog = catalog();
        let fr = catalog.translate(Locale::Fr, erpsuite_stock::messages::STOCK_MOVE_LINE_UPDATED);
        assert_ne!(fr, erpsuite_stock::messages::STOCK_MOVE_LINE_UPDATED);
        let fr = catalog.translate(Locale::Fr, erpsuite_sale::messages::SALE_ORDER_MERGE_LIST_EMPTY);
        assert_eq!(fr, "La liste des devis à fusionner est vide");
    }
}
