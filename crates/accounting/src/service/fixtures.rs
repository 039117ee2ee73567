use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::directory::InMemoryAccountingDirectory;
use crate::entry::{Move, MoveLine};
use crate::model::{
    Account, AccountKind, BankDetails, Company, Journal, JournalTechnicalType, Partner, PaymentMode,
};

pub(crate) fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub(crate) fn misc_journal() -> Journal {
    Journal::new("OD", JournalTechnicalType::Other)
}

pub(crate) fn sale_journal() -> Journal {
    Journal::new("VT", JournalTechnicalType::Sale)
}

pub(crate) fn company() -> Company {
    let mut company = Company::new("ACME", "EUR");
    company.manual_misc_journal = Some(misc_journal());
    company.default_bank_details = Some(BankDetails {
        id: Default::default(),
        iban: "FR7630001007941234567890185".into(),
        active: true,
        is_default: true,
    });
    company
}

pub(crate) fn customer_account() -> Account {
    let mut account = Account::new("411000", "Customers", AccountKind::Receivable);
    account.has_invoice_term = true;
    account.reconcile_ok = true;
    account
}

pub(crate) fn revenue_account() -> Account {
    let mut account = Account::new("706000", "Services", AccountKind::Revenue);
    account.use_for_budget = true;
    account
}

pub(crate) fn customer() -> Partner {
    let mut partner = Partner::new("Globex");
    partner.is_customer = true;
    partner.currency = Some("USD".into());
    partner.in_payment_mode = Some(PaymentMode {
        id: Default::default(),
        code: "TRANSFER_IN".into(),
        in_out: crate::model::InOut::In,
    });
    partner.payment_condition = Some(crate::model::PaymentCondition::net("30D", 30));
    partner.bank_details = vec![BankDetails {
        id: Default::default(),
        iban: "DE89370400440532013000".into(),
        active: true,
        is_default: false,
    }];
    partner
}

pub(crate) fn directory() -> Arc<InMemoryAccountingDirectory> {
    Arc::new(
        InMemoryAccountingDirectory::new()
            .with_company(company())
            .with_fiscal_year("ACME", 2024),
    )
}

/// Sale move: customer debit / revenue credit.
pub(crate) fn balanced_move(amount: i64) -> Move {
    let amount = Decimal::new(amount, 2);
    Move {
        company: Some(company()),
        journal: Some(sale_journal()),
        date: Some(d(2024, 3, 15)),
        currency: Some("EUR".into()),
        lines: vec![
            MoveLine::new(customer_account(), amount, Decimal::ZERO),
            MoveLine::new(revenue_account(), Decimal::ZERO, amount),
        ],
        ..Move::default()
    }
}
