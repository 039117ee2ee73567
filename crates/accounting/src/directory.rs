//! Read access to stored accounting data needed by the move services.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use chrono::{Datelike, NaiveDate};

use erpsuite_core::RecordId;

use crate::entry::Move;
use crate::model::{Company, Period, PeriodStatus};

/// Lookups the move services perform against stored data.
pub trait AccountingDirectory: Send + Sync {
    /// Company used for new moves when the client did not pick one.
    fn default_company(&self) -> Option<Company>;

    /// Open or temporarily closed period of `company` containing `date`.
    fn period_for_date(&self, company: &Company, date: NaiveDate) -> Option<Period>;

    /// Last saved state of a move.
    fn find_move(&self, id: RecordId) -> Option<Move>;

    /// Labels of other moves sharing the journal, origin and partner of `mv`.
    fn moves_with_same_origin(&self, mv: &Move) -> Vec<String>;

    fn has_related_cut_off_moves(&self, id: RecordId) -> bool;

    /// References of the payment vouchers using any of these invoice terms.
    fn payment_voucher_refs(&self, invoice_term_ids: &[RecordId]) -> Vec<String>;
}

impl<S> AccountingDirectory for Arc<S>
where
    S: AccountingDirectory + ?Sized,
{
    fn default_company(&self) -> Option<Company> {
        (**self).default_company()
    }

    fn period_for_date(&self, company: &Company, date: NaiveDate) -> Option<Period> {
        (**self).period_for_date(company, date)
    }

    fn find_move(&self, id: RecordId) -> Option<Move> {
        (**self).find_move(id)
    }

    fn moves_with_same_origin(&self, mv: &Move) -> Vec<String> {
        (**self).moves_with_same_origin(mv)
    }

    fn has_related_cut_off_moves(&self, id: RecordId) -> bool {
        (**self).has_related_cut_off_moves(id)
    }

    fn payment_voucher_refs(&self, invoice_term_ids: &[RecordId]) -> Vec<String> {
        (**self).payment_voucher_refs(invoice_term_ids)
    }
}

/// In-memory directory for tests/dev.
///
/// Periods are keyed by company code so records coming from clients match
/// even when they carry a different company id.
#[derive(Debug, Default)]
pub struct InMemoryAccountingDirectory {
    companies: RwLock<Vec<Company>>,
    periods: RwLock<Vec<(String, Period)>>,
    moves: RwLock<HashMap<RecordId, Move>>,
    cut_off_origins: RwLock<HashSet<RecordId>>,
    pay_vouchers: RwLock<HashMap<RecordId, String>>,
}

impl InMemoryAccountingDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(self, company: Company) -> Self {
        self.add_company(company);
        self
    }

    pub fn with_period(self, company_code: &str, period: Period) -> Self {
        self.add_period(company_code, period);
        self
    }

    /// Twelve monthly open periods for `year`.
    pub fn with_fiscal_year(self, company_code: &str, year: i32) -> Self {
        self.add_fiscal_year(company_code, year);
        self
    }

    pub fn add_fiscal_year(&self, company_code: &str, year: i32) {
        for month in 1..=12 {
            let Some(from_date) = NaiveDate::from_ymd_opt(year, month, 1) else {
                continue;
            };
            let Some(to_date) = last_day_of_month(from_date) else {
                continue;
            };
            self.add_period(
                company_code,
                Period {
                    id: RecordId::new(),
                    code: format!("{year}-{month:02}"),
                    from_date,
                    to_date,
                    status: PeriodStatus::Opened,
                    authorized_roles: Vec::new(),
                },
            );
        }
    }

    /// Register a company, replacing any company with the same code.
    pub fn add_company(&self, company: Company) {
        if let Ok(mut companies) = self.companies.write() {
            match companies.iter_mut().find(|c| c.code == company.code) {
                Some(existing) => *existing = company,
                None => companies.push(company),
            }
        }
    }

    pub fn add_period(&self, company_code: &str, period: Period) {
        if let Ok(mut periods) = self.periods.write() {
            periods.push((company_code.to_string(), period));
        }
    }

    pub fn upsert_move(&self, mv: Move) {
        if let Ok(mut moves) = self.moves.write() {
            moves.insert(mv.id, mv);
        }
    }

    pub fn register_cut_off_move(&self, origin_move_id: RecordId) {
        if let Ok(mut set) = self.cut_off_origins.write() {
            set.insert(origin_move_id);
        }
    }

    pub fn register_pay_voucher(&self, invoice_term_id: RecordId, reference: impl Into<String>) {
        if let Ok(mut map) = self.pay_vouchers.write() {
            map.insert(invoice_term_id, reference.into());
        }
    }

    pub fn has_periods_for(&self, company_code: &str) -> bool {
        self.periods
            .read()
            .map(|p| p.iter().any(|(code, _)| code == company_code))
            .unwrap_or(false)
    }
}

impl AccountingDirectory for InMemoryAccountingDirectory {
    fn default_company(&self) -> Option<Company> {
        self.companies.read().ok()?.first().cloned()
    }

    fn period_for_date(&self, company: &Company, date: NaiveDate) -> Option<Period> {
        let periods = self.periods.read().ok()?;
        periods
            .iter()
            .filter(|(code, p)| *code == company.code && p.contains(date))
            .map(|(_, p)| p)
            .find(|p| p.status != PeriodStatus::Closed)
            .cloned()
    }

    fn find_move(&self, id: RecordId) -> Option<Move> {
        self.moves.read().ok()?.get(&id).cloned()
    }

    fn moves_with_same_origin(&self, mv: &Move) -> Vec<String> {
        let (Some(origin), Some(journal)) = (mv.origin.as_deref(), mv.journal.as_ref()) else {
            return vec![];
        };
        let Ok(moves) = self.moves.read() else {
            return vec![];
        };
        let partner_id = mv.partner.as_ref().map(|p| p.id);

        let mut labels: Vec<String> = moves
            .values()
            .filter(|other| other.id != mv.id)
            .filter(|other| other.origin.as_deref() == Some(origin))
            .filter(|other| other.journal.as_ref().map(|j| &j.code) == Some(&journal.code))
            .filter(|other| partner_id.is_none() || other.partner.as_ref().map(|p| p.id) == partner_id)
            .map(Move::label)
            .collect();
        labels.sort();
        labels
    }

    fn has_related_cut_off_moves(&self, id: RecordId) -> bool {
        self.cut_off_origins
            .read()
            .map(|set| set.contains(&id))
            .unwrap_or(false)
    }

    fn payment_voucher_refs(&self, invoice_term_ids: &[RecordId]) -> Vec<String> {
        let Ok(map) = self.pay_vouchers.read() else {
            return vec![];
        };
        let mut refs: Vec<String> = invoice_term_ids
            .iter()
            .filter_map(|id| map.get(id).cloned())
            .collect();
        refs.sort();
        refs.dedup();
        refs
    }
}

pub(crate) fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn fiscal_year_creates_monthly_periods() {
        let company = Company::new("ACME", "EUR");
        let dir = InMemoryAccountingDirectory::new()
            .with_company(company.clone())
            .with_fiscal_year("ACME", 2024);

        let feb = dir.period_for_date(&company, d(2024, 2, 29)).unwrap();
        assert_eq!(feb.code, "2024-02");
        assert_eq!(feb.to_date, d(2024, 2, 29));
        assert!(dir.period_for_date(&company, d(2025, 1, 1)).is_none());
    }

    #[test]
    fn closed_periods_are_not_returned() {
        let company = Company::new("ACME", "EUR");
        let dir = InMemoryAccountingDirectory::new().with_period(
            "ACME",
            Period {
                id: RecordId::new(),
                code: "2024-01".into(),
                from_date: d(2024, 1, 1),
                to_date: d(2024, 1, 31),
                status: PeriodStatus::Closed,
                authorized_roles: vec![],
            },
        );
        assert!(dir.period_for_date(&company, d(2024, 1, 15)).is_none());
    }

    #[test]
    fn last_day_handles_december() {
        assert_eq!(last_day_of_month(d(2024, 12, 3)), Some(d(2024, 12, 31)));
    }
}
